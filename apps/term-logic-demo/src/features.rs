//! Bounding box features
//!
//! Each input vector describes a box as `[min_x, min_y, size_x, size_y]`.
//! The features below are built once and evaluated for every box.

use term_logic::{Predicate, Term};

pub const MIN_X: usize = 0;
pub const MIN_Y: usize = 1;
pub const SIZE_X: usize = 2;
pub const SIZE_Y: usize = 3;

/// Number of slots an input vector must provide
pub const FEATURE_SLOTS: usize = 4;

/// Named numeric features, in the order they are reported
pub const FEATURE_NAMES: [&str; 7] = [
    "max x",
    "max y",
    "cx",
    "cy",
    "weighted centre",
    "weighted centre (operators)",
    "squared sum",
];

/// The sample feature formulas
#[derive(Debug, Clone)]
pub struct FeatureSet {
    pub max_x: Term<f64>,
    pub max_y: Term<f64>,
    pub c_x: Term<f64>,
    pub c_y: Term<f64>,
    pub weighted: Term<f64>,
    pub weighted_ops: Term<f64>,
    pub squared_sum: Term<f64>,
    /// `min_x` for boxes wider than tall, otherwise `min_y`
    pub leading_min: Term<f64>,
    /// Centre of gravity beyond `threshold` in both directions
    pub selected: Predicate<f64>,
}

impl FeatureSet {
    pub fn new(threshold: f64) -> Self {
        let min_x = Term::<f64>::variable(MIN_X);
        let min_y = Term::<f64>::variable(MIN_Y);
        let size_x = Term::<f64>::variable(SIZE_X);
        let size_y = Term::<f64>::variable(SIZE_Y);

        let max_x = &min_x + &size_x;
        let max_y = &min_y + &size_y;

        let c_x = &min_x + &size_x / 2.0;
        let c_y = &min_y + &size_y / 2.0;

        let selected = c_x.gt(threshold) & c_y.gt(threshold);

        // Operators only cover the simple cases; anything else goes through
        // `combine`
        let weighted = c_x.combine(&c_y, |a, b| 3.0 * a + 5.0 * b);
        let weighted_ops = 3.0 * &c_x + 5.0 * &c_y;
        let squared_sum = weighted.combine(&weighted_ops, |a, b| a * a + b * b);

        let wider = size_x.combine(&size_y, |a, b| if a > b { 1.0 } else { 0.0 });
        let leading_min = &wider * &min_x + (1.0 - &wider) * &min_y;

        Self {
            max_x,
            max_y,
            c_x,
            c_y,
            weighted,
            weighted_ops,
            squared_sum,
            leading_min,
            selected,
        }
    }

    /// Terms reported per input, matching [`FEATURE_NAMES`]
    pub fn terms(&self) -> Vec<Term<f64>> {
        vec![
            self.max_x.clone(),
            self.max_y.clone(),
            self.c_x.clone(),
            self.c_y.clone(),
            self.weighted.clone(),
            self.weighted_ops.clone(),
            self.squared_sum.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_terms_match_names() {
        assert_eq!(FeatureSet::new(10.0).terms().len(), FEATURE_NAMES.len());
    }

    #[test]
    fn test_large_box() {
        let features = FeatureSet::new(10.0);
        let input = [1.0, 2.0, 21.0, 21.0];

        assert_eq!(features.max_x.evaluate(&input).unwrap(), 22.0);
        assert_eq!(features.max_y.evaluate(&input).unwrap(), 23.0);
        assert_eq!(features.c_x.evaluate(&input).unwrap(), 11.5);
        assert_eq!(features.c_y.evaluate(&input).unwrap(), 12.5);
        assert_eq!(features.weighted.evaluate(&input).unwrap(), 97.0);
        assert_eq!(features.weighted_ops.evaluate(&input).unwrap(), 97.0);
        assert_eq!(features.leading_min.evaluate(&input).unwrap(), 2.0);
        assert!(features.selected.evaluate(&input).unwrap());
    }

    #[test]
    fn test_small_box() {
        let features = FeatureSet::new(10.0);
        let input = [3.0, 6.0, 5.1, 5.0];

        assert!(close(features.c_x.evaluate(&input).unwrap(), 5.55));
        assert_eq!(features.c_y.evaluate(&input).unwrap(), 8.5);
        assert!(close(features.weighted.evaluate(&input).unwrap(), 59.15));
        assert_eq!(features.leading_min.evaluate(&input).unwrap(), 3.0);
        assert!(!features.selected.evaluate(&input).unwrap());
    }

    #[test]
    fn test_threshold_is_configurable() {
        let features = FeatureSet::new(5.0);
        assert!(features.selected.evaluate(&[3.0, 6.0, 5.1, 5.0]).unwrap());
    }
}
