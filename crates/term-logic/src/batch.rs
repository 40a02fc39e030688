//! Batch evaluation
//!
//! Evaluates many terms or predicates against many input vectors. Results
//! are input-major: `result[i][j]` is expression `j` evaluated on input `i`.
//!
//! When the `parallel` feature is enabled, rows are evaluated with rayon.
//! Rows are independent, so the output is the same either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::EvalResult;
use crate::predicate::Predicate;
use crate::term::Term;

/// Apply `f` to every input row, keeping input order
///
/// The first failing row aborts the batch.
pub(crate) fn map_rows<T, V, R, F>(inputs: &[V], f: F) -> EvalResult<Vec<R>>
where
    V: AsRef<[T]> + Sync,
    R: Send,
    F: Fn(&[T]) -> EvalResult<R> + Send + Sync,
{
    #[cfg(feature = "parallel")]
    let results = inputs.par_iter().map(|row| f(row.as_ref())).collect();

    #[cfg(not(feature = "parallel"))]
    let results = inputs.iter().map(|row| f(row.as_ref())).collect();

    results
}

/// Evaluate every term against one input vector
pub fn substitute_row<T: Clone>(input: &[T], terms: &[Term<T>]) -> EvalResult<Vec<T>> {
    terms.iter().map(|term| term.evaluate(input)).collect()
}

/// Evaluate every term against every input vector
///
/// Returns one row per input, each with one value per term.
pub fn substitute<T, V>(inputs: &[V], terms: &[Term<T>]) -> EvalResult<Vec<Vec<T>>>
where
    T: Clone + Send + Sync,
    V: AsRef<[T]> + Sync,
{
    tracing::debug!(rows = inputs.len(), terms = terms.len(), "substituting terms");
    map_rows(inputs, |input| substitute_row(input, terms))
}

/// Evaluate every predicate against one input vector
pub fn evaluate_row<T: Clone>(input: &[T], predicates: &[Predicate<T>]) -> EvalResult<Vec<bool>> {
    predicates
        .iter()
        .map(|predicate| predicate.evaluate(input))
        .collect()
}

/// Evaluate every predicate against every input vector
///
/// Returns one row per input, each with one flag per predicate.
pub fn evaluate<T, V>(inputs: &[V], predicates: &[Predicate<T>]) -> EvalResult<Vec<Vec<bool>>>
where
    T: Clone + Send + Sync,
    V: AsRef<[T]> + Sync,
{
    tracing::debug!(
        rows = inputs.len(),
        predicates = predicates.len(),
        "evaluating predicates"
    );
    map_rows(inputs, |input| evaluate_row(input, predicates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    fn rows() -> Vec<Vec<f64>> {
        vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]
    }

    #[test]
    fn test_substitute_matrix_shape() {
        let x = Term::<f64>::variable(0);
        let y = Term::<f64>::variable(1);
        let terms = vec![&x + &y, x * 10.0, y];

        let result = substitute(&rows(), &terms).unwrap();
        assert_eq!(
            result,
            vec![
                vec![3.0, 10.0, 2.0],
                vec![7.0, 30.0, 4.0],
                vec![11.0, 50.0, 6.0],
            ]
        );
    }

    #[test]
    fn test_substitute_row() {
        let terms = vec![Term::<f64>::variable(1), Term::constant(9.0)];
        assert_eq!(substitute_row(&[4.0, 8.0], &terms).unwrap(), vec![8.0, 9.0]);
    }

    #[test]
    fn test_evaluate_matrix() {
        let x = Term::<f64>::variable(0);
        let predicates = vec![x.gt(2.0), x.lt(4.0)];

        let result = evaluate(&rows(), &predicates).unwrap();
        assert_eq!(
            result,
            vec![vec![false, true], vec![true, true], vec![true, false]]
        );
        assert_eq!(
            evaluate_row(&[3.0], &predicates).unwrap(),
            vec![true, true]
        );
    }

    #[test]
    fn test_empty_inputs_and_expressions() {
        let empty: Vec<Vec<f64>> = Vec::new();
        let terms = vec![Term::<f64>::variable(0)];
        assert!(substitute(&empty, &terms).unwrap().is_empty());

        let none: Vec<Term<f64>> = Vec::new();
        assert_eq!(
            substitute(&rows(), &none).unwrap(),
            vec![Vec::<f64>::new(); 3]
        );
    }

    #[test]
    fn test_row_error_aborts_batch() {
        let terms = vec![Term::<f64>::variable(2)];
        let inputs = vec![vec![1.0, 2.0, 3.0], vec![1.0]];
        assert_eq!(
            substitute(&inputs, &terms),
            Err(EvalError::IndexOutOfRange { index: 2, len: 1 })
        );
    }

    #[test]
    fn test_slices_as_rows() {
        let data = [[1.0, 2.0], [3.0, 4.0]];
        let sum = Term::<f64>::variable(0) + Term::variable(1);
        assert_eq!(sum.evaluate_batch(&data).unwrap(), vec![3.0, 7.0]);
    }
}
