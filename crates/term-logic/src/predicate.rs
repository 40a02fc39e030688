//! Logical expressions over terms
//!
//! A [`Predicate`] is an immutable boolean node. Leaves compare the values of
//! one or two terms; interior nodes apply a boolean function to one or two
//! child predicates.
//!
//! Rust's comparison operators have to return `bool`, so relations are built
//! with [`Term::lt`], [`Term::gt`] and friends, or with the free functions
//! [`lt`], [`le`], [`gt`], [`ge`], [`eq`] and [`ne`]. Their operands may be
//! terms or raw constants.
//!
//! # Evaluation order
//!
//! Boolean combinators never short-circuit. `p & q` and `p | q` always
//! evaluate both operands, left first, so side effects inside modifiers run
//! on every evaluation and an error in either operand is reported.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::sync::Arc;

use crate::batch;
use crate::error::EvalResult;
use crate::term::Term;

type CompareFn<T> = Arc<dyn Fn(T, T) -> bool + Send + Sync>;
type CompareUnaryFn<T> = Arc<dyn Fn(T) -> bool + Send + Sync>;
type ModifyFn = Arc<dyn Fn(bool) -> bool + Send + Sync>;
type CombineFn = Arc<dyn Fn(bool, bool) -> bool + Send + Sync>;

/// The kind of a predicate node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    /// Relation between two terms
    Compare,
    /// Test on a single term
    CompareUnary,
    /// Boolean function of one child predicate
    Modify,
    /// Boolean function of two child predicates
    Combine,
}

enum PredicateNode<T> {
    Compare {
        a: Term<T>,
        b: Term<T>,
        cmp: CompareFn<T>,
    },
    CompareUnary {
        a: Term<T>,
        cmp: CompareUnaryFn<T>,
    },
    Modify {
        child: Predicate<T>,
        f: ModifyFn,
    },
    Combine {
        left: Predicate<T>,
        right: Predicate<T>,
        f: CombineFn,
    },
}

/// A boolean expression over an input vector
pub struct Predicate<T> {
    node: Arc<PredicateNode<T>>,
}

impl<T> Predicate<T> {
    fn from_node(node: PredicateNode<T>) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// Compare the values of two terms with `cmp`
    pub fn compare<F>(a: Term<T>, b: Term<T>, cmp: F) -> Self
    where
        F: Fn(T, T) -> bool + Send + Sync + 'static,
    {
        Self::from_node(PredicateNode::Compare {
            a,
            b,
            cmp: Arc::new(cmp),
        })
    }

    /// Test the value of a single term with `cmp`
    ///
    /// Used for comparisons against a constant captured by `cmp`.
    pub fn compare_unary<F>(a: Term<T>, cmp: F) -> Self
    where
        F: Fn(T) -> bool + Send + Sync + 'static,
    {
        Self::from_node(PredicateNode::CompareUnary {
            a,
            cmp: Arc::new(cmp),
        })
    }

    /// Apply a boolean function to the result of `child`
    pub fn modify<F>(child: Predicate<T>, f: F) -> Self
    where
        F: Fn(bool) -> bool + Send + Sync + 'static,
    {
        Self::from_node(PredicateNode::Modify {
            child,
            f: Arc::new(f),
        })
    }

    /// Combine the results of two predicates with `f`
    ///
    /// Both predicates are always evaluated.
    pub fn combine<F>(left: Predicate<T>, right: Predicate<T>, f: F) -> Self
    where
        F: Fn(bool, bool) -> bool + Send + Sync + 'static,
    {
        Self::from_node(PredicateNode::Combine {
            left,
            right,
            f: Arc::new(f),
        })
    }
}

impl<T: 'static> Predicate<T> {
    /// Logical conjunction, evaluating both sides
    pub fn and(&self, other: &Predicate<T>) -> Self {
        Self::combine(self.clone(), other.clone(), |a, b| a & b)
    }

    /// Logical disjunction, evaluating both sides
    pub fn or(&self, other: &Predicate<T>) -> Self {
        Self::combine(self.clone(), other.clone(), |a, b| a | b)
    }

    /// Logical equivalence
    pub fn eq(&self, other: &Predicate<T>) -> Self {
        Self::combine(self.clone(), other.clone(), |a, b| a == b)
    }

    /// Exclusive or
    pub fn ne(&self, other: &Predicate<T>) -> Self {
        Self::combine(self.clone(), other.clone(), |a, b| a != b)
    }
}

impl<T> Predicate<T> {
    /// Get the kind of the root node
    pub fn kind(&self) -> PredicateKind {
        match self.node.as_ref() {
            PredicateNode::Compare { .. } => PredicateKind::Compare,
            PredicateNode::CompareUnary { .. } => PredicateKind::CompareUnary,
            PredicateNode::Modify { .. } => PredicateKind::Modify,
            PredicateNode::Combine { .. } => PredicateKind::Combine,
        }
    }

    /// Check whether two handles refer to the same node
    pub fn ptr_eq(&self, other: &Predicate<T>) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl<T: Clone> Predicate<T> {
    /// Evaluate the predicate against a single input vector
    pub fn evaluate(&self, input: &[T]) -> EvalResult<bool> {
        match self.node.as_ref() {
            PredicateNode::Compare { a, b, cmp } => {
                let lhs = a.evaluate(input)?;
                let rhs = b.evaluate(input)?;
                Ok(cmp(lhs, rhs))
            }
            PredicateNode::CompareUnary { a, cmp } => Ok(cmp(a.evaluate(input)?)),
            PredicateNode::Modify { child, f } => Ok(f(child.evaluate(input)?)),
            PredicateNode::Combine { left, right, f } => {
                let lhs = left.evaluate(input)?;
                let rhs = right.evaluate(input)?;
                Ok(f(lhs, rhs))
            }
        }
    }

    /// Evaluate the predicate against each input vector, preserving order
    pub fn evaluate_batch<V>(&self, inputs: &[V]) -> EvalResult<Vec<bool>>
    where
        T: Send + Sync,
        V: AsRef<[T]> + Sync,
    {
        batch::map_rows(inputs, |input| self.evaluate(input))
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.as_ref() {
            PredicateNode::Compare { a, b, .. } => f
                .debug_struct("Compare")
                .field("a", a)
                .field("b", b)
                .finish_non_exhaustive(),
            PredicateNode::CompareUnary { a, .. } => f
                .debug_struct("CompareUnary")
                .field("a", a)
                .finish_non_exhaustive(),
            PredicateNode::Modify { child, .. } => f
                .debug_struct("Modify")
                .field("child", child)
                .finish_non_exhaustive(),
            PredicateNode::Combine { left, right, .. } => f
                .debug_struct("Combine")
                .field("left", left)
                .field("right", right)
                .finish_non_exhaustive(),
        }
    }
}

impl<T: 'static> Not for Predicate<T> {
    type Output = Predicate<T>;

    fn not(self) -> Predicate<T> {
        Predicate::modify(self, |b| !b)
    }
}

impl<T: 'static> Not for &Predicate<T> {
    type Output = Predicate<T>;

    fn not(self) -> Predicate<T> {
        !self.clone()
    }
}

macro_rules! impl_predicate_ops {
    ($($trait:ident, $method:ident, $op:tt;)*) => {$(
        impl<T: 'static> $trait for Predicate<T> {
            type Output = Predicate<T>;

            fn $method(self, rhs: Predicate<T>) -> Predicate<T> {
                Predicate::combine(self, rhs, |a, b| a $op b)
            }
        }

        impl<T: 'static> $trait<&Predicate<T>> for Predicate<T> {
            type Output = Predicate<T>;

            fn $method(self, rhs: &Predicate<T>) -> Predicate<T> {
                self $op rhs.clone()
            }
        }

        impl<T: 'static> $trait<Predicate<T>> for &Predicate<T> {
            type Output = Predicate<T>;

            fn $method(self, rhs: Predicate<T>) -> Predicate<T> {
                self.clone() $op rhs
            }
        }

        impl<T: 'static> $trait<&Predicate<T>> for &Predicate<T> {
            type Output = Predicate<T>;

            fn $method(self, rhs: &Predicate<T>) -> Predicate<T> {
                self.clone() $op rhs.clone()
            }
        }
    )*};
}

impl_predicate_ops! {
    BitAnd, bitand, &;
    BitOr, bitor, |;
    BitXor, bitxor, ^;
}

/// One side of a relation: a term or a raw constant
#[derive(Debug, Clone)]
pub enum Operand<T> {
    Term(Term<T>),
    Constant(T),
}

/// Conversion into a relation operand
pub trait IntoOperand<T> {
    fn into_operand(self) -> Operand<T>;
}

impl<T> IntoOperand<T> for Operand<T> {
    fn into_operand(self) -> Operand<T> {
        self
    }
}

impl<T> IntoOperand<T> for Term<T> {
    fn into_operand(self) -> Operand<T> {
        Operand::Term(self)
    }
}

impl<T> IntoOperand<T> for &Term<T> {
    fn into_operand(self) -> Operand<T> {
        Operand::Term(self.clone())
    }
}

macro_rules! impl_scalar_operand {
    ($($scalar:ty),* $(,)?) => {$(
        impl IntoOperand<$scalar> for $scalar {
            fn into_operand(self) -> Operand<$scalar> {
                Operand::Constant(self)
            }
        }
    )*};
}

impl_scalar_operand!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Build a relation node, capturing constants in the comparison closure
fn relate<T, A, B>(a: A, b: B, cmp: fn(&T, &T) -> bool) -> Predicate<T>
where
    T: Send + Sync + 'static,
    A: IntoOperand<T>,
    B: IntoOperand<T>,
{
    match (a.into_operand(), b.into_operand()) {
        (Operand::Term(a), Operand::Term(b)) => {
            Predicate::compare(a, b, move |x, y| cmp(&x, &y))
        }
        (Operand::Term(a), Operand::Constant(c)) => {
            Predicate::compare_unary(a, move |x| cmp(&x, &c))
        }
        (Operand::Constant(c), Operand::Term(b)) => {
            Predicate::compare_unary(b, move |y| cmp(&c, &y))
        }
        (Operand::Constant(a), Operand::Constant(b)) => Predicate::compare(
            Term::constant(a),
            Term::constant(b),
            move |x, y| cmp(&x, &y),
        ),
    }
}

/// `a < b`
pub fn lt<T, A, B>(a: A, b: B) -> Predicate<T>
where
    T: PartialOrd + Send + Sync + 'static,
    A: IntoOperand<T>,
    B: IntoOperand<T>,
{
    relate(a, b, |x: &T, y: &T| x < y)
}

/// `a <= b`
pub fn le<T, A, B>(a: A, b: B) -> Predicate<T>
where
    T: PartialOrd + Send + Sync + 'static,
    A: IntoOperand<T>,
    B: IntoOperand<T>,
{
    relate(a, b, |x: &T, y: &T| x <= y)
}

/// `a > b`
pub fn gt<T, A, B>(a: A, b: B) -> Predicate<T>
where
    T: PartialOrd + Send + Sync + 'static,
    A: IntoOperand<T>,
    B: IntoOperand<T>,
{
    relate(a, b, |x: &T, y: &T| x > y)
}

/// `a >= b`
pub fn ge<T, A, B>(a: A, b: B) -> Predicate<T>
where
    T: PartialOrd + Send + Sync + 'static,
    A: IntoOperand<T>,
    B: IntoOperand<T>,
{
    relate(a, b, |x: &T, y: &T| x >= y)
}

/// `a == b`, exact `PartialEq` equality
pub fn eq<T, A, B>(a: A, b: B) -> Predicate<T>
where
    T: PartialEq + Send + Sync + 'static,
    A: IntoOperand<T>,
    B: IntoOperand<T>,
{
    relate(a, b, |x: &T, y: &T| x == y)
}

/// `a != b`
pub fn ne<T, A, B>(a: A, b: B) -> Predicate<T>
where
    T: PartialEq + Send + Sync + 'static,
    A: IntoOperand<T>,
    B: IntoOperand<T>,
{
    relate(a, b, |x: &T, y: &T| x != y)
}

impl<T> Term<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    /// Predicate `self < rhs`
    pub fn lt(&self, rhs: impl IntoOperand<T>) -> Predicate<T> {
        lt(self, rhs)
    }

    /// Predicate `self <= rhs`
    pub fn le(&self, rhs: impl IntoOperand<T>) -> Predicate<T> {
        le(self, rhs)
    }

    /// Predicate `self > rhs`
    pub fn gt(&self, rhs: impl IntoOperand<T>) -> Predicate<T> {
        gt(self, rhs)
    }

    /// Predicate `self >= rhs`
    pub fn ge(&self, rhs: impl IntoOperand<T>) -> Predicate<T> {
        ge(self, rhs)
    }
}

impl<T> Term<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    /// Predicate `self == rhs`
    pub fn eq(&self, rhs: impl IntoOperand<T>) -> Predicate<T> {
        eq(self, rhs)
    }

    /// Predicate `self != rhs`
    pub fn ne(&self, rhs: impl IntoOperand<T>) -> Predicate<T> {
        ne(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn x() -> Term<f64> {
        Term::variable(0)
    }

    fn y() -> Term<f64> {
        Term::variable(1)
    }

    #[test]
    fn test_relation_kinds() {
        assert_eq!(x().lt(y()).kind(), PredicateKind::Compare);
        assert_eq!(x().lt(1.0).kind(), PredicateKind::CompareUnary);
        assert_eq!(gt(1.0, &x()).kind(), PredicateKind::CompareUnary);
        assert_eq!(eq(1.0_f64, 1.0).kind(), PredicateKind::Compare);
    }

    #[test]
    fn test_term_relations() {
        let input = [1.0, 2.0];
        assert!(x().lt(y()).evaluate(&input).unwrap());
        assert!(x().le(y()).evaluate(&input).unwrap());
        assert!(!x().gt(y()).evaluate(&input).unwrap());
        assert!(!x().ge(y()).evaluate(&input).unwrap());
        assert!(!x().eq(y()).evaluate(&input).unwrap());
        assert!(x().ne(y()).evaluate(&input).unwrap());
    }

    #[test]
    fn test_constant_on_either_side() {
        let input = [5.0];
        assert!(x().gt(4.0).evaluate(&input).unwrap());
        assert!(!gt(4.0, x()).evaluate(&input).unwrap());
        assert!(le(5.0, &x()).evaluate(&input).unwrap());
        assert!(eq(x(), 5.0).evaluate(&input).unwrap());
        assert!(!ne(3.0_f64, 3.0).evaluate(&[]).unwrap());
    }

    #[test]
    fn test_boolean_combinators() {
        let t = x().gt(0.0);
        let f = x().lt(0.0);
        let input = [1.0];

        assert!(!(!&t).evaluate(&input).unwrap());
        assert!(!(&t & &f).evaluate(&input).unwrap());
        assert!((&t | &f).evaluate(&input).unwrap());
        assert!((&t ^ &f).evaluate(&input).unwrap());
        assert!(!t.eq(&f).evaluate(&input).unwrap());
        assert!(t.ne(&f).evaluate(&input).unwrap());
        assert!(t.and(&t).evaluate(&input).unwrap());
        assert!(f.or(&t).evaluate(&input).unwrap());
        assert_eq!((!t).kind(), PredicateKind::Modify);
    }

    #[test]
    fn test_combinators_do_not_short_circuit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counted = x()
            .map(move |v| {
                counter.fetch_add(1, Ordering::SeqCst);
                v
            })
            .gt(0.0);
        let never = x().lt(0.0);
        let always = x().gt(0.0);

        assert!(!(never.clone() & counted.clone()).evaluate(&[1.0]).unwrap());
        assert!((always | counted).evaluate(&[1.0]).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_error_in_either_operand_propagates() {
        let ok = x().gt(0.0);
        let bad = Term::<f64>::variable(3).gt(0.0);
        let expected = Err(EvalError::IndexOutOfRange { index: 3, len: 1 });

        assert_eq!((ok.clone() | bad.clone()).evaluate(&[1.0]), expected);
        assert_eq!((bad & ok).evaluate(&[1.0]), expected);
    }

    #[test]
    fn test_evaluate_batch() {
        let p = x().ge(2.0);
        let rows = vec![vec![1.0], vec![2.0], vec![3.0]];
        assert_eq!(p.evaluate_batch(&rows).unwrap(), vec![false, true, true]);
    }

    #[test]
    fn test_debug_output() {
        let p = !Term::<i32>::variable(0).lt(Term::constant(1));
        assert_eq!(
            format!("{:?}", p),
            "Modify { child: Compare { a: Variable(0), b: Constant(1), .. }, .. }"
        );
    }
}
