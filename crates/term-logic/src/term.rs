//! Numeric expression trees
//!
//! A [`Term`] is an immutable node evaluated against a positional input
//! vector. Leaves are constants and variable references; interior nodes apply
//! a stored function to the results of one or two child terms.

use std::fmt;
use std::sync::Arc;

use crate::batch;
use crate::error::{EvalError, EvalResult};

pub(crate) type UnaryFn<T> = Arc<dyn Fn(T) -> T + Send + Sync>;
pub(crate) type BinaryFn<T> = Arc<dyn Fn(T, T) -> T + Send + Sync>;

/// The kind of a term node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// Fixed value, independent of the input
    Constant,
    /// Reference to a position in the input vector
    Variable,
    /// Function applied to one child term
    Unary,
    /// Function applied to two child terms
    Binary,
}

enum TermNode<T> {
    Constant(T),
    Variable(usize),
    Unary {
        child: Term<T>,
        f: UnaryFn<T>,
    },
    Binary {
        left: Term<T>,
        right: Term<T>,
        f: BinaryFn<T>,
    },
}

/// A numeric expression over an input vector
///
/// Cloning a term is cheap and yields a handle to the same node. Composing
/// terms always creates new nodes that share the operands.
pub struct Term<T> {
    node: Arc<TermNode<T>>,
}

impl<T> Term<T> {
    fn from_node(node: TermNode<T>) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// Create a term that always yields `value`
    pub fn constant(value: T) -> Self {
        Self::from_node(TermNode::Constant(value))
    }

    /// Create a term that yields `input[index]`
    ///
    /// The index is checked against the input at evaluation time.
    pub fn variable(index: usize) -> Self {
        Self::from_node(TermNode::Variable(index))
    }

    /// Create a term that applies `f` to the value of `child`
    pub fn unary<F>(child: Term<T>, f: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self::from_node(TermNode::Unary {
            child,
            f: Arc::new(f),
        })
    }

    /// Create a term that combines the values of `left` and `right` with `f`
    pub fn binary<F>(left: Term<T>, right: Term<T>, f: F) -> Self
    where
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        Self::from_node(TermNode::Binary {
            left,
            right,
            f: Arc::new(f),
        })
    }

    /// Wrap this term in a unary modifier
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self::unary(self.clone(), f)
    }

    /// Combine this term with `other` through `f`
    pub fn combine<F>(&self, other: &Term<T>, f: F) -> Self
    where
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        Self::binary(self.clone(), other.clone(), f)
    }

    /// Wrap this term in an identity modifier (unary plus)
    pub fn identity(&self) -> Self
    where
        T: 'static,
    {
        self.map(|value| value)
    }

    /// Get the kind of the root node
    pub fn kind(&self) -> TermKind {
        match self.node.as_ref() {
            TermNode::Constant(_) => TermKind::Constant,
            TermNode::Variable(_) => TermKind::Variable,
            TermNode::Unary { .. } => TermKind::Unary,
            TermNode::Binary { .. } => TermKind::Binary,
        }
    }

    /// Get the referenced position if this is a variable
    pub fn variable_index(&self) -> Option<usize> {
        match self.node.as_ref() {
            TermNode::Variable(index) => Some(*index),
            _ => None,
        }
    }

    /// Get the value if this is a constant
    pub fn constant_value(&self) -> Option<&T> {
        match self.node.as_ref() {
            TermNode::Constant(value) => Some(value),
            _ => None,
        }
    }

    /// Check whether two handles refer to the same node
    pub fn ptr_eq(&self, other: &Term<T>) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl<T: Clone> Term<T> {
    /// Evaluate the term against a single input vector
    pub fn evaluate(&self, input: &[T]) -> EvalResult<T> {
        match self.node.as_ref() {
            TermNode::Constant(value) => Ok(value.clone()),

            TermNode::Variable(index) => input.get(*index).cloned().ok_or_else(|| {
                tracing::trace!(index, len = input.len(), "variable out of range");
                EvalError::IndexOutOfRange {
                    index: *index,
                    len: input.len(),
                }
            }),

            TermNode::Unary { child, f } => Ok(f(child.evaluate(input)?)),

            TermNode::Binary { left, right, f } => {
                let lhs = left.evaluate(input)?;
                let rhs = right.evaluate(input)?;
                Ok(f(lhs, rhs))
            }
        }
    }

    /// Evaluate the term against each input vector, preserving order
    pub fn evaluate_batch<V>(&self, inputs: &[V]) -> EvalResult<Vec<T>>
    where
        T: Send + Sync,
        V: AsRef<[T]> + Sync,
    {
        batch::map_rows(inputs, |input| self.evaluate(input))
    }
}

impl<T> Clone for Term<T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Term<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.as_ref() {
            TermNode::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            TermNode::Variable(index) => f.debug_tuple("Variable").field(index).finish(),
            TermNode::Unary { child, .. } => f
                .debug_struct("Unary")
                .field("child", child)
                .finish_non_exhaustive(),
            TermNode::Binary { left, right, .. } => f
                .debug_struct("Binary")
                .field("left", left)
                .field("right", right)
                .finish_non_exhaustive(),
        }
    }
}
