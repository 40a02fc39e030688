//! Error types for term-logic

use thiserror::Error;

/// Evaluation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A variable refers to a position the input vector does not have
    #[error("Variable index {index} out of range for input of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for evaluation
pub type EvalResult<T> = Result<T, EvalError>;
