//! Error types for the demo

use thiserror::Error;

/// Errors raised while loading inputs or evaluating features
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// An input vector lacks one of the bounding box slots
    #[error("Input {row} has {len} values, expected at least {required}")]
    InputTooShort {
        row: usize,
        len: usize,
        required: usize,
    },

    #[error("Evaluation error: {0}")]
    Eval(#[from] term_logic::EvalError),
}

pub type Result<T> = std::result::Result<T, DemoError>;
