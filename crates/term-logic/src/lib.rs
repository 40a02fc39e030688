//! term-logic - Composable terms and logical expressions
//!
//! This crate provides a small embedded language for building numeric
//! expressions over a positional input vector and boolean predicates on top
//! of them:
//!
//! - **Terms**: constants, variable references, unary modifiers and binary
//!   combinations, composed with the usual arithmetic operators
//! - **Logical expressions**: comparisons of terms, combined with `!`, `&`,
//!   `|` and `^`
//! - **Batch evaluation**: one term or predicate over many input vectors, or
//!   many of them at once as an input-major matrix
//!
//! Expression trees are immutable and share their subtrees, so a term can be
//! reused in as many parent expressions as needed. Every evaluation walks the
//! full tree again; nothing is cached.
//!
//! # Examples
//!
//! ```
//! use term_logic::{batch, Term};
//!
//! let min_x = Term::<f64>::variable(0);
//! let size_x = Term::<f64>::variable(1);
//! let center_x = &min_x + &size_x / 2.0;
//! let inside = center_x.gt(10.0) & center_x.lt(20.0);
//!
//! assert_eq!(center_x.evaluate(&[1.0, 21.0])?, 11.5);
//! assert!(inside.evaluate(&[1.0, 21.0])?);
//!
//! let rows = vec![vec![1.0, 21.0], vec![3.0, 5.0]];
//! assert_eq!(batch::substitute(&rows, &[center_x])?, vec![vec![11.5], vec![5.5]]);
//! # Ok::<(), term_logic::EvalError>(())
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluate batch rows with rayon

pub mod batch;
pub mod error;
mod ops;
pub mod predicate;
pub mod term;

pub use error::{EvalError, EvalResult};
pub use predicate::{IntoOperand, Operand, Predicate, PredicateKind};
pub use term::{Term, TermKind};
