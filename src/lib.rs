//! Quizr - a timed quiz in the terminal
//!
//! Questions are loaded from a two-column CSV file and asked one at a time
//! while a timer runs in the background. When either the questions or the
//! time run out, a side-by-side report of expected and given answers is
//! printed.

pub mod cli;
pub mod common;
pub mod quiz;

// Re-export commonly used types for tests
pub use common::{Error, LoadErrorKind, Result};
pub use quiz::{Game, Problem, TerminalState};
