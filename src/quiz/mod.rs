//! The quiz itself: problems, the runner that asks them, the session that
//! enforces the time limit and the final report

pub mod problem;
pub mod report;
pub mod runner;
pub mod session;
pub mod term;

pub use problem::Problem;
pub use report::Report;
pub use runner::{Outcome, Runner};
pub use session::{Game, TerminalState};
