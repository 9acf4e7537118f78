//! Error types for quizr
//!
//! Only load errors are considered public: they carry a short explanation
//! meant for the person at the terminal. Everything else is a defect and is
//! reported with its full internal detail.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// The closed set of ways loading a quiz file can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// The file could not be opened
    PathInvalid,
    /// The contents could not be decoded as CSV
    NotCsv,
    /// The first record did not have exactly two columns
    ColumnCount,
}

/// Main error type for quizr
#[derive(Error, Debug)]
pub enum Error {
    // === Load Errors ===
    #[error("quizr: csv path invalid: {}", path.display())]
    CsvPath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("quizr: couldn't parse as csv file: {0}")]
    NotCsv(#[source] csv::Error),

    #[error("quizr: csv format incorrect: got {columns} columns, expected 2")]
    CsvFormat { columns: usize },

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a path error for a quiz file that could not be opened
    pub fn csv_path(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CsvPath {
            path: path.into(),
            source,
        }
    }

    /// Which load failure this is, if it is one
    pub fn load_kind(&self) -> Option<LoadErrorKind> {
        match self {
            Error::CsvPath { .. } => Some(LoadErrorKind::PathInvalid),
            Error::NotCsv(_) => Some(LoadErrorKind::NotCsv),
            Error::CsvFormat { .. } => Some(LoadErrorKind::ColumnCount),
            _ => None,
        }
    }

    /// User-facing explanation, present only for public (load) errors
    pub fn public(&self) -> Option<String> {
        match self {
            Error::CsvPath { path, .. } => Some(format!(
                "Couldn't open `{}`, is this a valid filepath?",
                path.display()
            )),
            Error::NotCsv(_) => Some("This doesn't seem to be a csv file...".to_string()),
            Error::CsvFormat { columns } => Some(format!(
                "This csv files seems to be formatted incorrectly. There should be two columns, not {}",
                columns
            )),
            _ => None,
        }
    }
}
