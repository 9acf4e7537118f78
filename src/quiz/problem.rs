//! Question/answer pairs and loading them from CSV

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::{Error, Result};

/// One question and its expected answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    question: String,
    answer: String,
}

impl Problem {
    /// Create a problem; the answer is stored trimmed
    pub fn new(question: impl Into<String>, answer: &str) -> Self {
        Self {
            question: question.into(),
            answer: answer.trim().to_string(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Whether `input` answers this problem
    pub fn is_answered_by(&self, input: &str) -> bool {
        answers_match(&self.answer, input)
    }
}

/// Case-insensitive comparison of an expected answer with trimmed input
pub fn answers_match(expected: &str, input: &str) -> bool {
    expected
        .chars()
        .flat_map(char::to_lowercase)
        .eq(input.trim().chars().flat_map(char::to_lowercase))
}

/// Load problems from a two-column CSV file
pub fn load(path: &Path) -> Result<Vec<Problem>> {
    let file = File::open(path).map_err(|e| Error::csv_path(path, e))?;
    let problems = from_reader(file)?;
    tracing::debug!(path = %path.display(), count = problems.len(), "Loaded problems");
    Ok(problems)
}

/// Parse problems from CSV data without a header row
///
/// Every record must have the same length as the first one, and that
/// length must be two.
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Problem>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let records = csv_reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::NotCsv)?;

    records
        .iter()
        .map(|record| {
            if record.len() != 2 {
                return Err(Error::CsvFormat {
                    columns: record.len(),
                });
            }
            Ok(Problem::new(&record[0], &record[1]))
        })
        .collect()
}

/// Shuffle problems in place using the thread-local RNG
pub fn shuffle(problems: &mut [Problem]) {
    shuffle_with(problems, &mut rand::rng());
}

/// Shuffle problems in place with the given RNG
pub fn shuffle_with<R: Rng + ?Sized>(problems: &mut [Problem], rng: &mut R) {
    problems.shuffle(rng);
    tracing::debug!(count = problems.len(), "Shuffled problems");
}
