//! Quiz runner - asks each question and reports how it went
//!
//! The runner knows nothing about the time limit. It runs on its own thread,
//! blocks on one line of input per problem and hands an [`Outcome`] to the
//! session for every answer. When the session stops listening, the next
//! send fails and the runner returns; if it is still blocked on input at
//! that point it simply stays there until the process exits.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;

use super::problem::Problem;
use super::report::{digit_width, question_label};
use super::term;

/// Message from the runner to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A problem was answered; `input` is the raw line without its terminator
    Answered { correct: bool, input: String },
    /// Every problem has been asked
    Exhausted,
}

/// Drives the prompt/answer cycle over a list of problems
pub struct Runner<R, W> {
    problems: Arc<[Problem]>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Runner<R, W> {
    pub fn new(problems: Arc<[Problem]>, input: R, output: W) -> Self {
        Self {
            problems,
            input,
            output,
        }
    }

    /// Ask every problem in order, sending one outcome per answer
    ///
    /// Returns the output writer once the problems are exhausted or the
    /// receiving side has gone away.
    pub fn run(mut self, outcomes: mpsc::Sender<Outcome>) -> W {
        let problems = Arc::clone(&self.problems);
        let width = digit_width(problems.len() as i64);

        for (index, problem) in problems.iter().enumerate() {
            self.prompt(index, width, problem);
            let input = self.read_answer();
            let correct = problem.is_answered_by(&input);
            tracing::debug!(index, correct, "Answer received");

            if outcomes
                .blocking_send(Outcome::Answered { correct, input })
                .is_err()
            {
                tracing::debug!(index, "Session no longer listening, runner stopping");
                return self.output;
            }
        }

        if outcomes.blocking_send(Outcome::Exhausted).is_err() {
            tracing::debug!("Session already closed, skipping end signal");
        }
        self.output
    }

    fn prompt(&mut self, index: usize, width: usize, problem: &Problem) {
        let reset = if index == 0 { "" } else { term::CLEAR_PREV_LINE };
        let written = write!(
            self.output,
            "{}{} {}: ",
            reset,
            question_label(index, width),
            problem.question()
        )
        .and_then(|_| self.output.flush());

        if let Err(e) = written {
            tracing::warn!("Failed to write prompt: {}", e);
        }
    }

    /// Read one line; read failures count as an empty answer
    fn read_answer(&mut self) -> String {
        let mut line = String::new();
        if let Err(e) = self.input.read_line(&mut line) {
            tracing::warn!("Failed to read answer: {}", e);
            line.clear();
        }
        let len = line.trim_end_matches(|c: char| c == '\r' || c == '\n').len();
        line.truncate(len);
        line
    }
}

impl<R, W> Runner<R, W>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    /// Run on a dedicated thread
    ///
    /// The handle may be dropped to detach the thread.
    pub fn spawn(self, outcomes: mpsc::Sender<Outcome>) -> io::Result<JoinHandle<W>> {
        thread::Builder::new()
            .name("quiz-runner".to_string())
            .spawn(move || self.run(outcomes))
    }
}
