//! Quiz session - races the runner against the time limit
//!
//! The session owns the score, the input log and the terminal state. It is
//! the only place that decides when the quiz is over.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use super::problem::{self, Problem};
use super::report::Report;
use super::runner::{Outcome, Runner};
use crate::common::{Error, Result};

/// Fallback deadline distance when the limit overflows `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    /// Every problem was answered in time
    Completed,
    /// The time limit fired first
    TimedOut,
}

/// One run of the quiz
#[derive(Debug)]
pub struct Game {
    problems: Arc<[Problem]>,
    limit: Duration,
    score: usize,
    inputs: Vec<String>,
    state: Option<TerminalState>,
}

impl Game {
    pub fn new(problems: Vec<Problem>, limit: Duration) -> Self {
        Self {
            problems: problems.into(),
            limit,
            score: 0,
            inputs: Vec::new(),
            state: None,
        }
    }

    /// Load problems from a CSV file, shuffling them once if requested
    pub fn load(path: &Path, limit: Duration, shuffle: bool) -> Result<Self> {
        let mut problems = problem::load(path)?;
        if shuffle {
            problem::shuffle(&mut problems);
        }
        Ok(Self::new(problems, limit))
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Raw answers collected so far, in problem order
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// `None` until [`Game::run`] has returned
    pub fn state(&self) -> Option<TerminalState> {
        self.state
    }

    /// Play the quiz, reading answers from `input` and prompting on `output`
    ///
    /// The runner is started on its own thread. If the time limit fires it
    /// is abandoned, possibly still blocked on `input`; anything it sends
    /// afterwards is dropped.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<TerminalState>
    where
        R: BufRead + Send + 'static,
        W: Write + Send + 'static,
    {
        if self.state.is_some() {
            return Err(Error::Internal("quiz session already finished".to_string()));
        }

        writeln!(output, "Welcome to Quizr!")?;
        output.flush()?;

        if self.problems.is_empty() {
            self.state = Some(TerminalState::Completed);
            return Ok(TerminalState::Completed);
        }

        let now = Instant::now();
        let deadline = now.checked_add(self.limit).unwrap_or(now + FAR_FUTURE);

        // Rendezvous-sized so the runner never gets more than one answer ahead
        let (tx, rx) = mpsc::channel(1);
        // Detached, never joined
        Runner::new(Arc::clone(&self.problems), input, output).spawn(tx)?;

        tracing::debug!(
            problems = self.problems.len(),
            limit_ms = self.limit.as_millis() as u64,
            "Quiz started"
        );

        let state = self.collect_outcomes(rx, deadline).await?;
        self.state = Some(state);
        Ok(state)
    }

    /// Count outcomes until the runner signals the end or `deadline` passes
    ///
    /// Answers arriving at or after the deadline are not counted. If the
    /// deadline fires after the last answer was recorded but before the end
    /// signal arrived, every problem was still answered in time and the
    /// session counts as completed.
    async fn collect_outcomes(
        &mut self,
        mut outcomes: mpsc::Receiver<Outcome>,
        deadline: Instant,
    ) -> Result<TerminalState> {
        let timer = tokio::time::sleep_until(deadline);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                biased;
                _ = &mut timer => {
                    tracing::debug!(answered = self.inputs.len(), "Time limit reached");
                    return Ok(self.state_at_deadline());
                }
                outcome = outcomes.recv() => match outcome {
                    Some(Outcome::Answered { correct, input }) => {
                        if Instant::now() >= deadline {
                            tracing::debug!("Answer arrived after the time limit");
                            return Ok(self.state_at_deadline());
                        }
                        self.record(correct, input);
                    }
                    Some(Outcome::Exhausted) => {
                        tracing::debug!(score = self.score, "All problems answered");
                        return Ok(TerminalState::Completed);
                    }
                    None => {
                        return Err(Error::Internal(
                            "quiz runner stopped before finishing".to_string(),
                        ));
                    }
                },
            }
        }
    }

    fn state_at_deadline(&self) -> TerminalState {
        if self.inputs.len() == self.problems.len() {
            TerminalState::Completed
        } else {
            TerminalState::TimedOut
        }
    }

    fn record(&mut self, correct: bool, input: String) {
        if correct {
            self.score += 1;
        }
        self.inputs.push(input);
    }

    /// The final report, available once the session has ended
    pub fn report(&self) -> Option<Report<'_>> {
        self.state.map(|state| Report {
            problems: &self.problems,
            inputs: &self.inputs,
            score: self.score,
            state,
        })
    }

    /// Write the final report
    pub fn finalize<W: Write>(&self, out: &mut W) -> Result<()> {
        let report = self
            .report()
            .ok_or_else(|| Error::Internal("quiz session has not been run".to_string()))?;
        report.write_to(out)?;
        Ok(())
    }
}
