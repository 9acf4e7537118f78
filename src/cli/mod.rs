//! Command-line arguments and the top-level quiz flow

use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::common::config::{parse_duration, Config, QuizDefaults};
use crate::common::Result;
use crate::quiz::Game;

#[derive(Parser, Debug)]
#[command(name = "quizr", about = "Timed quiz in the terminal")]
#[command(version, long_about = None)]
pub struct Args {
    /// A CSV file of questions and answers in the format `question,answer`
    /// [default: problems.csv]
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Time limit for the quiz, e.g. 30s or 1m30s [default: 30s]
    #[arg(long, value_parser = parse_duration)]
    pub limit: Option<Duration>,

    /// Shuffle the questions before starting
    #[arg(long, overrides_with = "no_shuffle")]
    pub shuffle: bool,

    /// Keep the file order even if the config file asks for shuffling
    #[arg(long, overrides_with = "shuffle")]
    pub no_shuffle: bool,
}

/// Effective settings after merging flags over the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub csv: PathBuf,
    pub limit: Duration,
    pub shuffle: bool,
}

impl Args {
    pub fn settings(&self, defaults: &QuizDefaults) -> Settings {
        Settings {
            csv: self.csv.clone().unwrap_or_else(|| defaults.csv.clone()),
            limit: self.limit.unwrap_or(defaults.limit),
            shuffle: !self.no_shuffle && (self.shuffle || defaults.shuffle),
        }
    }
}

/// Load the quiz, play it on stdin/stdout and print the report
pub async fn run(args: Args) -> Result<()> {
    let config = Config::load()?;
    let settings = args.settings(&config.quiz);
    tracing::debug!(?settings, "Resolved settings");

    let mut game = Game::load(&settings.csv, settings.limit, settings.shuffle)?;

    // The runner gets an unlocked stdout handle so the report can still
    // write while an abandoned runner sits blocked on stdin
    let state = game.run(BufReader::new(io::stdin()), io::stdout()).await?;
    tracing::debug!(?state, score = game.score(), "Quiz finished");

    game.finalize(&mut io::stdout().lock())
}
