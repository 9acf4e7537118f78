//! Quizr - a timed quiz in the terminal

use clap::Parser;
use quizr::cli::{self, Args};
use quizr::common::logging;

#[tokio::main]
async fn main() {
    logging::init_cli();

    let args = Args::parse();

    if let Err(e) = cli::run(args).await {
        if let Some(message) = e.public() {
            tracing::debug!("Load failed: {}", e);
            println!("{}", message);
            std::process::exit(1);
        }

        // Anything else is a bug, show all of it
        tracing::error!("Unexpected failure: {}", e);
        eprintln!("Error: {:?}", e);
        std::process::exit(2);
    }
}
