//! # chat-segmenter
//!
//! Splits chat messages into prose and fenced code segments, renders them in the
//! terminal or as JSON, and keeps a local history of chat sessions.

mod cli;
mod core;
mod render;
mod run;

use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;

use crate::run::Outcome;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv().ok();

    let args = cli::Args::parse();
    run::init_logger(&args);

    match run::run(&args) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::NoCodeBlock) => ExitCode::from(1),
        Err(e) => {
            log::debug!("command failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
