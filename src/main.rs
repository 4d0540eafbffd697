//! Mood Tune - turn a detected mood into something to listen to.
//!
//! Picks a genre for the mood, searches Spotify for a matching track, falls
//! back to a YouTube video when Spotify has nothing (or is down), and fetches
//! artwork for whatever was found.

pub mod artwork;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod mood;
pub mod providers;
pub mod recommend;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("mood_tune=info".parse()?))
        .init();

    cli::run_command(&args)
}
