//! Command-line interface for mood-tune.
//!
//! Resolves a mood to a track (or video) and opens it, plus a few commands
//! for inspecting and creating the config file.

mod commands;

pub use commands::{Cli, Commands, run_command};
