//! CLI command definitions and dispatch.
//!
//! Each subcommand lives in its own submodule:
//! - `recommend`: run the mood-to-media pipeline and present the result
//! - `setup`: mood table, config inspection and creation

mod recommend;
mod setup;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config, Credentials};

pub use recommend::{RecommendOptions, cmd_recommend};
pub use setup::{cmd_check_config, cmd_init_config, cmd_moods};

/// Mood Tune CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Pick a track (or video) that fits a mood and open it
    Recommend {
        /// Mood label, e.g. "happy" or "calm" (defaults to "neutral")
        mood: Option<String>,
        /// Print the recommendation without opening a browser
        #[arg(long)]
        no_open: bool,
        /// Save a PNG thumbnail of the artwork to this path
        #[arg(long)]
        save_artwork: Option<PathBuf>,
        /// Seed for genre/track selection (reproducible picks)
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// List known moods and their candidate genres
    Moods,
    /// Show the effective configuration and which providers are usable
    CheckConfig {
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// Write a default config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Credential overrides. Flags and environment variables beat the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct CredentialArgs {
    /// Spotify client ID (or set SPOTIFY_CLIENT_ID env var)
    #[arg(long, env = "SPOTIFY_CLIENT_ID")]
    pub spotify_client_id: Option<String>,
    /// Spotify client secret (or set SPOTIFY_CLIENT_SECRET env var)
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub spotify_client_secret: Option<String>,
    /// Spotify access token (or set SPOTIFY_ACCESS_TOKEN env var)
    #[arg(long, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
    pub spotify_token: Option<String>,
    /// YouTube Data API key (or set YOUTUBE_API_KEY env var)
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub youtube_api_key: Option<String>,
}

impl CredentialArgs {
    /// Layer these overrides on top of the configured credentials.
    pub fn merge_into(&self, base: &Credentials) -> Credentials {
        Credentials {
            spotify_client_id: self
                .spotify_client_id
                .clone()
                .or_else(|| base.spotify_client_id.clone()),
            spotify_client_secret: self
                .spotify_client_secret
                .clone()
                .or_else(|| base.spotify_client_secret.clone()),
            spotify_access_token: self
                .spotify_token
                .clone()
                .or_else(|| base.spotify_access_token.clone()),
            youtube_api_key: self
                .youtube_api_key
                .clone()
                .or_else(|| base.youtube_api_key.clone()),
        }
    }
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_ref());

    match &cli.command {
        Commands::Recommend {
            mood,
            no_open,
            save_artwork,
            seed,
            credentials,
        } => {
            let rt = Runtime::new()?;
            let options = RecommendOptions {
                mood: mood.clone(),
                open: config.output.open_in_browser && !*no_open,
                save_artwork: save_artwork.clone(),
                seed: *seed,
                credentials: credentials.merge_into(&config.credentials),
            };
            cmd_recommend(&rt, &config, &options)
        }
        Commands::Moods => {
            cmd_moods();
            Ok(())
        }
        Commands::CheckConfig { credentials } => {
            cmd_check_config(
                cli.config.as_deref(),
                &config,
                &credentials.merge_into(&config.credentials),
            );
            Ok(())
        }
        Commands::InitConfig { force } => cmd_init_config(cli.config.as_deref(), *force),
    }
}

fn load_config(path: Option<&PathBuf>) -> Config {
    match path {
        Some(path) => config::load_from(path),
        None => config::load(),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Render an optional secret for display without revealing it.
pub(crate) fn describe_secret(value: Option<&str>) -> &'static str {
    match value {
        Some(v) if !v.trim().is_empty() => "✓ set",
        _ => "✗ not set",
    }
}
