//! Setup commands: mood table, config inspection and creation.

use std::path::{Path, PathBuf};

use super::describe_secret;
use crate::config::{self, Config, Credentials};
use crate::error::Error;
use crate::mood::{DEFAULT_GENRE, Mood, known_moods};

/// Print every known mood with its candidate genres.
pub fn cmd_moods() {
    println!("Known moods:\n");
    for (mood, genres) in known_moods() {
        println!("  {:<10} {}", mood, genres.join(", "));
    }
    println!(
        "\nAny other mood (and no mood at all, which means '{}') searches '{}'.",
        Mood::FALLBACK,
        DEFAULT_GENRE
    );
}

/// Show the effective configuration.
pub fn cmd_check_config(path: Option<&Path>, config: &Config, credentials: &Credentials) {
    match path.map(Path::to_path_buf).or_else(config::config_path) {
        Some(p) if p.exists() => println!("Config file: {}", p.display()),
        Some(p) => println!("Config file: {} (not found, using defaults)", p.display()),
        None => println!("Config file: unavailable on this platform, using defaults"),
    }

    println!("\nProviders:");
    for line in provider_status(credentials) {
        println!("  {}", line);
    }

    let policy = config.network.retry_policy();
    println!("\nNetwork:");
    println!("  Attempts per request: {}", policy.max_attempts);
    println!("  Timeout per attempt:  {:?}", policy.timeout);
    println!(
        "  Worst-case backoff:   {:.1}s (factor {})",
        policy.total_backoff().as_secs_f64(),
        policy.backoff_factor
    );

    let limits = config.search.limits();
    println!("\nSearch:");
    println!("  Primary results:   {}", limits.primary);
    println!("  Secondary results: {}", limits.secondary);
    println!("\nOpen in browser: {}", config.output.open_in_browser);
}

fn provider_status(credentials: &Credentials) -> Vec<String> {
    let token = describe_secret(credentials.spotify_access_token.as_deref());
    let client_id = describe_secret(credentials.spotify_client_id.as_deref());
    let client_secret = describe_secret(credentials.spotify_client_secret.as_deref());
    let youtube = describe_secret(credentials.youtube_api_key.as_deref());

    vec![
        format!("Spotify access token:  {}", token),
        format!("Spotify client ID:     {}", client_id),
        format!("Spotify client secret: {}", client_secret),
        format!("YouTube API key:       {}", youtube),
    ]
}

/// Write a default config file, refusing to clobber an existing one.
pub fn cmd_init_config(path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let target: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => config::config_path().ok_or(config::ConfigError::NoConfigDir)?,
    };

    if target.exists() && !force {
        println!(
            "✗ {} already exists (use --force to overwrite)",
            target.display()
        );
        return Ok(());
    }

    config::save_to(&target, &Config::default())
        .map_err(|e| Error::from(e).context("writing default config"))?;
    println!("✓ Wrote default config to {}", target.display());
    Ok(())
}
