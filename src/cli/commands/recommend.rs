//! Recommendation command: run the pipeline and present the outcome.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::artwork::ArtworkResolver;
use crate::config::{Config, Credentials};
use crate::error::{Error, Result, ResultExt};
use crate::fetch::ResilientFetcher;
use crate::mood::Mood;
use crate::providers::spotify::TOKEN_URL;
use crate::providers::{SpotifyProvider, SpotifySession, YouTubeProvider};
use crate::recommend::{Recommender, ResolutionOutcome};

/// Everything `recommend` needs once flags, env and config are merged.
#[derive(Debug, Clone)]
pub struct RecommendOptions {
    pub mood: Option<String>,
    pub open: bool,
    pub save_artwork: Option<PathBuf>,
    pub seed: Option<u64>,
    pub credentials: Credentials,
}

/// Resolve a mood and present the result.
///
/// Every pipeline outcome, including "nothing found", is a successful run.
/// Only local plumbing (HTTP client setup, writing artwork) can fail.
pub fn cmd_recommend(
    rt: &Runtime,
    config: &Config,
    options: &RecommendOptions,
) -> anyhow::Result<()> {
    let mood = Mood::detected_or_fallback(options.mood.clone().ok_or("no mood given"));

    let outcome = rt.block_on(async {
        let recommender = build_recommender(config, &options.credentials).await?;
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok::<_, Error>(recommender.recommend(&mood, &mut rng).await)
    })?;

    println!("{}", describe_outcome(&mood, &outcome));

    if let Some(url) = outcome.playable_url().filter(|_| options.open) {
        open_in_browser(url);
    }

    if let Some(path) = &options.save_artwork {
        if save_artwork(&outcome, path)? {
            println!("  Artwork saved to {}", path.display());
        } else {
            println!("  No artwork to save");
        }
    }

    Ok(())
}

async fn build_recommender(config: &Config, credentials: &Credentials) -> Result<Recommender> {
    let fetcher = ResilientFetcher::http(config.network.retry_policy())
        .map_err(|e| Error::from(e).context("building HTTP client"))?;

    let session = match connect_spotify(&fetcher, credentials).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("{}", e);
            None
        }
    };

    let spotify = SpotifyProvider::new(fetcher.clone(), session);
    if !spotify.is_configured() {
        tracing::warn!("Spotify credentials missing, only YouTube will be searched");
    }
    let youtube = YouTubeProvider::new(fetcher.clone(), credentials.youtube_api_key.clone());
    if !youtube.is_configured() {
        tracing::warn!("YouTube API key missing, there is no fallback provider");
    }

    Ok(Recommender::new(
        Arc::new(spotify),
        Arc::new(youtube),
        ArtworkResolver::new(fetcher),
    )
    .with_limits(config.search.limits()))
}

/// Establish a Spotify session from the available credentials.
///
/// A configured access token wins over the client-credentials grant.
/// `Ok(None)` means nothing usable is configured.
async fn connect_spotify(
    fetcher: &ResilientFetcher,
    credentials: &Credentials,
) -> Result<Option<SpotifySession>> {
    if let Some(token) = non_blank(credentials.spotify_access_token.as_deref()) {
        return Ok(Some(SpotifySession::from_token(token)));
    }

    let (Some(client_id), Some(client_secret)) = (
        non_blank(credentials.spotify_client_id.as_deref()),
        non_blank(credentials.spotify_client_secret.as_deref()),
    ) else {
        return Ok(None);
    };

    let session = SpotifySession::client_credentials(fetcher, TOKEN_URL, client_id, client_secret)
        .await
        .map_err(|e| Error::from(e).context("Spotify client-credentials grant failed"))?;
    Ok(Some(session))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Human-readable summary of the outcome.
fn describe_outcome(mood: &Mood, outcome: &ResolutionOutcome) -> String {
    let Some(track) = outcome.track() else {
        return format!(
            "✗ No '{}' music found for mood '{}' on any provider",
            outcome.genre(),
            mood
        );
    };

    let mut lines = vec![
        format!("✓ {} ({} via {})", track.display_name(), outcome.genre(), track.source),
        format!("  {}", track.playable_url),
    ];

    match outcome {
        ResolutionOutcome::Resolved {
            artwork: Some(artwork),
            ..
        } => lines.push(format!(
            "  Artwork: {}x{} {}",
            artwork.width, artwork.height, artwork.mime_type
        )),
        ResolutionOutcome::PartialSuccess { artwork_error, .. } => {
            lines.push(format!("  Artwork unavailable: {}", artwork_error))
        }
        _ => {}
    }

    lines.join("\n")
}

fn open_in_browser(url: &str) {
    if let Err(e) = webbrowser::open(url) {
        tracing::warn!("Could not open browser: {}", e);
        println!("  Open it yourself: {}", url);
    }
}

/// Write a display-sized PNG of the outcome's artwork.
///
/// Returns `false` when there was no artwork to write.
fn save_artwork(outcome: &ResolutionOutcome, path: &Path) -> Result<bool> {
    let (Some(track), Some(artwork)) = (outcome.track(), outcome.artwork()) else {
        return Ok(false);
    };

    let png = artwork
        .thumbnail_png(track.source.artwork_display_size())
        .with_context(format!("preparing artwork from {}", artwork.url))?;
    std::fs::write(path, png).with_context(format!("writing {}", path.display()))?;
    Ok(true)
}
