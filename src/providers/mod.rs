//! Music providers - search external services for something to play.
//!
//! # Architecture
//!
//! Each provider follows the same split:
//! - **DTOs** (`spotify/dto.rs`, `youtube/dto.rs`) - exact API response shapes
//! - **Adapters** - convert DTOs into our [`Track`]
//! - **Clients** - build requests and send them through the shared
//!   [`ResilientFetcher`](crate::fetch::ResilientFetcher)
//!
//! The orchestrator only sees the [`MusicProvider`] trait (`traits.rs`), which
//! turns every client error into [`QueryResult::Failure`].

pub mod spotify;
pub mod traits;
pub mod youtube;

use std::fmt;

use crate::fetch::FetchError;

pub use spotify::{SpotifyProvider, SpotifySession};
pub use traits::MusicProvider;
pub use youtube::YouTubeProvider;

/// Which service a track came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Spotify,
    YouTube,
}

impl ProviderKind {
    /// Bounding box (pixels) used when displaying this provider's artwork.
    pub fn artwork_display_size(self) -> u32 {
        match self {
            ProviderKind::Spotify => 200,
            ProviderKind::YouTube => 180,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Spotify => f.write_str("Spotify"),
            ProviderKind::YouTube => f.write_str("YouTube"),
        }
    }
}

/// Something playable returned by a provider search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Provider-specific identifier (Spotify track ID, YouTube video ID)
    pub id: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    /// URL that opens the track in a player or browser
    pub playable_url: String,
    /// Album art or video thumbnail
    pub artwork_url: Option<String>,
    pub source: ProviderKind,
}

impl Track {
    /// "Title - Artist" for display, falling back to the ID.
    pub fn display_name(&self) -> String {
        match (&self.title, &self.artist) {
            (Some(title), Some(artist)) => format!("{} - {}", title, artist),
            (Some(title), None) => title.clone(),
            _ => self.id.clone(),
        }
    }
}

/// Errors a provider can report. Never escapes the pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("{0} is not configured")]
    NotConfigured(ProviderKind),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(FetchError),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<FetchError> for ProviderError {
    fn from(error: FetchError) -> Self {
        if let FetchError::Status {
            status: 401 | 403, ..
        } = error
        {
            return ProviderError::Auth(error.to_string());
        }
        match error {
            FetchError::Decode(message) => ProviderError::InvalidResponse(message),
            other => ProviderError::Network(other),
        }
    }
}

/// Outcome of one provider search.
///
/// `Empty` and `Failure` both mean "this provider could not help" but are kept
/// apart for logging and reporting.
#[derive(Debug, Clone)]
pub enum QueryResult {
    /// At least one track, in provider order
    Tracks(Vec<Track>),
    /// The search worked but matched nothing
    Empty,
    /// The provider or the network failed
    Failure(ProviderError),
}

impl QueryResult {
    /// Wrap a track list, mapping an empty list to [`QueryResult::Empty`].
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        if tracks.is_empty() {
            QueryResult::Empty
        } else {
            QueryResult::Tracks(tracks)
        }
    }

    #[cfg(test)]
    pub fn is_failure(&self) -> bool {
        matches!(self, QueryResult::Failure(_))
    }
}

impl From<Result<Vec<Track>, ProviderError>> for QueryResult {
    fn from(result: Result<Vec<Track>, ProviderError>) -> Self {
        match result {
            Ok(tracks) => QueryResult::from_tracks(tracks),
            Err(e) => QueryResult::Failure(e),
        }
    }
}
