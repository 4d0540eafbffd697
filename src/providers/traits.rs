//! The provider capability seen by the orchestrator.
//!
//! Both real providers implement [`MusicProvider`]; tests substitute the
//! mocks below.
//!
//! # Example
//!
//! ```ignore
//! use crate::providers::traits::MusicProvider;
//!
//! async fn first_hit(provider: &dyn MusicProvider, genre: &Genre) -> Option<Track> {
//!     match provider.search(genre, 1).await {
//!         QueryResult::Tracks(tracks) => tracks.into_iter().next(),
//!         QueryResult::Empty | QueryResult::Failure(_) => None,
//!     }
//! }
//! ```

use async_trait::async_trait;

use super::{ProviderKind, QueryResult, SpotifyProvider, YouTubeProvider};
use crate::mood::Genre;

/// Search capability shared by the primary and secondary providers.
///
/// `search` never fails outright: every error is reported as
/// [`QueryResult::Failure`].
#[async_trait]
pub trait MusicProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Search for up to `limit` tracks matching `genre`.
    async fn search(&self, genre: &Genre, limit: usize) -> QueryResult;
}

// Implement the trait for the real clients

#[async_trait]
impl MusicProvider for SpotifyProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Spotify
    }

    async fn search(&self, genre: &Genre, limit: usize) -> QueryResult {
        self.search_tracks(genre, limit).await.into()
    }
}

#[async_trait]
impl MusicProvider for YouTubeProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::YouTube
    }

    async fn search(&self, genre: &Genre, limit: usize) -> QueryResult {
        self.search_videos(genre, limit).await.into()
    }
}
