//! Spotify Web API search client
//!
//! Searches the catalogue by genre tag (`genre:<name>`, type=track).
//! See: https://developer.spotify.com/documentation/web-api/reference/search

use super::{SpotifySession, adapter, dto};
use crate::fetch::{HttpRequest, ResilientFetcher};
use crate::mood::Genre;
use crate::providers::{ProviderError, ProviderKind, Track};

/// Largest page the search endpoint accepts
const MAX_LIMIT: usize = 50;

/// Primary provider: Spotify track search
pub struct SpotifyProvider {
    fetcher: ResilientFetcher,
    session: Option<SpotifySession>,
    base_url: String,
}

impl SpotifyProvider {
    /// Create a provider. Without a session every search reports
    /// [`ProviderError::NotConfigured`].
    pub fn new(fetcher: ResilientFetcher, session: Option<SpotifySession>) -> Self {
        Self {
            fetcher,
            session,
            base_url: "https://api.spotify.com/v1".to_string(),
        }
    }

    /// Create a provider for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(
        fetcher: ResilientFetcher,
        session: Option<SpotifySession>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            session,
            base_url: base_url.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.session.is_some()
    }

    /// Search tracks tagged with `genre`, at most `limit` of them.
    pub async fn search_tracks(
        &self,
        genre: &Genre,
        limit: usize,
    ) -> Result<Vec<Track>, ProviderError> {
        let session = self
            .session
            .as_ref()
            .ok_or(ProviderError::NotConfigured(ProviderKind::Spotify))?;

        let response = self.send_search_request(session, genre, limit).await?;
        let mut tracks = adapter::to_tracks(response);
        tracks.truncate(limit);
        Ok(tracks)
    }

    async fn send_search_request(
        &self,
        session: &SpotifySession,
        genre: &Genre,
        limit: usize,
    ) -> Result<dto::SearchResponse, ProviderError> {
        let request = HttpRequest::get(format!("{}/search", self.base_url))
            .query("q", format!("genre:{}", genre))
            .query("type", "track")
            .query("limit", limit.clamp(1, MAX_LIMIT).to_string())
            .bearer(session.access_token());

        Ok(self.fetcher.fetch_json(&request).await?)
    }
}
