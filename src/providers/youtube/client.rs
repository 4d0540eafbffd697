//! YouTube Data API search client
//!
//! Free-text search for `"<genre> music"`, videos only.

use super::{adapter, dto};
use crate::fetch::{HttpRequest, ResilientFetcher};
use crate::mood::Genre;
use crate::providers::{ProviderError, ProviderKind, Track};

/// `maxResults` upper bound for search.list
const MAX_RESULTS: usize = 50;

/// Secondary provider: YouTube video search
pub struct YouTubeProvider {
    fetcher: ResilientFetcher,
    api_key: Option<String>,
    base_url: String,
}

impl YouTubeProvider {
    /// Create a provider. Without an API key every search reports
    /// [`ProviderError::NotConfigured`].
    pub fn new(fetcher: ResilientFetcher, api_key: Option<String>) -> Self {
        Self {
            fetcher,
            api_key,
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
        }
    }

    /// Create a provider for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(
        fetcher: ResilientFetcher,
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            api_key,
            base_url: base_url.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// The free-text query sent for a genre.
    pub fn query_for(genre: &Genre) -> String {
        format!("{} music", genre)
    }

    /// Search videos for the genre, at most `limit` of them.
    pub async fn search_videos(
        &self,
        genre: &Genre,
        limit: usize,
    ) -> Result<Vec<Track>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured(ProviderKind::YouTube))?;

        let request = HttpRequest::get(format!("{}/search", self.base_url))
            .query("part", "id,snippet")
            .query("q", Self::query_for(genre))
            .query("type", "video")
            .query("maxResults", limit.clamp(1, MAX_RESULTS).to_string())
            .query("key", api_key);

        let response: dto::SearchListResponse = self.fetcher.fetch_json(&request).await?;
        let mut tracks = adapter::to_tracks(response);
        tracks.truncate(limit);
        Ok(tracks)
    }
}
