//! Spotify Web API Data Transfer Objects
//!
//! These types match what the Spotify Web API returns.
//! DO NOT use these types outside the spotify module - convert to domain types.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api
//!
//! Only the `/search` endpoint (type=track) and the client-credentials token
//! endpoint are used.

use serde::{Deserialize, Serialize};

/// Search response. Only `tracks` is requested.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub tracks: Option<Paging>,
}

/// Paged list of tracks
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Paging {
    /// Spotify occasionally returns `null` entries in search pages
    #[serde(default)]
    pub items: Vec<Option<TrackObject>>,
    pub total: Option<u32>,
}

/// Full track object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackObject {
    /// Spotify track ID (null for local files)
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub album: Option<Album>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub is_playable: Option<bool>,
}

/// Links to the object on open.spotify.com
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Album {
    pub name: Option<String>,
    /// Widest first
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub name: String,
}

/// Client-credentials token response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds
    pub expires_in: u64,
}
