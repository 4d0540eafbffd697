//! Adapter layer: Convert Spotify DTOs to domain tracks
//!
//! This is the ONLY place where Spotify DTO types become [`Track`]s.

use super::dto;
use crate::providers::{ProviderKind, Track};

/// Convert a search response to tracks, dropping anything we can't play.
pub fn to_tracks(response: dto::SearchResponse) -> Vec<Track> {
    response
        .tracks
        .map(|page| page.items)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter_map(convert_track)
        .collect()
}

fn convert_track(track: dto::TrackObject) -> Option<Track> {
    if track.is_playable == Some(false) {
        return None;
    }

    let playable_url = track.external_urls.spotify?;
    let id = track.id.unwrap_or_else(|| playable_url.clone());

    // First listed image is the widest
    let artwork_url = track
        .album
        .and_then(|album| album.images.into_iter().next())
        .map(|image| image.url);

    let artist = if track.artists.is_empty() {
        None
    } else {
        Some(
            track
                .artists
                .into_iter()
                .map(|a| a.name)
                .collect::<Vec<_>>()
                .join(", "),
        )
    };

    Some(Track {
        id,
        title: track.name,
        artist,
        playable_url,
        artwork_url,
        source: ProviderKind::Spotify,
    })
}
