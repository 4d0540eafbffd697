//! Adapter layer: Convert YouTube DTOs to domain tracks

use super::dto;
use crate::providers::{ProviderKind, Track};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const VIDEO_KIND: &str = "youtube#video";

/// Convert search results to tracks. Non-video hits are skipped.
pub fn to_tracks(response: dto::SearchListResponse) -> Vec<Track> {
    response.items.into_iter().filter_map(convert_result).collect()
}

fn convert_result(result: dto::SearchResult) -> Option<Track> {
    if result.id.kind != VIDEO_KIND {
        return None;
    }
    let video_id = result.id.video_id.filter(|id| !id.is_empty())?;
    let (title, artist, artwork_url) = match result.snippet {
        Some(snippet) => (
            snippet.title,
            snippet.channel_title,
            best_thumbnail(snippet.thumbnails),
        ),
        None => (None, None, None),
    };

    Some(Track {
        playable_url: watch_url(&video_id),
        id: video_id,
        title,
        artist,
        artwork_url,
        source: ProviderKind::YouTube,
    })
}

/// Prefer the high-resolution thumbnail, then medium, then default.
fn best_thumbnail(thumbnails: dto::Thumbnails) -> Option<String> {
    thumbnails
        .high
        .or(thumbnails.medium)
        .or(thumbnails.default)
        .map(|t| t.url)
}

pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL, urlencoding::encode(video_id))
}
