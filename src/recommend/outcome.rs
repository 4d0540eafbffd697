//! Terminal result of the pipeline.

use crate::artwork::{Artwork, ArtworkError};
use crate::mood::Genre;
use crate::providers::Track;

/// What the pipeline hands to the presentation layer.
#[derive(Debug, Clone)]
pub enum ResolutionOutcome {
    /// A track was found. `artwork` is `None` only when the track has none.
    Resolved {
        track: Track,
        artwork: Option<Artwork>,
        genre: Genre,
    },
    /// A track was found but its artwork could not be retrieved.
    PartialSuccess {
        track: Track,
        genre: Genre,
        artwork_error: ArtworkError,
    },
    /// Neither provider produced anything. An expected outcome, not an error.
    NoResultsFromAnyProvider { genre: Genre },
}

impl ResolutionOutcome {
    /// The genre that was searched.
    pub fn genre(&self) -> &Genre {
        match self {
            Self::Resolved { genre, .. }
            | Self::PartialSuccess { genre, .. }
            | Self::NoResultsFromAnyProvider { genre } => genre,
        }
    }

    pub fn track(&self) -> Option<&Track> {
        match self {
            Self::Resolved { track, .. } | Self::PartialSuccess { track, .. } => Some(track),
            Self::NoResultsFromAnyProvider { .. } => None,
        }
    }

    /// URL to open, if anything was found.
    pub fn playable_url(&self) -> Option<&str> {
        self.track().map(|t| t.playable_url.as_str())
    }

    pub fn artwork(&self) -> Option<&Artwork> {
        match self {
            Self::Resolved { artwork, .. } => artwork.as_ref(),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}
