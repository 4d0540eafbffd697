//! Mood-to-media resolution pipeline.
//!
//! Turns a mood into something playable:
//! 1. Pick a genre for the mood
//! 2. Search the primary provider, pick one of its tracks at random
//! 3. If it found nothing or failed, take the secondary provider's first hit
//! 4. Fetch artwork for whichever track won
//!
//! Provider and network failures are absorbed here. The caller only ever
//! sees a [`ResolutionOutcome`].

mod outcome;

use std::sync::Arc;

use rand::Rng;

use crate::artwork::ArtworkResolver;
use crate::mood::{Genre, Mood, select_genre};
use crate::providers::{MusicProvider, QueryResult, Track};

pub use outcome::ResolutionOutcome;

/// How many results to ask each provider for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub primary: usize,
    pub secondary: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            primary: 10,
            secondary: 1,
        }
    }
}

/// The fallback orchestrator.
pub struct Recommender {
    primary: Arc<dyn MusicProvider>,
    secondary: Arc<dyn MusicProvider>,
    artwork: ArtworkResolver,
    limits: SearchLimits,
}

impl Recommender {
    pub fn new(
        primary: Arc<dyn MusicProvider>,
        secondary: Arc<dyn MusicProvider>,
        artwork: ArtworkResolver,
    ) -> Self {
        Self {
            primary,
            secondary,
            artwork,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Resolve a mood to a recommendation.
    ///
    /// `rng` drives both the genre and the track choice.
    pub async fn recommend<R: Rng + Send + ?Sized>(
        &self,
        mood: &Mood,
        rng: &mut R,
    ) -> ResolutionOutcome {
        let genre = select_genre(mood, rng);
        tracing::info!(
            "Mood '{}': searching {} for '{}'",
            mood,
            self.primary.kind(),
            genre
        );

        match self.primary.search(&genre, self.limits.primary).await {
            QueryResult::Tracks(mut tracks) if !tracks.is_empty() => {
                let index = rng.random_range(0..tracks.len());
                tracing::info!(
                    "{} returned {} tracks, picked #{}",
                    self.primary.kind(),
                    tracks.len(),
                    index + 1
                );
                let track = tracks.swap_remove(index);
                return self.with_artwork(track, genre).await;
            }
            QueryResult::Tracks(_) | QueryResult::Empty => tracing::info!(
                "No '{}' results from {}, trying {}",
                genre,
                self.primary.kind(),
                self.secondary.kind()
            ),
            QueryResult::Failure(e) => tracing::warn!(
                "{} search failed ({}), trying {}",
                self.primary.kind(),
                e,
                self.secondary.kind()
            ),
        }

        match self.secondary.search(&genre, self.limits.secondary).await {
            QueryResult::Tracks(mut tracks) if !tracks.is_empty() => {
                let track = tracks.remove(0);
                return self.with_artwork(track, genre).await;
            }
            QueryResult::Tracks(_) | QueryResult::Empty => {
                tracing::info!("No '{}' results from {}", genre, self.secondary.kind())
            }
            QueryResult::Failure(e) => {
                tracing::warn!("{} search failed: {}", self.secondary.kind(), e)
            }
        }

        tracing::warn!("No provider could find '{}' music", genre);
        ResolutionOutcome::NoResultsFromAnyProvider { genre }
    }

    async fn with_artwork(&self, track: Track, genre: Genre) -> ResolutionOutcome {
        let artwork = self.artwork.resolve(track.artwork_url.as_deref()).await;
        match artwork {
            None => {
                tracing::debug!("{} has no artwork", track.display_name());
                ResolutionOutcome::Resolved {
                    track,
                    artwork: None,
                    genre,
                }
            }
            Some(Ok(artwork)) => ResolutionOutcome::Resolved {
                track,
                artwork: Some(artwork),
                genre,
            },
            Some(Err(artwork_error)) => ResolutionOutcome::PartialSuccess {
                track,
                genre,
                artwork_error,
            },
        }
    }
}
