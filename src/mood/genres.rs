//! Fixed mood-to-genre table.
//!
//! Each mood maps to a handful of synonyms; one of them is picked at random
//! so repeated requests for the same mood don't always search the same tag.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::{Genre, Mood};

/// Genre searched for moods that aren't in the table.
pub const DEFAULT_GENRE: &str = "pop";

const DEFAULT_GENRES: &[&str] = &[DEFAULT_GENRE];

const MOOD_GENRES: &[(&str, &[&str])] = &[
    ("happy", &["happy", "uplifting"]),
    ("sad", &["sad", "melancholy", "nostalgic"]),
    ("angry", &["rock", "intense", "energetic"]),
    ("calm", &["calm", "relaxing", "peaceful"]),
    ("excited", &["exciting", "upbeat", "party"]),
];

/// Candidate genres for a mood. Never empty.
pub fn candidates(mood: &Mood) -> &'static [&'static str] {
    MOOD_GENRES
        .iter()
        .find(|(name, _)| *name == mood.as_str())
        .map(|(_, genres)| *genres)
        .unwrap_or(DEFAULT_GENRES)
}

/// Moods with a dedicated genre list, in table order.
pub fn known_moods() -> impl Iterator<Item = (&'static str, &'static [&'static str])> {
    MOOD_GENRES.iter().copied()
}

/// Pick one genre for the mood, uniformly among its candidates.
pub fn select_genre<R: Rng + ?Sized>(mood: &Mood, rng: &mut R) -> Genre {
    let genre = candidates(mood)
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_GENRE);
    tracing::debug!("Mood '{}' -> genre '{}'", mood, genre);
    Genre::new(genre)
}
