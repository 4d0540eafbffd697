//! Mood labels and genre selection.
//!
//! A [`Mood`] is whatever label the external detector produced, normalized to
//! lower case. It is turned into a search [`Genre`] by [`select_genre`] using a
//! fixed table of synonyms (see `genres.rs`).

mod genres;

use std::fmt;
use std::str::FromStr;

pub use genres::{DEFAULT_GENRE, candidates, known_moods, select_genre};

/// Normalized mood label.
///
/// Free text: labels outside the genre table are valid moods, they just map
/// to the default genre.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mood(String);

impl Mood {
    /// Label used when the detector could not produce one.
    pub const FALLBACK: &'static str = "neutral";

    /// Build a mood from a raw label. Blank labels become [`Mood::FALLBACK`].
    pub fn new(label: impl AsRef<str>) -> Self {
        let normalized = label.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Self::fallback();
        }
        Self(normalized)
    }

    /// The detector fallback mood.
    pub fn fallback() -> Self {
        Self(Self::FALLBACK.to_string())
    }

    /// Accept a detector result, degrading to the fallback mood on error.
    pub fn detected_or_fallback<E: fmt::Display>(detected: Result<String, E>) -> Self {
        match detected {
            Ok(label) => Self::new(label),
            Err(e) => {
                tracing::warn!("Mood detection failed, using '{}': {}", Self::FALLBACK, e);
                Self::fallback()
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Mood {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Music genre used as a provider search key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Genre(String);

impl Genre {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_is_normalized() {
        assert_eq!(Mood::new("  HaPpY ").as_str(), "happy");
    }

    #[test]
    fn test_blank_mood_is_fallback() {
        assert_eq!(Mood::new("   "), Mood::fallback());
        assert_eq!(Mood::default().as_str(), "neutral");
    }

    #[test]
    fn test_detector_error_becomes_fallback() {
        let mood = Mood::detected_or_fallback::<String>(Err("no face found".to_string()));
        assert_eq!(mood.as_str(), Mood::FALLBACK);

        let mood = Mood::detected_or_fallback::<String>(Ok("Sad".to_string()));
        assert_eq!(mood.as_str(), "sad");
    }

    #[test]
    fn test_mood_from_str() {
        let mood: Mood = "Angry".parse().unwrap();
        assert_eq!(mood.to_string(), "angry");
    }
}
