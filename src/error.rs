//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`FetchError`], [`ProviderError`], [`ArtworkError`], [`ConfigError`]),
//! while the CLI edge uses `anyhow` for convenient error propagation.
//!
//! None of these reach the caller of the recommendation pipeline itself:
//! provider and network failures are absorbed into the outcome. [`Error`]
//! covers the local plumbing around it (config files, HTTP client setup,
//! writing artwork to disk).
//!
//! # Example
//!
//! ```ignore
//! use crate::error::{Result, ResultExt};
//!
//! fn write_artwork(path: &Path, png: &[u8]) -> Result<()> {
//!     std::fs::write(path, png).with_context(format!("writing {}", path.display()))?;
//!     Ok(())
//! }
//! ```

use crate::artwork::ArtworkError;
use crate::config::ConfigError;
use crate::fetch::FetchError;
use crate::providers::ProviderError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client setup or request error
    #[error("Network error: {0}")]
    Fetch(#[from] FetchError),

    /// Provider session/setup error
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Artwork decode/encode error
    #[error("Artwork error: {0}")]
    Artwork(#[from] ArtworkError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, ArtworkError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Artwork(e).context(ctx))
    }
}
