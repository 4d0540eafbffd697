//! Artwork retrieval.
//!
//! Downloads album art or video thumbnails through the shared
//! [`ResilientFetcher`] and decodes them with `image`.
//!
//! # Design Principles
//!
//! - **Graceful degradation**: a missing or broken image is reported, never
//!   raised; the caller decides what to show instead
//! - **Validated bytes**: only data that actually decodes is returned

use std::io::Cursor;

use crate::fetch::{FetchError, ResilientFetcher};

/// Decoded artwork ready for display.
#[derive(Debug, Clone)]
pub struct Artwork {
    /// Raw image data as downloaded
    pub data: Vec<u8>,
    /// MIME type (from the response, or sniffed from the bytes)
    pub mime_type: String,
    /// Source URL
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl Artwork {
    /// Decode `data`, failing if it isn't an image we understand.
    pub fn decode(
        data: Vec<u8>,
        content_type: Option<&str>,
        url: &str,
    ) -> Result<Self, ArtworkError> {
        let format =
            image::guess_format(&data).map_err(|e| ArtworkError::Decode(e.to_string()))?;
        let img = image::load_from_memory_with_format(&data, format)
            .map_err(|e| ArtworkError::Decode(e.to_string()))?;

        let mime_type = content_type
            .filter(|ct| ct.starts_with("image/"))
            .map(str::to_string)
            .unwrap_or_else(|| format.to_mime_type().to_string());

        Ok(Self {
            width: img.width(),
            height: img.height(),
            data,
            mime_type,
            url: url.to_string(),
        })
    }

    /// Encode an aspect-preserving thumbnail fitting a `max_side` square as PNG.
    pub fn thumbnail_png(&self, max_side: u32) -> Result<Vec<u8>, ArtworkError> {
        let img =
            image::load_from_memory(&self.data).map_err(|e| ArtworkError::Decode(e.to_string()))?;
        let thumb = img.thumbnail(max_side, max_side);

        let mut buf = Cursor::new(Vec::new());
        thumb
            .write_to(&mut buf, image::ImageFormat::Png)
            .map_err(|e| ArtworkError::Encode(e.to_string()))?;
        Ok(buf.into_inner())
    }
}

/// Why artwork could not be produced
#[derive(Debug, Clone, thiserror::Error)]
pub enum ArtworkError {
    #[error("Failed to download artwork: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to decode artwork: {0}")]
    Decode(String),

    #[error("Failed to encode artwork: {0}")]
    Encode(String),
}

/// Fetches and decodes artwork.
pub struct ArtworkResolver {
    fetcher: ResilientFetcher,
}

impl ArtworkResolver {
    pub fn new(fetcher: ResilientFetcher) -> Self {
        Self { fetcher }
    }

    /// Resolve optional artwork.
    ///
    /// `None` means there was nothing to fetch; no request is made. Otherwise
    /// the download result, with the reason when it failed.
    pub async fn resolve(&self, url: Option<&str>) -> Option<Result<Artwork, ArtworkError>> {
        let url = url?;
        Some(self.fetch(url).await)
    }

    /// Download and decode artwork, reporting what went wrong.
    pub async fn fetch(&self, url: &str) -> Result<Artwork, ArtworkError> {
        let result = self.download(url).await;

        match &result {
            Ok(artwork) => tracing::debug!(
                "Fetched artwork {} ({}x{}, {})",
                url,
                artwork.width,
                artwork.height,
                artwork.mime_type
            ),
            Err(e) => tracing::warn!("Artwork unavailable for {}: {}", url, e),
        }
        result
    }

    async fn download(&self, url: &str) -> Result<Artwork, ArtworkError> {
        let response = self.fetcher.fetch_bytes(url).await?;
        Artwork::decode(response.body, response.content_type.as_deref(), url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RetryPolicy;
    use crate::test_utils::{ScriptedTransport, png_bytes};
    use std::sync::Arc;

    const ART_URL: &str = "https://i.scdn.co/image/abc";

    fn resolver(transport: Arc<ScriptedTransport>) -> ArtworkResolver {
        ArtworkResolver::new(ResilientFetcher::new(transport, RetryPolicy::default()))
    }

    #[tokio::test]
    async fn test_no_url_is_none_without_network() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let resolver = resolver(transport.clone());

        assert!(resolver.resolve(None).await.is_none());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_resolves_and_decodes() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(ScriptedTransport::png(64, 32))]));
        let resolver = resolver(transport);

        let artwork = resolver.resolve(Some(ART_URL)).await.unwrap().unwrap();
        assert_eq!((artwork.width, artwork.height), (64, 32));
        assert_eq!(artwork.mime_type, "image/png");
        assert_eq!(artwork.url, ART_URL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_then_gives_up() {
        let transport = Arc::new(ScriptedTransport::repeating(Ok(ScriptedTransport::response(
            500, b"",
        ))));
        let resolver = resolver(transport.clone());

        let result = resolver.fetch(ART_URL).await;
        assert!(matches!(
            result,
            Err(ArtworkError::Fetch(FetchError::Status { status: 500, .. }))
        ));
        assert_eq!(transport.calls(), 5);
        assert!(matches!(
            resolver.resolve(Some(ART_URL)).await,
            Some(Err(ArtworkError::Fetch(_)))
        ));
    }

    #[tokio::test]
    async fn test_undecodable_bytes_are_rejected() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(ScriptedTransport::response(
            200,
            b"<html>oops</html>",
        ))]));
        let resolver = resolver(transport);

        let result = resolver.fetch(ART_URL).await;
        assert!(matches!(result, Err(ArtworkError::Decode(_))));
    }

    #[test]
    fn test_mime_type_sniffed_when_header_missing() {
        let artwork = Artwork::decode(png_bytes(2, 2), Some("application/octet-stream"), ART_URL)
            .unwrap();
        assert_eq!(artwork.mime_type, "image/png");
    }

    #[test]
    fn test_thumbnail_keeps_aspect_ratio() {
        let artwork = Artwork::decode(png_bytes(400, 200), None, ART_URL).unwrap();
        let thumb = artwork.thumbnail_png(200).unwrap();

        let img = image::load_from_memory(&thumb).unwrap();
        assert_eq!((img.width(), img.height()), (200, 100));
    }
}
