//! Test utilities and fixtures for mood-tune tests.
//!
//! Provides a scripted [`Transport`] so fetcher, provider and pipeline tests
//! run without touching the network, plus small fixture builders.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::ScriptedTransport;
//!
//! let transport = Arc::new(ScriptedTransport::new(vec![
//!     Ok(ScriptedTransport::response(503, b"")),
//!     Ok(ScriptedTransport::response(200, b"ok")),
//! ]));
//! let fetcher = ResilientFetcher::new(transport.clone(), RetryPolicy::default());
//! ```

use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::fetch::{FetchError, HttpRequest, HttpResponse, Transport};
use crate::providers::{ProviderKind, Track};

type Reply = Result<HttpResponse, FetchError>;

/// Transport that replays canned replies.
///
/// Replies are consumed in order. Requests to a URL registered with
/// [`ScriptedTransport::route`] use that URL's script; everything else uses
/// the default script. An exhausted script keeps returning the `repeat`
/// reply if one was set, otherwise a connection error.
pub struct ScriptedTransport {
    default_script: Mutex<VecDeque<Reply>>,
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    repeat: Option<Reply>,
    calls: AtomicU32,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Reply>) -> Self {
        Self {
            default_script: Mutex::new(script.into()),
            routes: Mutex::new(HashMap::new()),
            repeat: None,
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Return the same reply forever.
    pub fn repeating(reply: Reply) -> Self {
        Self {
            repeat: Some(reply),
            ..Self::new(Vec::new())
        }
    }

    /// Script replies for one exact URL.
    pub fn route(self, url: &str, script: Vec<Reply>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), script.into());
        self
    }

    /// Build a response with the given status and body.
    pub fn response(status: u16, body: &[u8]) -> HttpResponse {
        HttpResponse {
            status,
            content_type: None,
            body: body.to_vec(),
        }
    }

    /// 200 response with a JSON body.
    pub fn json(body: &serde_json::Value) -> HttpResponse {
        HttpResponse {
            status: 200,
            content_type: Some("application/json".to_string()),
            body: serde_json::to_vec(body).unwrap(),
        }
    }

    /// 200 response carrying a PNG image.
    pub fn png(width: u32, height: u32) -> HttpResponse {
        HttpResponse {
            status: 200,
            content_type: Some("image/png".to_string()),
            body: png_bytes(width, height),
        }
    }

    /// Total number of `send` calls.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of `send` calls for one URL.
    pub fn calls_to(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url == url)
            .count()
    }

    /// Every request seen so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let scripted = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(&request.url) {
                Some(script) => script.pop_front(),
                None => self.default_script.lock().unwrap().pop_front(),
            }
        };

        scripted
            .or_else(|| self.repeat.clone())
            .unwrap_or_else(|| Err(FetchError::Connection("script exhausted".to_string())))
    }
}

/// Encode a solid-colour PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 90]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .expect("Failed to encode test PNG");
    buf.into_inner()
}

/// Track with predictable fields derived from `id`.
pub fn mock_track(kind: ProviderKind, id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: Some(format!("Track {}", id)),
        artist: Some("Test Artist".to_string()),
        playable_url: format!("https://play.example.com/{}", id),
        artwork_url: Some(format!("https://img.example.com/{}.png", id)),
        source: kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_is_replayed_in_order() {
        let transport = ScriptedTransport::new(vec![
            Ok(ScriptedTransport::response(503, b"")),
            Ok(ScriptedTransport::response(200, b"done")),
        ]);
        let request = HttpRequest::get("https://example.com");

        assert_eq!(transport.send(&request).await.unwrap().status, 503);
        assert_eq!(transport.send(&request).await.unwrap().status, 200);
        assert!(transport.send(&request).await.is_err());
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_routes_take_precedence() {
        let transport = ScriptedTransport::repeating(Ok(ScriptedTransport::response(404, b"")))
            .route("https://img.example.com/a.png", vec![Ok(ScriptedTransport::png(4, 4))]);

        let art = transport
            .send(&HttpRequest::get("https://img.example.com/a.png"))
            .await
            .unwrap();
        assert_eq!(art.content_type.as_deref(), Some("image/png"));

        let other = transport
            .send(&HttpRequest::get("https://elsewhere.example.com"))
            .await
            .unwrap();
        assert_eq!(other.status, 404);
        assert_eq!(transport.calls_to("https://img.example.com/a.png"), 1);
    }

    #[test]
    fn test_png_bytes_decode() {
        let img = image::load_from_memory(&png_bytes(8, 3)).unwrap();
        assert_eq!((img.width(), img.height()), (8, 3));
    }
}
