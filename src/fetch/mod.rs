//! Resilient HTTP fetching.
//!
//! # Architecture
//!
//! - [`Transport`] performs exactly one HTTP exchange (`transport.rs` has the
//!   `reqwest` implementation; tests script their own).
//! - [`retry::with_retry`] adds bounded retries, exponential backoff and a
//!   per-attempt timeout around any fallible call.
//! - [`ResilientFetcher`] combines the two and turns non-2xx responses into
//!   [`FetchError::Status`] so they can be classified.
//!
//! Both provider queries and artwork downloads go through a shared
//! `ResilientFetcher`.

pub mod retry;
mod transport;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub use retry::{RetryPolicy, with_retry};
pub use transport::ReqwestTransport;

/// Errors from a single attempt, or the last one after retries ran out.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid request: {0}")]
    Request(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Status error without a body.
    pub fn status(status: u16) -> Self {
        Self::Status {
            status,
            body: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// Request credentials.
#[derive(Clone, PartialEq)]
pub enum Auth {
    Bearer(String),
    Basic { username: String, password: String },
}

// Never print secrets, requests end up in logs.
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Auth::Basic { username, .. } => write!(f, "Basic({}, <redacted>)", username),
        }
    }
}

/// Outbound HTTP request description.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
    pub auth: Option<Auth>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            form: Vec::new(),
            auth: None,
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn form(mut self, key: &str, value: impl Into<String>) -> Self {
        self.form.push((key.to_string(), value.into()));
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(Auth::Bearer(token.into()));
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(Auth::Basic {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Look up a query parameter.
    #[cfg(test)]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn label(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

/// Response of a single exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP exchange, no retries.
///
/// Implementations return `Ok` for any status the server sent; only
/// transport-level problems are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// Transport plus retry policy.
#[derive(Clone)]
pub struct ResilientFetcher {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl ResilientFetcher {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Fetcher backed by `reqwest`, with the policy's timeout on the client too.
    pub fn http(policy: RetryPolicy) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(policy.timeout)?;
        Ok(Self::new(Arc::new(transport), policy))
    }

    /// Send a request, retrying transient failures. Only 2xx responses succeed.
    pub async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        with_retry(&self.policy, &request.label(), |_| self.send_once(request)).await
    }

    /// GET a URL and return the raw body.
    pub async fn fetch_bytes(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.fetch(&HttpRequest::get(url)).await
    }

    /// Send a request and deserialize the JSON body.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
    ) -> Result<T, FetchError> {
        let response = self.fetch(request).await?;
        serde_json::from_slice(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn send_once(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response);
        }

        let body = String::from_utf8_lossy(&response.body)
            .chars()
            .take(200)
            .collect();
        Err(FetchError::Status {
            status: response.status,
            body,
        })
    }
}
