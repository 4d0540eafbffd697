//! `reqwest`-backed transport.

use std::time::Duration;

use async_trait::async_trait;

use super::{Auth, FetchError, HttpRequest, HttpResponse, Method, Transport};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Single-attempt HTTP transport over a shared `reqwest::Client`.
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client that accepts gzip and gives up on an attempt after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut builder = match request.method {
            Method::Get => self.http_client.get(&request.url),
            Method::Post => self.http_client.post(&request.url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }
        builder = match &request.auth {
            Some(Auth::Bearer(token)) => builder.bearer_auth(token),
            Some(Auth::Basic { username, password }) => {
                builder.basic_auth(username, Some(password))
            }
            None => builder,
        };

        let response = builder.send().await.map_err(classify)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(classify)?.to_vec();

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Map a `reqwest` error onto the retry taxonomy.
fn classify(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_builder() {
        FetchError::Request(error.to_string())
    } else if error.is_connect() || error.is_request() || error.is_body() {
        FetchError::Connection(error.to_string())
    } else if error.is_decode() {
        FetchError::Decode(error.to_string())
    } else {
        FetchError::Request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new(Duration::from_secs(15)).is_ok());
    }

    #[test]
    fn test_user_agent_format() {
        assert!(USER_AGENT.starts_with("mood-tune/"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_not_retryable() {
        let transport = ReqwestTransport::new(Duration::from_secs(1)).unwrap();
        let err = transport
            .send(&HttpRequest::get("not a url"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }
}
