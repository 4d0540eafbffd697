//! Spotify authentication session.
//!
//! The session is established once at startup and handed to
//! [`SpotifyProvider`](super::SpotifyProvider); the pipeline only reads it.
//! Two ways in: a pre-issued access token, or the client-credentials grant
//! (enough for catalogue search).

use std::fmt;

use super::dto;
use crate::fetch::{HttpRequest, ResilientFetcher};
use crate::providers::ProviderError;

/// Default token endpoint
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Bearer token for the Web API.
#[derive(Clone, PartialEq)]
pub struct SpotifySession {
    access_token: String,
}

impl SpotifySession {
    /// Wrap an access token obtained elsewhere.
    pub fn from_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Run the client-credentials grant against `token_url`.
    pub async fn client_credentials(
        fetcher: &ResilientFetcher,
        token_url: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Self, ProviderError> {
        let request = HttpRequest::post(token_url)
            .form("grant_type", "client_credentials")
            .basic_auth(client_id, client_secret);

        let token: dto::TokenResponse = fetcher.fetch_json(&request).await?;

        if !token.token_type.eq_ignore_ascii_case("bearer") {
            return Err(ProviderError::Auth(format!(
                "unexpected token type '{}'",
                token.token_type
            )));
        }

        tracing::info!("Spotify session established (expires in {}s)", token.expires_in);
        Ok(Self::from_token(token.access_token))
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for SpotifySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifySession")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{Auth, Method, RetryPolicy};
    use crate::test_utils::ScriptedTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_client_credentials_grant() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(ScriptedTransport::json(
            &serde_json::json!({
                "access_token": "token-123",
                "token_type": "Bearer",
                "expires_in": 3600
            }),
        ))]));
        let fetcher = ResilientFetcher::new(transport.clone(), RetryPolicy::default());

        let session = SpotifySession::client_credentials(&fetcher, TOKEN_URL, "id", "secret")
            .await
            .unwrap();
        assert_eq!(session.access_token(), "token-123");

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, TOKEN_URL);
        assert_eq!(
            request.form,
            vec![("grant_type".to_string(), "client_credentials".to_string())]
        );
        assert!(matches!(
            request.auth,
            Some(Auth::Basic { ref username, .. }) if username == "id"
        ));
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(ScriptedTransport::response(
            400,
            br#"{"error":"invalid_client"}"#,
        ))]));
        let fetcher = ResilientFetcher::new(transport.clone(), RetryPolicy::default());

        let result = SpotifySession::client_credentials(&fetcher, TOKEN_URL, "id", "bad").await;
        assert!(matches!(result, Err(ProviderError::Network(_))));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_unexpected_token_type() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(ScriptedTransport::json(
            &serde_json::json!({"access_token": "t", "token_type": "mac", "expires_in": 1}),
        ))]));
        let fetcher = ResilientFetcher::new(transport, RetryPolicy::default());

        let result = SpotifySession::client_credentials(&fetcher, TOKEN_URL, "id", "s").await;
        assert!(matches!(result, Err(ProviderError::Auth(_))));
    }

    #[test]
    fn test_debug_hides_token() {
        let session = SpotifySession::from_token("very-secret");
        assert!(!format!("{:?}", session).contains("very-secret"));
    }
}
