//! Last.fm Upstream Client
//!
//! Thin client over the Last.fm REST API. Every call is a GET against the
//! single 2.0 endpoint with method-specific query parameters. Signing is
//! per-call opt-in: the read-only listening-history methods go unsigned,
//! only the auth handshake computes an `api_sig`.

use serde::Deserialize;
use serde_json::Value;

use super::sanitize::sanitize;
use super::signature::api_signature;

/// Last.fm REST endpoint
const LASTFM_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Authorize page the browser is sent to before the callback fires
const LASTFM_AUTH_URL: &str = "https://www.last.fm/api/auth/";

/// Last.fm-specific errors
#[derive(Debug, thiserror::Error)]
pub enum LastfmError {
    /// Error payload reported by the Last.fm API itself
    #[error("{message}")]
    Upstream { code: Option<i64>, message: String },

    /// Transport-level failure
    #[error("Network error: {message}")]
    Network { message: String },

    /// Unexpected response shape
    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl From<reqwest::Error> for LastfmError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for Last.fm operations
pub type LastfmResult<T> = Result<T, LastfmError>;

/// Authenticated session returned by `auth.getSession`
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub name: String,
    pub key: String,
}

/// Client for the Last.fm REST API
pub struct LastfmClient {
    client: reqwest::Client,
    api_key: String,
    shared_secret: String,
    base_url: String,
}

impl LastfmClient {
    /// Create a new client with the given credentials
    pub fn new(api_key: impl Into<String>, shared_secret: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            shared_secret: shared_secret.into(),
            base_url: LASTFM_API_URL.to_string(),
        }
    }

    /// Override the API endpoint (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Authorize-page URL the browser is sent to, with `callback` as the
    /// `cb` redirect target.
    pub fn auth_url(&self, callback: &str) -> String {
        format!(
            "{}?api_key={}&cb={}",
            LASTFM_AUTH_URL,
            self.api_key,
            urlencoding::encode(callback)
        )
    }

    /// One unsigned GET against the API.
    ///
    /// `method`, `api_key` and `format=json` are always sent; `params`
    /// carries the method-specific rest. An `error` field in the payload
    /// fails the call with the upstream message.
    pub async fn call(&self, method: &str, params: &[(&str, &str)]) -> LastfmResult<Value> {
        self.request(method, params, false).await
    }

    /// Same as [`call`] but with an `api_sig` computed over every
    /// parameter except `format`. Only `auth.getSession` needs this.
    pub async fn call_signed(&self, method: &str, params: &[(&str, &str)]) -> LastfmResult<Value> {
        self.request(method, params, true).await
    }

    /// [`call`] followed by the response sanitizer.
    pub async fn call_sanitized(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> LastfmResult<Value> {
        Ok(sanitize(&self.call(method, params).await?))
    }

    /// Exchange a callback token for an authenticated session.
    pub async fn get_session(&self, token: &str) -> LastfmResult<Session> {
        let payload = self
            .call_signed("auth.getSession", &[("token", token)])
            .await?;
        parse_session(&payload)
    }

    async fn request(
        &self,
        method: &str,
        params: &[(&str, &str)],
        signed: bool,
    ) -> LastfmResult<Value> {
        let query = self.build_query(method, params, signed);

        let response = self.client.get(&self.base_url).query(&query).send().await?;
        let body = response.text().await.map_err(|e| LastfmError::Network {
            message: e.to_string(),
        })?;

        parse_payload(method, &body)
    }

    /// Assemble the full query string pairs for one call. The signature,
    /// when requested, covers everything assembled so far; `format=json`
    /// is appended after signing and never participates in it.
    fn build_query(&self, method: &str, params: &[(&str, &str)], signed: bool) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = vec![
            ("method".to_string(), method.to_string()),
            ("api_key".to_string(), self.api_key.clone()),
        ];
        for (key, value) in params {
            query.push((key.to_string(), value.to_string()));
        }

        if signed {
            let sig = api_signature(&query, &self.shared_secret);
            query.push(("api_sig".to_string(), sig));
        }
        query.push(("format".to_string(), "json".to_string()));
        query
    }
}

/// Last.fm reports failures through an `error` field in the body rather
/// than the status line, so the payload is inspected instead of the code.
fn parse_payload(method: &str, body: &str) -> LastfmResult<Value> {
    let payload: Value = serde_json::from_str(body).map_err(|e| LastfmError::Parse {
        message: format!("Invalid JSON from {}: {}", method, e),
    })?;

    if let Some(error) = payload.get("error") {
        let message = payload["message"]
            .as_str()
            .unwrap_or("Unknown Last.fm error")
            .to_string();
        tracing::error!(method, code = ?error, "Last.fm API error: {}", message);
        return Err(LastfmError::Upstream {
            code: error.as_i64(),
            message,
        });
    }

    Ok(payload)
}

fn parse_session(payload: &Value) -> LastfmResult<Session> {
    serde_json::from_value(payload["session"].clone()).map_err(|e| LastfmError::Parse {
        message: format!("Malformed auth.getSession payload: {}", e),
    })
}
