//! Application Configuration
//!
//! Typed access to the environment-driven settings. Mandatory keys fail
//! startup; optional keys fall back to documented defaults.

use crate::utils::{AppError, AppResult};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration resolved once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Last.fm API key (mandatory)
    pub lastfm_api_key: String,
    /// Last.fm shared secret used for request signing (mandatory)
    pub lastfm_shared_secret: String,
    /// Chat-completion API key; roast text degrades to canned lines when absent
    pub openai_api_key: Option<String>,
    /// Base URL of the OpenAI-compatible completion endpoint
    pub openai_base_url: String,
    /// Model identifier sent with every completion request
    pub openai_model: String,
    /// TCP port the server binds to
    pub port: u16,
    /// Externally visible origin used for the auth callback and redirects
    pub public_base_url: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        let lastfm_api_key = require("LASTFM_API_KEY")?;
        let lastfm_shared_secret = require("LASTFM_SHARED_SECRET")?;
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        let openai_base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());
        let openai_model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| format!("http://localhost:{}", port));

        Ok(Self {
            lastfm_api_key,
            lastfm_shared_secret,
            openai_api_key,
            openai_base_url,
            openai_model,
            port,
            public_base_url,
        })
    }

    /// Callback URL registered with Last.fm as the auth redirect target.
    pub fn callback_url(&self) -> String {
        format!("{}/api/callback", self.public_base_url)
    }
}

fn require(key: &str) -> AppResult<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::config(format!("{} is not set", key)))
}
