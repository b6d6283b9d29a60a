//! Application State
//!
//! Shared handles cloned into every request handler. Both upstream
//! clients are built once at startup from the loaded configuration.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::lastfm::LastfmClient;
use crate::services::llm::OpenAiClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub lastfm: Arc<LastfmClient>,
    pub llm: Arc<OpenAiClient>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let lastfm = LastfmClient::new(
            config.lastfm_api_key.clone(),
            config.lastfm_shared_secret.clone(),
        );
        let llm = OpenAiClient::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
            config.openai_model.clone(),
        );
        Self {
            config: Arc::new(config),
            lastfm: Arc::new(lastfm),
            llm: Arc::new(llm),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("port", &self.config.port)
            .finish()
    }
}
