//! Completion Provider Trait
//!
//! Defines the interface the roast conversation uses to obtain generated
//! text. The production implementation talks to an OpenAI-compatible
//! chat-completion endpoint; tests substitute a stub.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single chat message sent to the completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Completion-specific errors
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Authentication failed (invalid API key)
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// Network/connection error
    #[error("Network error: {message}")]
    Network { message: String },

    /// Non-success response from the completion endpoint
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response parsing error
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// No API key configured; callers degrade to their fallback text
    #[error("Completion provider not configured")]
    NotConfigured,
}

/// Result type for completion operations
pub type LlmResult<T> = Result<T, LlmError>;

/// Interface the conversation layer generates its text through.
///
/// Every caller treats failure as non-fatal: errors are replaced by a
/// deterministic fallback so the conversation never stalls.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Freeform text completion for the given conversation.
    async fn complete(&self, messages: &[ChatMessage]) -> LlmResult<String>;

    /// Completion constrained to a JSON object, parsed before returning.
    async fn complete_json(&self, messages: &[ChatMessage]) -> LlmResult<Value>;
}

/// Map a non-success HTTP status to an error variant
pub fn parse_http_error(status: u16, body: &str) -> LlmError {
    match status {
        401 | 403 => LlmError::Auth {
            message: format!("HTTP {}: {}", status, body),
        },
        _ => LlmError::Api {
            status,
            message: body.to_string(),
        },
    }
}
