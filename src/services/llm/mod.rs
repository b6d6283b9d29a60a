//! LLM Completion Service
//!
//! The completion seam the roast conversation generates its text through,
//! with an OpenAI-compatible client as the production implementation.

pub mod openai;
pub mod provider;

pub use openai::OpenAiClient;
pub use provider::{ChatMessage, CompletionProvider, LlmError, LlmResult, MessageRole};
