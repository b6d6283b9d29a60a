//! OpenAI-Compatible Completion Client
//!
//! Talks to any `/chat/completions` endpoint that follows the OpenAI wire
//! format. The API key is optional at construction; calls without one fail
//! with `NotConfigured`, which callers treat as "use the fallback text".

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::provider::{parse_http_error, ChatMessage, CompletionProvider, LlmError, LlmResult};

/// Sampling temperature for roast text
const ROAST_TEMPERATURE: f32 = 0.8;

/// OpenAI-compatible completion client
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// Create a new client. `base_url` is the API root without the
    /// `/chat/completions` suffix.
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Build the request body for the API
    fn build_request_body(&self, messages: &[ChatMessage], json_mode: bool) -> Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "temperature": ROAST_TEMPERATURE,
            "messages": messages,
        });
        if json_mode {
            body["response_format"] = serde_json::json!({"type": "json_object"});
        }
        body
    }

    async fn send(&self, messages: &[ChatMessage], json_mode: bool) -> LlmResult<String> {
        let api_key = self.api_key.as_ref().ok_or(LlmError::NotConfigured)?;
        let body = self.build_request_body(messages, json_mode);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::Network {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text));
        }

        let completion: CompletionResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::Parse {
                message: format!("Failed to parse response: {}", e),
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| LlmError::Parse {
                message: "Response carried no content".to_string(),
            })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> LlmResult<String> {
        self.send(messages, false).await
    }

    async fn complete_json(&self, messages: &[ChatMessage]) -> LlmResult<Value> {
        let content = self.send(messages, true).await?;
        serde_json::from_str(&content).map_err(|e| LlmError::Parse {
            message: format!("Completion is not valid JSON: {}", e),
        })
    }
}

/// Chat-completion response format
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> OpenAiClient {
        OpenAiClient::new(
            Some("sk-test".to_string()),
            "https://api.openai.com/v1",
            "gpt-4o-mini",
        )
    }

    #[test]
    fn test_build_request_body() {
        let client = test_client();
        let messages = vec![ChatMessage::system("Be mean."), ChatMessage::user("Roast me")];

        let body = client.build_request_body(&messages, false);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Roast me");
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn test_build_request_body_json_mode() {
        let client = test_client();
        let body = client.build_request_body(&[ChatMessage::user("go")], true);
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_completion_response_parse() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "gpt-4o-mini",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Bold choice."}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 20, "completion_tokens": 4}
        }"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Bold choice.")
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_not_configured() {
        let client = OpenAiClient::new(None, "https://api.openai.com/v1", "gpt-4o-mini");
        let err = client
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
    }
}
