//! Shared LLM client for brief synthesis
//!
//! Wraps rig's Groq provider; the base URL is configurable so any
//! OpenAI-compatible chat-completions endpoint can stand in.

use rig::client::CompletionClient;
use rig::completion::{Prompt, PromptError};
use rig::providers::groq;

use crate::model::ProviderConfig;

/// Sampling temperature for brief synthesis
pub const TEMPERATURE: f64 = 0.7;

/// Output token ceiling for brief synthesis
pub const MAX_TOKENS: u64 = 1500;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Completion request failed: {0}")]
    Prompt(#[from] PromptError),

    #[error("Completion contained no message content")]
    EmptyCompletion,
}

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: groq::Client,
    model: String,
}

impl LlmClient {
    /// Create a client against `base_url` with the provided API key
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Result<Self, String> {
        let client = groq::Client::builder()
            .api_key(api_key)
            .base_url(base_url.trim_end_matches('/'))
            .build()
            .map_err(|e| format!("Failed to create Groq client: {}", e))?;

        Ok(Self {
            client,
            model: model.to_string(),
        })
    }

    /// Build a client if a completion key is configured
    pub fn from_config(config: &ProviderConfig) -> Option<Self> {
        let api_key = config.llm_api_key.as_deref()?;

        match Self::new(api_key, &config.llm_base_url, &config.llm_model) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!(error = %e, "Completion provider unavailable");
                None
            }
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one preamble + prompt exchange and return the reply text
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let agent = self
            .client
            .agent(&self.model)
            .preamble(system)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .build();

        let reply: String = agent.prompt(prompt).await?;

        if reply.trim().is_empty() {
            return Err(LlmError::EmptyCompletion);
        }

        Ok(reply)
    }
}

/// OpenAI-style chat completion body carrying `content`, for mocked providers
#[cfg(test)]
pub(crate) fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "llama3-70b-8192",
        "system_fingerprint": "fp_test",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "logprobs": null,
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_complete_sends_expected_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer gsk_test"))
            .and(body_partial_json(json!({ "model": "llama3-70b-8192" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_body("{\"summary\":\"ok\"}")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new("gsk_test", &server.uri(), "llama3-70b-8192").unwrap();
        let content = client.complete("sys", "hello").await.unwrap();

        assert_eq!(content, "{\"summary\":\"ok\"}");
    }

    #[tokio::test]
    async fn test_complete_empty_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("  ")))
            .mount(&server)
            .await;

        let client = LlmClient::new("k", &server.uri(), "m").unwrap();
        assert!(client.complete("sys", "hello").await.is_err());
    }

    #[tokio::test]
    async fn test_complete_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = LlmClient::new("k", &server.uri(), "m").unwrap();
        assert!(matches!(
            client.complete("sys", "hello").await,
            Err(LlmError::Prompt(_))
        ));
    }

    #[test]
    fn test_from_config_requires_key() {
        assert!(LlmClient::from_config(&ProviderConfig::default()).is_none());

        let config = ProviderConfig {
            llm_api_key: Some("gsk".to_string()),
            ..ProviderConfig::default()
        };
        let client = LlmClient::from_config(&config).unwrap();
        assert_eq!(client.model(), "llama3-70b-8192");
    }
}
