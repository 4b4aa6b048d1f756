// src/ai/completion_client.rs
//! HTTP client for the chat-completions endpoint.
//!
//! The API key is server-side only. A blank key puts the client in
//! unavailable mode: every call errors immediately and the calling adapter
//! falls back to its static content. Single attempt, no retry.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::config_manager::ServiceConfig;

const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PromptMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<PromptMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: PromptMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Clone)]
pub struct CompletionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            api_key,
            model,
        })
    }

    pub fn from_config(service: &ServiceConfig) -> Result<Self> {
        Self::new(
            service.completion_url.clone(),
            service.completion_key.clone(),
            service.completion_model.clone(),
        )
    }

    pub fn available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Send one system+user exchange and return the first choice's text
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        if !self.available() {
            anyhow::bail!("Completion API key not configured");
        }

        let url = format!("{}{}", self.base_url, CHAT_COMPLETIONS_ENDPOINT);
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                PromptMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                PromptMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
        };

        trace!("Calling completion endpoint: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Completion API error {}: {}", status, error_text);
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .context("Failed to parse completion response")?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("Completion response contained no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable_client() -> CompletionClient {
        CompletionClient::new(
            "http://localhost:0".to_string(),
            String::new(),
            "test-model".to_string(),
        )
        .expect("client")
    }

    #[test]
    fn blank_key_means_unavailable() {
        assert!(!unavailable_client().available());

        let client = CompletionClient::new(
            "http://localhost:0".to_string(),
            "  ".to_string(),
            "test-model".to_string(),
        )
        .expect("client");
        assert!(!client.available());
    }

    #[tokio::test]
    async fn complete_errors_without_key_before_any_request() {
        let err = unavailable_client()
            .complete("system", "user")
            .await
            .expect_err("should fail");
        assert!(err.to_string().contains("not configured"));
    }
}
