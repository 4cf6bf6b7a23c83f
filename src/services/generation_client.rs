use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One chat-completion request. `force_json` asks the API to constrain the
/// response to a JSON object; hint calls leave it off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub force_json: bool,
}

/// Boundary to the external text-generation API. A single attempt, no
/// retries; callers own degradation policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn complete(&self, request: GenerationRequest) -> AppResult<String>;
}

pub struct OpenAiGenerationClient {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenAiGenerationClient {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.generation_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.generation_api_key.clone(),
            base_url: config.generation_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl GenerationClient for OpenAiGenerationClient {
    async fn complete(&self, request: GenerationRequest) -> AppResult<String> {
        let mut payload = json!({
            "model": request.model,
            "messages": request.messages,
        });

        if let Some(temperature) = request.temperature {
            payload["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = request.max_tokens {
            payload["max_tokens"] = json!(max_tokens);
        }
        if request.force_json {
            payload["response_format"] = json!({ "type": "json_object" });
        }

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "generation API returned {}: {}",
                status, body
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                AppError::Upstream("generation API response is missing message content".to_string())
            })?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_constructors() {
        let system = ChatMessage::system("be terse");
        let user = ChatMessage::user("hello");

        assert_eq!(system.role, "system");
        assert_eq!(user.role, "user");
        assert_eq!(user.content, "hello");
    }

    #[test]
    fn test_client_strips_trailing_slash_from_base_url() {
        let mut config = Config::test_config();
        config.generation_base_url = "https://api.openai.com/v1/".to_string();

        let client =
            OpenAiGenerationClient::from_config(&config).expect("client should build");
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }
}
