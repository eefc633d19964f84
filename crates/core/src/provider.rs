//! Chat-completion client for OpenAI-compatible endpoints.

use std::time::Duration;

use async_trait::async_trait;

use crate::{analysis::AnalysisError, settings::Settings};

/// One system + user exchange requesting a JSON-object reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
}

#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Returns the first choice's message content, or `None` when the
    /// endpoint answered without any.
    async fn complete(&self, request: ChatRequest) -> Result<Option<String>, AnalysisError>;

    fn model(&self) -> &str;
}

pub struct OpenAiCompatibleClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiCompatibleClient {
    /// Build a client from settings. Fails with `MissingCredential` when no
    /// API key is configured so nothing is sent unauthenticated.
    pub fn from_settings(settings: &Settings) -> Result<Self, AnalysisError> {
        if !settings.has_api_key() {
            return Err(AnalysisError::MissingCredential);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_url: chat_completions_url(&settings.base_url),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl ChatCompletion for OpenAiCompatibleClient {
    async fn complete(&self, request: ChatRequest) -> Result<Option<String>, AnalysisError> {
        tracing::info!(url = %self.api_url, model = %self.model, "Sending chat completion request");

        let response = self
            .http
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [
                    {
                        "role": "system",
                        "content": request.system,
                    },
                    {
                        "role": "user",
                        "content": request.user,
                    },
                ],
                "temperature": 0.3,
                "response_format": { "type": "json_object" },
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let response = response.json::<serde_json::Value>().await?;
        tracing::debug!(usage = %response["usage"], "Chat completion finished");

        Ok(extract_content(&response))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// `choices[0].message.content`, treating an empty string as absent.
pub fn extract_content(response: &serde_json::Value) -> Option<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .filter(|content| !content.trim().is_empty())
        .map(str::to_string)
}

fn chat_completions_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/chat/completions") {
        base.to_string()
    } else {
        format!("{}/chat/completions", base)
    }
}
