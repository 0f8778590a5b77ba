// src/services/upstream.rs
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{config::UpstreamConfig, error::AppError};

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [CompletionMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Single-shot client for an OpenAI-style chat-completion endpoint.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    http: Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Send the `(system, user)` pair once and return the trimmed reply.
    pub async fn complete(&self, api_key: &str, system: &str, user: &str) -> Result<String, AppError> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages: [
                CompletionMessage { role: "system", content: system },
                CompletionMessage { role: "user", content: user },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .http
            .post(&self.config.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "upstream request failed");
                AppError::Transport
            })?;

        let status = response.status();
        let raw = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "reading upstream body failed");
            AppError::Transport
        })?;

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&raw),
                "upstream API error"
            );
            return Err(AppError::UpstreamError);
        }

        extract_reply(&raw).ok_or_else(|| {
            tracing::warn!(bytes = raw.len(), "upstream body had no reply text");
            AppError::UpstreamEmpty
        })
    }
}

/// `choices[0].message.content`, trimmed, if present and non-blank.
fn extract_reply(raw: &[u8]) -> Option<String> {
    let parsed: CompletionResponse = serde_json::from_slice(raw).ok()?;
    let content = parsed.choices.into_iter().next()?.message?.content?;
    let trimmed = content.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
