// src/client/relay.rs
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// How one exchange with the relay ended, as far as the widget can tell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayOutcome {
    Reply(String),
    /// A response arrived but carried no usable reply; holds the relay's
    /// `error` text when it sent one.
    Rejected(Option<String>),
    /// No response at all.
    Unreachable,
}

#[async_trait]
pub trait Relay: Send + Sync {
    async fn send(&self, message: &str) -> RelayOutcome;
}

#[async_trait]
impl<T: Relay + ?Sized> Relay for Arc<T> {
    async fn send(&self, message: &str) -> RelayOutcome {
        (**self).send(message).await
    }
}

#[derive(Deserialize, Default)]
struct RelayBody {
    reply: Option<String>,
    error: Option<String>,
}

/// Talks to `POST <base>/api/chat` over HTTP.
#[derive(Clone, Debug)]
pub struct HttpRelay {
    http: Client,
    endpoint: String,
}

impl HttpRelay {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Relay for HttpRelay {
    async fn send(&self, message: &str) -> RelayOutcome {
        let response = match self
            .http
            .post(&self.endpoint)
            .json(&json!({ "message": message }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, endpoint = %self.endpoint, "chat relay unreachable");
                return RelayOutcome::Unreachable;
            }
        };

        let ok = response.status().is_success();
        let body: RelayBody = response.json().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "chat relay sent an unreadable body");
            RelayBody::default()
        });

        match body.reply.filter(|r| !r.is_empty()) {
            Some(reply) if ok => RelayOutcome::Reply(reply),
            _ => RelayOutcome::Rejected(body.error.filter(|e| !e.is_empty())),
        }
    }
}
