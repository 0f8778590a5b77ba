// src/client/widget.rs
use std::{fmt::Debug, sync::Arc};

use tokio::sync::RwLock;

use super::{
    relay::Relay,
    session::{ChatMessage, ChatSession, ClickTarget, Effect},
};

/// Owns the widget's session and drives it against a relay. The session
/// lock is never held across the relay call.
pub struct ChatWidget<R> {
    session: Arc<RwLock<ChatSession>>,
    relay: Arc<R>,
}

impl<R> Clone for ChatWidget<R> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            relay: Arc::clone(&self.relay),
        }
    }
}

impl<R> Debug for ChatWidget<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidget").finish_non_exhaustive()
    }
}

impl<R: Relay> ChatWidget<R> {
    pub fn new(relay: R, contact_email: impl Into<String>) -> Self {
        Self {
            session: Arc::new(RwLock::new(ChatSession::new(contact_email))),
            relay: Arc::new(relay),
        }
    }

    pub async fn toggle(&self) -> Option<Effect> {
        self.session.write().await.toggle()
    }

    pub async fn close(&self) {
        self.session.write().await.close();
    }

    pub async fn click(&self, target: ClickTarget) {
        self.session.write().await.click(target);
    }

    pub async fn type_text(&self, text: impl Into<String>) {
        self.session.write().await.set_input(text);
    }

    /// Returns the post-reply effect when the key submitted a message.
    pub async fn key_down(&self, key: &str, shift: bool) -> Option<Effect> {
        if ChatSession::is_submit_key(key, shift) {
            self.send().await
        } else {
            None
        }
    }

    /// Run one exchange to completion. `None` means nothing was sent.
    pub async fn send(&self) -> Option<Effect> {
        let message = self.session.write().await.begin_send()?;
        tracing::debug!(chars = message.chars().count(), "sending chat message");

        let outcome = self.relay.send(&message).await;
        self.session.write().await.resolve(outcome)
    }

    pub async fn is_open(&self) -> bool {
        self.session.read().await.is_open()
    }

    pub async fn is_awaiting_reply(&self) -> bool {
        self.session.read().await.is_awaiting_reply()
    }

    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.session.read().await.transcript().to_vec()
    }

    pub async fn snapshot(&self) -> ChatSession {
        self.session.read().await.clone()
    }
}
