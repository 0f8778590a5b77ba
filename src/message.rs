// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// Incoming relay body. `message` stays untyped so a wrong type is reported
/// the same way as a missing field.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

impl ChatRequest {
    /// Parse a raw body and return the trimmed message.
    pub fn trimmed_message(body: &[u8]) -> Result<String, AppError> {
        let req: ChatRequest = serde_json::from_slice(body).map_err(|_| AppError::InvalidInput)?;
        match req.message {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            _ => Err(AppError::InvalidInput),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub reply: String,
}
