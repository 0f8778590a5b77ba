// src/services/prompt.rs
use std::path::Path;

use anyhow::{Context, Result, bail};

const BUILTIN_PROMPT: &str = include_str!("../../prompts/system_prompt.txt");

/// The persona block sent as the system message. Grounds replies in the
/// portfolio profile and steers away from unrelated topics.
pub fn builtin() -> &'static str {
    BUILTIN_PROMPT.trim()
}

/// Load the prompt from `path` when given, else the built-in one.
pub fn load(path: Option<&Path>) -> Result<String> {
    let Some(path) = path else {
        return Ok(builtin().to_string());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading system prompt from {}", path.display()))?;
    let text = text.trim();
    if text.is_empty() {
        bail!("system prompt file {} is empty", path.display());
    }
    Ok(text.to_string())
}
