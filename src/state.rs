// src/state.rs
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::services::{prompt, upstream::UpstreamClient};

pub type SharedState = Arc<AppState>;

/// Where the upstream bearer credential comes from.
#[derive(Clone, Debug)]
pub enum Credential {
    /// Looked up in the process environment on every request.
    Env(String),
    Fixed(Option<String>),
}

impl Credential {
    pub fn resolve(&self) -> Option<String> {
        let value = match self {
            Credential::Env(var) => std::env::var(var).ok(),
            Credential::Fixed(value) => value.clone(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

pub struct AppState {
    pub upstream: UpstreamClient,
    pub system_prompt: String,
    pub credential: Credential,
}

impl AppState {
    pub fn new(upstream: UpstreamClient, system_prompt: impl Into<String>, credential: Credential) -> Self {
        Self {
            upstream,
            system_prompt: system_prompt.into(),
            credential,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let upstream = UpstreamClient::new(config.upstream.clone())?;
        let system_prompt = prompt::load(config.system_prompt_file.as_deref())?;
        Ok(Self::new(upstream, system_prompt, Credential::Env(config.api_key_var.clone())))
    }
}
