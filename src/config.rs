// src/config.rs
use std::{
    env::{self, VarError},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use anyhow::{Context, Result, bail};

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_UPSTREAM_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_API_KEY_VAR: &str = "GROQ_API_KEY";

/// Settings for the upstream chat-completion call.
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_string(),
            model: DEFAULT_UPSTREAM_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 512,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub site_dir: PathBuf,
    pub upstream: UpstreamConfig,
    /// Name of the environment variable holding the bearer credential.
    /// The value is looked up per request, never cached here.
    pub api_key_var: String,
    pub system_prompt_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            site_dir: PathBuf::from("public"),
            upstream: UpstreamConfig::default(),
            api_key_var: DEFAULT_API_KEY_VAR.to_string(),
            system_prompt_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let upstream = UpstreamConfig {
            url: var("UPSTREAM_URL")?.unwrap_or(defaults.upstream.url),
            model: var("UPSTREAM_MODEL")?.unwrap_or(defaults.upstream.model),
            temperature: parse_var("UPSTREAM_TEMPERATURE")?.unwrap_or(defaults.upstream.temperature),
            max_tokens: parse_var("UPSTREAM_MAX_TOKENS")?.unwrap_or(defaults.upstream.max_tokens),
            timeout: parse_var::<u64>("UPSTREAM_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream.timeout),
        };

        Ok(Self {
            bind_addr: var("BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            site_dir: var("SITE_DIR")?.map(PathBuf::from).unwrap_or(defaults.site_dir),
            upstream,
            api_key_var: var("API_KEY_VAR")?.unwrap_or(defaults.api_key_var),
            system_prompt_file: var("SYSTEM_PROMPT_FILE")?.map(PathBuf::from),
        })
    }
}

/// Unset is `None`; a value that is not valid UTF-8 is an error.
fn var(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(raw) => Ok(Some(raw)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => bail!("{name} is not valid UTF-8: {raw:?}"),
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = var(name)? else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .with_context(|| format!("invalid value for {name}: {raw:?}"))
}
