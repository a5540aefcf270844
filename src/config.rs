// src/config.rs
use std::fmt::Debug;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const CONFIG_PATH_ENV: &str = "RELAY_CONFIG";
pub const BIND_ADDR_ENV: &str = "BIND_ADDR";
pub const DEFAULT_CONFIG_PATH: &str = "relay.json";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a tutor helping 6th grade students learn Scratch programming in simple Arabic.";
pub const DEFAULT_MAX_TOKENS: u32 = 250;

/// Settings file contents. Every field is optional.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub bind_addr: String,
    pub openai: OpenAiSettings,
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            openai: OpenAiSettings::default(),
        }
    }
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl Debug for OpenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Settings {
    /// Load settings from a JSON file, failing if it does not exist.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings JSON: {}", path.display()))
    }

    /// Load settings from a JSON file, using defaults when it is absent.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        tracing::info!("Loading settings from {}", path.display());
        Self::load_from_file(path)
    }

    /// Build the relay configuration, preferring a key taken from the environment.
    pub fn relay_config(&self, env_key: Option<String>) -> RelayConfig {
        RelayConfig {
            api_key: resolve_api_key(env_key, self.openai.api_key.as_deref()),
            endpoint: self.openai.endpoint.clone(),
            model: self.openai.model.clone(),
            system_prompt: self.openai.system_prompt.clone(),
            max_tokens: self.openai.max_tokens,
        }
    }
}

/// Environment first, then the settings file. Blank values count as missing.
pub fn resolve_api_key(env_value: Option<String>, configured: Option<&str>) -> Option<String> {
    env_value
        .filter(|k| !k.trim().is_empty())
        .or_else(|| {
            configured
                .filter(|k| !k.trim().is_empty())
                .map(str::to_string)
        })
}

/// Everything the relay needs for one outbound call, fixed at startup.
#[derive(Clone)]
pub struct RelayConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
}

impl RelayConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Settings::default().relay_config(None)
    }
}

impl Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
