use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Deployment environment, read from `APP_ENV`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Server configuration, one field per environment variable
/// (`PORT` -> `port`, `GROQ_API_KEY` -> `groq_api_key`, ...)
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default, rename = "app_env")]
    pub env: Environment,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: PathBuf,
    /// Comma separated list, `*` allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
    /// Without a key every chat message gets the fallback reply
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default = "default_groq_base_url")]
    pub groq_base_url: String,
    #[serde(default = "default_tutor_model")]
    pub tutor_model: String,
    #[serde(default = "default_tutor_timeout_secs")]
    pub tutor_timeout_secs: u64,
    #[serde(default = "default_chat_replenish_secs")]
    pub chat_replenish_secs: u64,
    #[serde(default = "default_chat_rate_burst")]
    pub chat_rate_burst: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from("frontend")
}

fn default_allowed_origins() -> String {
    "*".to_string()
}

fn default_groq_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_tutor_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

const fn default_tutor_timeout_secs() -> u64 {
    30
}

const fn default_chat_replenish_secs() -> u64 {
    2
}

const fn default_chat_rate_burst() -> u32 {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            env: Environment::default(),
            host: default_host(),
            port: default_port(),
            frontend_dir: default_frontend_dir(),
            allowed_origins: default_allowed_origins(),
            groq_api_key: None,
            groq_base_url: default_groq_base_url(),
            tutor_model: default_tutor_model(),
            tutor_timeout_secs: default_tutor_timeout_secs(),
            chat_replenish_secs: default_chat_replenish_secs(),
            chat_rate_burst: default_chat_rate_burst(),
        }
    }
}

impl ApiConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_vars(std::env::vars())
    }

    /// Load the configuration from `(NAME, value)` pairs
    pub fn from_vars<I>(vars: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter(vars)?)
    }

    /// Allowed CORS origins, `None` when any origin is accepted
    pub fn parsed_allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            None
        } else {
            Some(origins)
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
