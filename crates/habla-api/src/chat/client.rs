use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ApiConfig, error::ApiError};

/// System prompt that turns the model into a patient English teacher
pub const TUTOR_PERSONA: &str =
    "Sos un profesor de inglés amable y explicativo. Corrige traducciones y explica los errores.";

// ─── Chat completion wire types ──────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

// ─── Client ──────────────────────────────────────────────────

/// Why the tutor could not answer
#[derive(Error, Debug)]
pub enum TutorError {
    #[error("no tutor API key configured")]
    MissingApiKey,
    #[error("tutor API request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("tutor API returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("malformed tutor API response: {0}")]
    MalformedResponse(#[source] reqwest::Error),
    #[error("tutor API returned no reply")]
    EmptyReply,
}

impl TutorError {
    /// Short label for logs and metrics
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "missing_api_key",
            Self::Transport(_) => "transport",
            Self::Upstream { .. } => "upstream",
            Self::MalformedResponse(_) => "malformed_response",
            Self::EmptyReply => "empty_reply",
        }
    }
}

/// Client for the chat-completion endpoint
#[derive(Clone, Debug)]
pub struct TutorClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl TutorClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.tutor_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/chat/completions",
                config.groq_base_url.trim_end_matches('/')
            ),
            api_key: config
                .groq_api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            model: config.tutor_model.clone(),
        })
    }

    /// Ask the tutor a question and return its reply text
    pub async fn ask(&self, message: &str) -> Result<String, TutorError> {
        let api_key = self.api_key.as_deref().ok_or(TutorError::MissingApiKey)?;

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: TUTOR_PERSONA,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(TutorError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            // Upstream error bodies are only used for logging
            let body = response.text().await.unwrap_or_default();
            return Err(TutorError::Upstream { status, body });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(TutorError::MalformedResponse)?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(TutorError::EmptyReply)
    }
}
