use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    ApiConfig, cache::WordCache, chat::TutorClient, config::Environment, error::ApiError,
};

/// Shared application state, cloned into every handler
#[derive(Clone, Debug)]
pub struct ApiState {
    pub word_cache: Arc<WordCache>,
    pub tutor: TutorClient,
    pub environment: Environment,
}

impl ApiState {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        if config.groq_api_key.as_deref().is_none_or(|key| key.trim().is_empty()) {
            tracing::warn!("GROQ_API_KEY not set, the tutor chat will only return its fallback reply");
        }

        Ok(Self {
            word_cache: Arc::new(WordCache::new()),
            tutor: TutorClient::new(config)?,
            environment: config.env,
        })
    }
}

impl FromRef<ApiState> for Arc<WordCache> {
    fn from_ref(state: &ApiState) -> Self {
        Arc::clone(&state.word_cache)
    }
}

impl FromRef<ApiState> for TutorClient {
    fn from_ref(state: &ApiState) -> Self {
        state.tutor.clone()
    }
}
