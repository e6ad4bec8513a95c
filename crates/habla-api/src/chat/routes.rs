use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use tower_governor::GovernorError;

use crate::{ApiConfig, ApiState, error::ApiError, metrics, middleware::rate_limit};

use super::TutorClient;

/// Reply sent whenever the tutor API cannot be reached or answers garbage
pub const FALLBACK_REPLY: &str =
    "❌ Error al conectar con la IA. Verifica tu API Key o tu conexión a internet.";

/// Reply sent to a client that exceeded its chat quota
pub const RATE_LIMITED_REPLY: &str =
    "⏳ Estás enviando muchos mensajes seguidos. Esperá unos segundos y volvé a intentar.";

/// Create the tutor chat routes, rate limited per client IP
pub fn routes(config: &ApiConfig) -> Result<Router<ApiState>, ApiError> {
    let router = Router::new().route("/chat", post(chat));

    rate_limit::apply_rate_limit(
        router,
        config.chat_replenish_secs,
        config.chat_rate_burst,
        chat_rejected,
    )
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Debug, Serialize)]
struct ChatReply {
    reply: String,
}

/// Forward the learner's message to the tutor
async fn chat(State(tutor): State<TutorClient>, Json(payload): Json<ChatRequest>) -> Json<ChatReply> {
    let reply = match tutor.ask(&payload.message).await {
        Ok(reply) => {
            metrics::record_tutor_request("success");
            reply
        }
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), "Tutor request failed");
            metrics::record_tutor_request(e.kind());
            FALLBACK_REPLY.to_string()
        }
    };

    Json(ChatReply { reply })
}

/// Answer a rejected chat request in the usual reply shape, keeping the
/// limiter's `retry-after` headers
fn chat_rejected(error: GovernorError) -> Response {
    let (reply, headers) = match error {
        GovernorError::TooManyRequests { wait_time, headers } => {
            tracing::warn!(wait_time, "Chat rate limit exceeded");
            metrics::record_tutor_request("rate_limited");
            (RATE_LIMITED_REPLY, headers)
        }
        other => {
            tracing::error!(error = %other, "Chat rate limiter rejected request");
            metrics::record_tutor_request("rate_limiter_error");
            (FALLBACK_REPLY, None)
        }
    };

    let mut response = Json(ChatReply {
        reply: reply.to_string(),
    })
    .into_response();
    if let Some(headers) = headers {
        response.headers_mut().extend(headers);
    }
    response
}
