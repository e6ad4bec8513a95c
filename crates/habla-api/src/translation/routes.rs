use axum::{Json, Router, routing::post};

use crate::{ApiState, metrics};

use super::{
    model::{Comparison, TranslationRequest},
    service::compare,
};

/// Create the translation practice routes
pub fn routes() -> Router<ApiState> {
    Router::new().route("/check_translation", post(check_translation))
}

/// Score the learner's translation and return feedback
async fn check_translation(Json(payload): Json<TranslationRequest>) -> Json<Comparison> {
    let comparison = compare(
        &payload.english,
        &payload.user_translation,
        &payload.correct_translation,
    );
    metrics::record_translation_check(comparison.tier);

    Json(comparison)
}
