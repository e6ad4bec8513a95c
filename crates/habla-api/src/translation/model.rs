use habla_score::FeedbackTier;
use serde::{Deserialize, Serialize};

/// A learner's attempt at translating an English sentence
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslationRequest {
    /// Source sentence, shown to the learner but not scored
    pub english: String,
    /// What the learner typed
    pub user_translation: String,
    /// Reference translation
    pub correct_translation: String,
}

/// Result of scoring a translation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Similarity percentage, two decimals
    pub score: f64,
    pub tier: FeedbackTier,
    /// Learner-facing text for `tier`
    pub feedback: &'static str,
    /// Echo of the reference translation
    pub correct_translation: String,
}
