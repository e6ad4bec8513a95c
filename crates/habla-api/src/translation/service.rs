use habla_score::{FeedbackTier, similarity};

use super::model::Comparison;

/// Score a learner's translation against the reference.
///
/// Never fails: every pair of strings, empty ones included, gets a score.
/// `english` is only used as log context.
pub fn compare(english: &str, user_translation: &str, correct_translation: &str) -> Comparison {
    let score = similarity(user_translation, correct_translation);
    let tier = FeedbackTier::from_score(score);

    tracing::debug!(english, score, tier = tier.as_str(), "Scored translation");

    Comparison {
        score,
        tier,
        feedback: tier.message(),
        correct_translation: correct_translation.to_string(),
    }
}
