//! Translation scoring library for Habla
//!
//! This crate provides the text normalization and similarity scoring used to
//! grade a learner's translation against a reference translation.

mod feedback;
pub mod matcher;
pub mod normalize;

pub use feedback::FeedbackTier;
pub use matcher::SequenceMatcher;
pub use normalize::normalize;

/// Score a translation against a reference.
///
/// Both strings are normalized, compared with gestalt pattern matching and
/// the ratio is returned as a percentage rounded to two decimals.
///
/// # Examples
///
/// ```
/// use habla_score::similarity;
///
/// assert_eq!(similarity("El gato es negro.", "el gato es negro"), 100.0);
/// assert_eq!(similarity("gato", "pato"), 75.0);
/// ```
pub fn similarity(user_translation: &str, correct_translation: &str) -> f64 {
    let user: Vec<char> = normalize(user_translation).chars().collect();
    let correct: Vec<char> = normalize(correct_translation).chars().collect();

    round_to_hundredths(SequenceMatcher::new(&user, &correct).ratio() * 100.0)
}

/// Round to two decimals, resolving against the exact binary value of `value`
/// the way decimal formatting does.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
