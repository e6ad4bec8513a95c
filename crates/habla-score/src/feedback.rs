use serde::Serialize;

/// Qualitative feedback for a translation score.
///
/// Tiers are ordered from best to worst and bounded by fixed thresholds:
///
/// * score > 90: [`FeedbackTier::Excellent`]
/// * 60 < score ≤ 90: [`FeedbackTier::Good`]
/// * score ≤ 60: [`FeedbackTier::Different`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    /// Excellent translation
    Excellent,
    /// Good, could improve
    Good,
    /// Quite different, review needed
    Different,
}

impl FeedbackTier {
    /// Scores strictly above this are excellent.
    pub const EXCELLENT_ABOVE: f64 = 90.0;
    /// Scores strictly above this (and not excellent) are good.
    pub const GOOD_ABOVE: f64 = 60.0;

    /// Map a 0-100 score to its tier.
    pub fn from_score(score: f64) -> Self {
        if score > Self::EXCELLENT_ABOVE {
            Self::Excellent
        } else if score > Self::GOOD_ABOVE {
            Self::Good
        } else {
            Self::Different
        }
    }

    /// Stable identifier, also used as the metrics label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Different => "different",
        }
    }

    /// Learner-facing feedback line.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Excellent => "✅ Excelente traducción.",
            Self::Good => "🟡 Bastante bien, aunque podrías mejorar.",
            Self::Different => "❌ Bastante diferente, repasá la frase.",
        }
    }
}
