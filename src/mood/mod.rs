//! Mood classification from free text.
//!
//! A [`SentimentScorer`] produces a compound score in [-1, 1]; the score is
//! mapped onto a [`MoodLabel`] through the fixed bands in [`bands`].

pub mod bands;
mod vader;

pub use bands::{band_for_label, label_for_score, Edge, MoodBand, MoodLabel, MOOD_BANDS};
pub use vader::VaderScorer;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Source of compound sentiment scores.
pub trait SentimentScorer: Send + Sync {
    /// Compound score for `text`, in [-1, 1]. Empty text scores 0.0.
    fn score(&self, text: &str) -> f64;
}

/// Result of classifying one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Mood label
    pub label: MoodLabel,
    /// Keyword phrase for catalog queries
    pub keywords: String,
    /// Compound score the label was derived from
    pub score: f64,
}

/// Maps text to a mood through an injected scorer
#[derive(Clone)]
pub struct MoodClassifier {
    scorer: Arc<dyn SentimentScorer>,
}

impl MoodClassifier {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    pub fn classify(&self, text: &str) -> Classification {
        let score = self.scorer.score(text);
        let label = label_for_score(score);
        debug!(score, mood = %label, "Classified message");

        Classification {
            label,
            keywords: label.keywords().to_string(),
            score,
        }
    }
}

impl Default for MoodClassifier {
    fn default() -> Self {
        Self::new(Arc::new(VaderScorer::new()))
    }
}
