//! VADER compound sentiment scorer.

use vader_sentiment::SentimentIntensityAnalyzer;

use super::SentimentScorer;

/// Built-in scorer backed by the VADER lexicon and rule set.
///
/// Returns the `compound` polarity, already normalized into [-1, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderScorer;

impl VaderScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for VaderScorer {
    fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        // The analyzer only borrows the crate's static lexicons
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .filter(|score| score.is_finite())
            .map_or(0.0, |score| score.clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::{label_for_score, MoodLabel};

    fn label(text: &str) -> MoodLabel {
        label_for_score(VaderScorer::new().score(text))
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let scorer = VaderScorer::new();
        assert_eq!(scorer.score(""), 0.0);
        assert_eq!(scorer.score("   \n\t"), 0.0);
        assert_eq!(label("I am going to the store"), MoodLabel::Calm);
    }

    #[test]
    fn test_thrilled_and_excited_is_very_happy() {
        assert_eq!(label("I am thrilled and excited today!"), MoodLabel::VeryHappy);
    }

    #[test]
    fn test_everyday_positive_messages() {
        assert_eq!(label("This is the happiest day of my life"), MoodLabel::VeryHappy);
        assert_eq!(label("This is the best day ever, I love it!"), MoodLabel::VeryHappy);

        let score = VaderScorer::new().score("I got the job and I'm so excited!");
        assert!(score >= 0.1, "score was {score}");
    }

    #[test]
    fn test_everyday_negative_messages() {
        let score = VaderScorer::new().score("I'm feeling blue and gloomy");
        assert!(score <= -0.1, "score was {score}");

        assert_eq!(label("I am so sad and heartbroken"), MoodLabel::VerySad);
        assert_eq!(
            label("Everything is terrible and I hate this awful week"),
            MoodLabel::VerySad
        );
    }

    #[test]
    fn test_negation_flips_direction() {
        let scorer = VaderScorer::new();
        assert!(scorer.score("I am happy") > 0.0);
        assert!(scorer.score("I am not happy") < 0.0);
    }

    #[test]
    fn test_exclamation_increases_magnitude() {
        let scorer = VaderScorer::new();
        assert!(scorer.score("good!!!") > scorer.score("good"));
    }

    #[test]
    fn test_scores_stay_in_range() {
        let scorer = VaderScorer::new();
        for text in [
            "love love love best best great awesome amazing!!!",
            "hate worst awful terrible horrible devastated",
        ] {
            let score = scorer.score(text);
            assert!((-1.0..=1.0).contains(&score), "{text}: {score}");
        }
    }
}
