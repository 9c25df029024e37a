//! Mood labels and the score bands that select them.
//!
//! Bands are checked in table order and the first match wins. Together they
//! cover every finite score in [-1, 1] exactly once.

use serde::{Deserialize, Serialize};

/// Discrete mood derived from a compound sentiment score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLabel {
    VeryHappy,
    Happy,
    Calm,
    Sad,
    VerySad,
    /// Fallback after every band; no finite score reaches it.
    Angry,
}

impl MoodLabel {
    /// Stable identifier (`snake_case`)
    pub fn id(self) -> &'static str {
        match self {
            MoodLabel::VeryHappy => "very_happy",
            MoodLabel::Happy => "happy",
            MoodLabel::Calm => "calm",
            MoodLabel::Sad => "sad",
            MoodLabel::VerySad => "very_sad",
            MoodLabel::Angry => "angry",
        }
    }

    /// Display name returned to clients
    pub fn name(self) -> &'static str {
        match self {
            MoodLabel::VeryHappy => "Very Happy",
            MoodLabel::Happy => "Happy",
            MoodLabel::Calm => "Calm",
            MoodLabel::Sad => "Sad",
            MoodLabel::VerySad => "Very Sad",
            MoodLabel::Angry => "Angry",
        }
    }

    /// Keyword phrase used verbatim in catalog queries
    pub fn keywords(self) -> &'static str {
        match self {
            MoodLabel::VeryHappy => "party dance",
            MoodLabel::Happy => "happy feel good",
            MoodLabel::Calm => "soft acoustic",
            MoodLabel::Sad => "sad emotional",
            MoodLabel::VerySad => "heartbreak soulful",
            MoodLabel::Angry => "angry rock",
        }
    }

    pub fn all() -> &'static [MoodLabel] {
        &[
            MoodLabel::VeryHappy,
            MoodLabel::Happy,
            MoodLabel::Calm,
            MoodLabel::Sad,
            MoodLabel::VerySad,
            MoodLabel::Angry,
        ]
    }
}

impl std::fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One side of a band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Edge {
    Inclusive(f64),
    Exclusive(f64),
}

/// A contiguous score range mapped to a label
#[derive(Debug, Clone, Copy)]
pub struct MoodBand {
    pub label: MoodLabel,
    /// `None` means unbounded below
    pub lower: Option<Edge>,
    /// `None` means unbounded above
    pub upper: Option<Edge>,
}

impl MoodBand {
    /// Whether `score` falls inside this band. NaN is never inside.
    pub fn contains(&self, score: f64) -> bool {
        if score.is_nan() {
            return false;
        }
        let above_lower = match self.lower {
            None => true,
            Some(Edge::Inclusive(v)) => score >= v,
            Some(Edge::Exclusive(v)) => score > v,
        };
        let below_upper = match self.upper {
            None => true,
            Some(Edge::Inclusive(v)) => score <= v,
            Some(Edge::Exclusive(v)) => score < v,
        };
        above_lower && below_upper
    }
}

pub const BAND_VERY_HAPPY: MoodBand = MoodBand {
    label: MoodLabel::VeryHappy,
    lower: Some(Edge::Inclusive(0.5)),
    upper: None,
};

pub const BAND_HAPPY: MoodBand = MoodBand {
    label: MoodLabel::Happy,
    lower: Some(Edge::Inclusive(0.1)),
    upper: Some(Edge::Exclusive(0.5)),
};

pub const BAND_CALM: MoodBand = MoodBand {
    label: MoodLabel::Calm,
    lower: Some(Edge::Exclusive(-0.1)),
    upper: Some(Edge::Exclusive(0.1)),
};

pub const BAND_SAD: MoodBand = MoodBand {
    label: MoodLabel::Sad,
    lower: Some(Edge::Inclusive(-0.5)),
    upper: Some(Edge::Inclusive(-0.1)),
};

pub const BAND_VERY_SAD: MoodBand = MoodBand {
    label: MoodLabel::VerySad,
    lower: None,
    upper: Some(Edge::Exclusive(-0.5)),
};

/// All bands in evaluation order
pub const MOOD_BANDS: &[MoodBand] = &[
    BAND_VERY_HAPPY,
    BAND_HAPPY,
    BAND_CALM,
    BAND_SAD,
    BAND_VERY_SAD,
];

/// Label for a score; first matching band wins, `Angry` otherwise
pub fn label_for_score(score: f64) -> MoodLabel {
    MOOD_BANDS
        .iter()
        .find(|band| band.contains(score))
        .map(|band| band.label)
        .unwrap_or(MoodLabel::Angry)
}

/// Band that selects `label`, if any
pub fn band_for_label(label: MoodLabel) -> Option<&'static MoodBand> {
    MOOD_BANDS.iter().find(|band| band.label == label)
}
