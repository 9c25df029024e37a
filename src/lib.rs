//! Mood Tunes
//!
//! Turns a free-text message into a mood label and a small, randomized set
//! of matching tracks from an external catalog, optionally anchored to the
//! artists of a preferred language.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod mood;
pub mod resolver;
pub mod sampler;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, Result};

pub use catalog::{SearchError, TrackHit, TrackSearch};
pub use mood::{Classification, VaderScorer, MoodClassifier, MoodLabel, SentimentScorer};
pub use resolver::MoodResolver;
