//! API types for mood classification and the static lookup tables.
//!
//! This module contains request/response types for classifying a message
//! and listing the available moods and language pools.

use serde::{Deserialize, Serialize};

use crate::mood::{Edge, MoodLabel};

/// Request to classify a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodClassifyRequest {
    /// Text to classify; empty text classifies as calm
    #[serde(default)]
    pub text: String,
}

/// Response from mood classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodClassifyResponse {
    /// Display name
    pub mood: String,
    /// Label identifier
    pub label: MoodLabel,
    /// Keyword phrase used for catalog queries
    pub keywords: String,
    /// Compound score in [-1, 1]
    pub score: f64,
}

/// Info about a single mood definition
#[derive(Debug, Clone, Serialize)]
pub struct MoodInfo {
    pub id: String,
    pub name: String,
    pub keywords: String,
    /// Lower score bound; absent when unbounded or unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<Edge>,
    /// Upper score bound; absent when unbounded or unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<Edge>,
    /// Whether any finite score selects this mood
    pub reachable: bool,
}

/// Response listing available moods
#[derive(Debug, Clone, Serialize)]
pub struct ListMoodsResponse {
    pub moods: Vec<MoodInfo>,
}

/// Info about a language pool
#[derive(Debug, Clone, Serialize)]
pub struct LanguageInfo {
    pub id: String,
    pub tag: String,
    pub artist_count: usize,
}

/// Response listing language pools
#[derive(Debug, Clone, Serialize)]
pub struct ListLanguagesResponse {
    pub languages: Vec<LanguageInfo>,
    /// Languages searched directly instead of through a pool
    pub direct: Vec<String>,
}
