//! Mood classification and lookup-table route handlers.

use axum::extract::State;

use crate::catalog::LANGUAGE_POOLS;
use crate::mood::{band_for_label, MoodLabel};
use crate::types::{
    LanguageInfo, ListLanguagesResponse, ListMoodsResponse, MoodClassifyRequest,
    MoodClassifyResponse, MoodInfo,
};

use super::extractors::{ApiBody, WireFormat};
use super::routes::Encoded;
use super::AppState;

/// POST /api/v1/mood/classify
///
/// Classify a message without searching the catalog.
pub async fn classify_mood(
    State(state): State<AppState>,
    ApiBody(format, req): ApiBody<MoodClassifyRequest>,
) -> Encoded<MoodClassifyResponse> {
    let classification = state.classifier.classify(&req.text);

    Encoded(
        format,
        MoodClassifyResponse {
            mood: classification.label.to_string(),
            label: classification.label,
            keywords: classification.keywords,
            score: classification.score,
        },
    )
}

/// GET /api/v1/mood/list
///
/// List all mood labels with their keywords and score bands.
pub async fn list_moods(format: WireFormat) -> Encoded<ListMoodsResponse> {
    let moods = MoodLabel::all()
        .iter()
        .map(|&label| {
            let band = band_for_label(label);
            MoodInfo {
                id: label.id().to_string(),
                name: label.name().to_string(),
                keywords: label.keywords().to_string(),
                lower: band.and_then(|b| b.lower),
                upper: band.and_then(|b| b.upper),
                reachable: band.is_some(),
            }
        })
        .collect();

    Encoded(format, ListMoodsResponse { moods })
}

/// GET /api/v1/languages
///
/// List the languages with curated artist pools.
pub async fn list_languages(format: WireFormat) -> Encoded<ListLanguagesResponse> {
    let languages = LANGUAGE_POOLS
        .iter()
        .map(|profile| LanguageInfo {
            id: profile.id.to_string(),
            tag: profile.tag.to_string(),
            artist_count: profile.artists.len(),
        })
        .collect();

    Encoded(
        format,
        ListLanguagesResponse {
            languages,
            direct: vec!["english".to_string(), "random".to_string()],
        },
    )
}
