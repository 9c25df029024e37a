//! Song resolution route handler.

use axum::extract::State;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::AppError;
use crate::types::{SongRequest, SongResponse};

use super::extractors::ApiBody;
use super::routes::Encoded;
use super::AppState;

/// POST /get_songs and POST /api/v1/songs
///
/// Classify the message and return up to five matching songs.
pub async fn get_songs(
    State(state): State<AppState>,
    ApiBody(format, req): ApiBody<SongRequest>,
) -> Result<Encoded<SongResponse>, AppError> {
    let resolver = state
        .resolver
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("Track catalog not configured".to_string()))?;

    debug!(language = %req.language, platform = ?req.platform, "Resolving songs");

    let mut rng = StdRng::from_os_rng();
    let response = resolver.resolve(&req, &mut rng).await;

    Ok(Encoded(format, response))
}
