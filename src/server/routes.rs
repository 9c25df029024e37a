//! HTTP route handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::types::{
    CatalogInfo, ConfigResponse, HealthResponse, HealthStatus, SearchInfo, ServerInfo,
};

use super::extractors::WireFormat;
use super::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Response encoded as JSON or `MessagePack`
pub struct Encoded<T>(pub WireFormat, pub T);

impl<T: serde::Serialize> IntoResponse for Encoded<T> {
    fn into_response(self) -> Response {
        match self.0 {
            WireFormat::Json => Json(self.1).into_response(),
            WireFormat::MsgPack => match rmp_serde::to_vec_named(&self.1) {
                Ok(bytes) => (
                    StatusCode::OK,
                    [("content-type", "application/msgpack")],
                    bytes,
                )
                    .into_response(),
                Err(e) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to serialize response: {e}"),
                )
                    .into_response(),
            },
        }
    }
}

/// Health check endpoint
///
/// GET /api/v1/health
pub async fn health(State(state): State<AppState>, format: WireFormat) -> Encoded<HealthResponse> {
    let catalog_ready = state.has_catalog();

    // Classification still works without a catalog
    let status = if catalog_ready {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    Encoded(
        format,
        HealthResponse {
            status,
            version: VERSION.to_string(),
            catalog_ready,
            uptime_s: state.uptime_seconds(),
        },
    )
}

/// Configuration endpoint
///
/// GET /api/v1/config
pub async fn config(State(state): State<AppState>, format: WireFormat) -> Encoded<ConfigResponse> {
    let config = &state.config;

    Encoded(
        format,
        ConfigResponse {
            server: ServerInfo {
                host: config.server.host.clone(),
                port: config.server.port,
            },
            catalog: CatalogInfo {
                api_url: config.spotify.api_url.clone(),
                credentials_configured: config.spotify.credentials().is_some(),
                connected: state.has_catalog(),
            },
            search: SearchInfo {
                default_market: config.search.default_market.clone(),
                english_market: config.search.english_market.clone(),
                page_limit: config.search.page_limit,
                target_songs: config.search.target_songs,
                max_candidates: config.search.max_candidates,
                max_attempts: config.search.max_attempts,
            },
        },
    )
}
