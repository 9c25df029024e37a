//! HTTP server setup and routing.

mod extractors;
mod mood;
mod routes;
mod songs;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::catalog::TrackSearch;
use crate::config::AppConfig;
use crate::mood::MoodClassifier;
use crate::resolver::MoodResolver;

pub use extractors::{ApiBody, WireFormat};
pub use routes::Encoded;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Classifier used by the standalone classification endpoint
    pub classifier: MoodClassifier,
    /// Full pipeline; absent when no catalog is configured
    pub resolver: Option<Arc<MoodResolver>>,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    /// State with the built-in scorer and no catalog
    pub fn new(config: AppConfig) -> Self {
        Self::with_components(config, MoodClassifier::default(), None)
    }

    /// State with the built-in scorer and the given catalog
    pub fn with_catalog(config: AppConfig, catalog: Arc<dyn TrackSearch>) -> Self {
        Self::with_components(config, MoodClassifier::default(), Some(catalog))
    }

    pub fn with_components(
        config: AppConfig,
        classifier: MoodClassifier,
        catalog: Option<Arc<dyn TrackSearch>>,
    ) -> Self {
        let resolver = catalog.map(|catalog| {
            Arc::new(MoodResolver::new(
                classifier.clone(),
                catalog,
                config.search.clone(),
            ))
        });

        Self {
            config: Arc::new(config),
            classifier,
            resolver,
            started_at: Instant::now(),
        }
    }

    /// Check if a catalog is available for song resolution
    pub fn has_catalog(&self) -> bool {
        self.resolver.is_some()
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Creates the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(routes::health))
        .route("/config", get(routes::config))
        .route("/songs", post(songs::get_songs))
        .route("/mood/classify", post(mood::classify_mood))
        .route("/mood/list", get(mood::list_moods))
        .route("/languages", get(mood::list_languages));

    Router::new()
        // Legacy path used by the browser front-end
        .route("/get_songs", post(songs::get_songs))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
