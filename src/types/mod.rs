//! Shared types for the HTTP API.
//!
//! These types are used across the application for request/response handling
//! and internal data representation.

pub mod mood;
pub mod songs;

use serde::{Deserialize, Serialize};

pub use mood::*;
pub use songs::*;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(default)]
    pub catalog_ready: bool,
    #[serde(default)]
    pub uptime_s: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Configuration response (subset of config safe to expose)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub server: ServerInfo,
    pub catalog: CatalogInfo,
    pub search: SearchInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub api_url: String,
    pub credentials_configured: bool,
    pub connected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchInfo {
    pub default_market: String,
    pub english_market: String,
    pub page_limit: usize,
    pub target_songs: usize,
    pub max_candidates: usize,
    pub max_attempts: usize,
}
