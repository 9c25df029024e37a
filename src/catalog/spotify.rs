//! Spotify Web API catalog using the client-credentials flow.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{SearchError, TrackHit, TrackSearch};
use crate::config::SpotifyConfig;

/// Tokens are refreshed this long before Spotify says they expire
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Largest page the search endpoint accepts
const MAX_PAGE: usize = 50;

struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: Option<TrackPage>,
}

#[derive(Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<Option<TrackItem>>,
}

#[derive(Deserialize)]
struct TrackItem {
    name: String,
    #[serde(default)]
    artists: Vec<ArtistRef>,
    #[serde(default)]
    external_urls: ExternalUrls,
}

#[derive(Deserialize)]
struct ArtistRef {
    name: String,
}

#[derive(Default, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

impl TrackItem {
    /// Tracks without a credited artist or a Spotify URL are unusable
    fn into_hit(self) -> Option<TrackHit> {
        let artist = self.artists.into_iter().next()?.name;
        let url = self.external_urls.spotify.filter(|u| !u.is_empty())?;
        Some(TrackHit {
            name: self.name,
            artist,
            url,
        })
    }
}

/// Track search backed by the Spotify Web API
pub struct SpotifyCatalog {
    client: Client,
    api_url: String,
    accounts_url: String,
    client_id: String,
    client_secret: String,
    token: RwLock<Option<AccessToken>>,
}

impl SpotifyCatalog {
    /// Build a catalog client; fails when credentials are missing
    pub fn from_config(config: &SpotifyConfig) -> Result<Self, SearchError> {
        let (client_id, client_secret) = config
            .credentials()
            .ok_or_else(|| SearchError::Auth("Spotify client credentials not configured".into()))?;

        let client = Client::builder()
            .user_agent(concat!("mood-tunes/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            accounts_url: config.accounts_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token: RwLock::new(None),
        })
    }

    /// Current bearer token, fetching a new one when missing or stale
    async fn access_token(&self) -> Result<String, SearchError> {
        {
            let guard = self.token.read().await;
            if let Some(token) = guard.as_ref().filter(|t| t.is_fresh()) {
                return Ok(token.value.clone());
            }
        }

        let mut guard = self.token.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(token) = guard.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<AccessToken, SearchError> {
        let url = format!("{}/api/token", self.accounts_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Auth(format!("token request returned {status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        info!(expires_in = token.expires_in, "Obtained Spotify access token");

        Ok(AccessToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }

    async fn invalidate_token(&self) {
        *self.token.write().await = None;
    }
}

#[async_trait]
impl TrackSearch for SpotifyCatalog {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        market: &str,
    ) -> Result<Vec<TrackHit>, SearchError> {
        let token = self.access_token().await?;
        let limit = limit.clamp(1, MAX_PAGE).to_string();
        let url = format!("{}/v1/search", self.api_url);

        debug!(%query, %market, "Searching Spotify");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", limit.as_str()),
                ("market", market),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Spotify rejected the access token, dropping it");
            self.invalidate_token().await;
            return Err(SearchError::Auth("access token rejected".to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        Ok(body
            .tracks
            .map(|page| page.items.into_iter().flatten().filter_map(TrackItem::into_hit).collect())
            .unwrap_or_default())
    }
}
