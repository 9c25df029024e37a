use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the `MOODTUNES` prefix.
/// For example: `MOODTUNES_SERVER__PORT=5000`, `MOODTUNES_SEARCH__DEFAULT_MARKET=IN`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Spotify catalog configuration
    #[serde(default)]
    pub spotify: SpotifyConfig,

    /// Search and accumulation tuning
    #[serde(default)]
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl ServerConfig {
    /// Returns the socket address for binding the server
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Clone, Deserialize)]
pub struct SpotifyConfig {
    /// OAuth client id (client-credentials flow)
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Web API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Accounts service base URL (token endpoint)
    #[serde(default = "default_accounts_url")]
    pub accounts_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_s: u64,
}

// Keeps the secret out of logs.
impl std::fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .field("api_url", &self.api_url)
            .field("accounts_url", &self.accounts_url)
            .field("timeout_s", &self.timeout_s)
            .finish()
    }
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            api_url: default_api_url(),
            accounts_url: default_accounts_url(),
            timeout_s: default_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.spotify.com".to_string()
}

fn default_accounts_url() -> String {
    "https://accounts.spotify.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl SpotifyConfig {
    /// Both halves of the client credentials, if configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Some((id, secret)),
            _ => None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_s)
    }
}

/// Tunables for the query/accumulation loop.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    /// Market used for pool-mode and non-English direct queries
    #[serde(default = "default_market")]
    pub default_market: String,

    /// Market used for the English direct query
    #[serde(default = "default_english_market")]
    pub english_market: String,

    /// Results requested per search call
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,

    /// Accumulation stops early once this many candidates are held
    #[serde(default = "default_target_songs")]
    pub target_songs: usize,

    /// Hard cap on held candidates
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Attempt budget in pool mode
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_market: default_market(),
            english_market: default_english_market(),
            page_limit: default_page_limit(),
            target_songs: default_target_songs(),
            max_candidates: default_max_candidates(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_market() -> String {
    "IN".to_string()
}

fn default_english_market() -> String {
    "US".to_string()
}

fn default_page_limit() -> usize {
    10
}

fn default_target_songs() -> usize {
    5
}

fn default_max_candidates() -> usize {
    10
}

fn default_max_attempts() -> usize {
    8
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables should be prefixed with `MOODTUNES` and use
    /// double underscores for nested values:
    /// - `MOODTUNES_SERVER__PORT` -> server.port
    /// - `MOODTUNES_SPOTIFY__CLIENT_ID` -> spotify.client_id
    /// - `MOODTUNES_SEARCH__MAX_ATTEMPTS` -> search.max_attempts
    ///
    /// The bare `client_id` / `client_secret` variables are honoured as a
    /// fallback for the Spotify credentials.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("MOODTUNES")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app: AppConfig = config.try_deserialize()?;
        if app.spotify.client_id.is_none() {
            app.spotify.client_id = std::env::var("client_id").ok();
        }
        if app.spotify.client_secret.is_none() {
            app.spotify.client_secret = std::env::var("client_secret").ok();
        }
        Ok(app)
    }
}
