//! External track catalog.
//!
//! The engine only sees the [`TrackSearch`] trait; [`SpotifyCatalog`] is the
//! production implementation.

pub mod languages;
mod spotify;

pub use languages::{normalize_language, pool_for, LanguageProfile, LANGUAGE_POOLS};
pub use spotify::SpotifyCatalog;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error type for catalog operations
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Catalog returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode catalog response: {0}")]
    Decode(String),
}

/// A ranked search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackHit {
    /// Track title
    pub name: String,
    /// First credited artist
    pub artist: String,
    /// Platform URL, unique per release
    pub url: String,
}

impl TrackHit {
    pub fn new(name: impl Into<String>, artist: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            url: url.into(),
        }
    }
}

/// Trait for track catalogs
#[async_trait]
pub trait TrackSearch: Send + Sync {
    /// Up to `limit` ranked tracks for `query` in `market`
    async fn search(
        &self,
        query: &str,
        limit: usize,
        market: &str,
    ) -> Result<Vec<TrackHit>, SearchError>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use super::*;

    type Responder = Box<dyn Fn(&str) -> Result<Vec<TrackHit>, SearchError> + Send + Sync>;

    /// A recorded `search` call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SearchCall {
        pub query: String,
        pub limit: usize,
        pub market: String,
    }

    /// Catalog double that answers from a closure and records every call
    pub struct ScriptedSearch {
        responder: Responder,
        calls: Mutex<Vec<SearchCall>>,
    }

    impl ScriptedSearch {
        pub fn new(
            responder: impl Fn(&str) -> Result<Vec<TrackHit>, SearchError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                responder: Box::new(responder),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Always returns the same page
        pub fn fixed(hits: Vec<TrackHit>) -> Self {
            Self::new(move |_| Ok(hits.clone()))
        }

        pub fn calls(&self) -> Vec<SearchCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TrackSearch for ScriptedSearch {
        async fn search(
            &self,
            query: &str,
            limit: usize,
            market: &str,
        ) -> Result<Vec<TrackHit>, SearchError> {
            self.calls.lock().unwrap().push(SearchCall {
                query: query.to_string(),
                limit,
                market: market.to_string(),
            });
            (self.responder)(query)
        }
    }
}
