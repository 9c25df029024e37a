//! Query construction and candidate accumulation.
//!
//! A request runs in one of two modes:
//! - **pool**: the language has a curated artist pool. Each attempt anchors
//!   the query on a randomly picked artist and only keeps results credited
//!   to that artist. Attempts repeat until enough candidates are held or the
//!   attempt budget runs out.
//! - **direct**: no pool. A single keyword query is issued, with the English
//!   market for `english` and the default market otherwise.
//!
//! The loop is a small state machine: `Sampling` issues the next query,
//! `Validating` filters its page into the candidate set, `Done` ends it.

use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::catalog::{normalize_language, pool_for, LanguageProfile, TrackHit, TrackSearch};
use crate::config::SearchSettings;

/// Substrings that mark seasonal or novelty tracks
const SEASONAL_MARKERS: &[&str] = &["birthday", "christmas"];

/// How a request is turned into queries
#[derive(Debug, Clone)]
pub enum SearchMode {
    /// Artist-anchored queries over a language pool
    Pool(&'static LanguageProfile),
    /// One keyword query
    Direct { query: String, market: String },
}

impl SearchMode {
    /// Pick the mode for a raw language preference
    pub fn select(language: &str, keywords: &str, settings: &SearchSettings) -> Self {
        let language = normalize_language(language);
        if let Some(profile) = pool_for(&language) {
            return SearchMode::Pool(profile);
        }

        if language == "english" {
            SearchMode::Direct {
                query: format!("Top {keywords} hits"),
                market: settings.english_market.clone(),
            }
        } else {
            SearchMode::Direct {
                query: format!("{keywords} music"),
                market: settings.default_market.clone(),
            }
        }
    }

    pub fn is_pool(&self) -> bool {
        matches!(self, SearchMode::Pool(_))
    }
}

/// Query anchored on `artist`; empty parts are skipped
pub fn pool_query(artist: &str, tag: &str, keywords: &str) -> String {
    [artist, tag, keywords]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercased whitespace tokens of an artist name
fn artist_tokens(artist: &str) -> Vec<String> {
    artist.split_whitespace().map(str::to_lowercase).collect()
}

/// Whether `credited` contains at least one token of the queried artist
pub fn matches_anchor(anchor_tokens: &[String], credited: &str) -> bool {
    let credited = credited.to_lowercase();
    anchor_tokens.iter().any(|token| credited.contains(token.as_str()))
}

pub fn is_seasonal(track_name: &str) -> bool {
    let name = track_name.to_lowercase();
    SEASONAL_MARKERS.iter().any(|marker| name.contains(marker))
}

/// Outcome of one accumulation run
#[derive(Debug, Clone)]
pub struct AccumulationReport {
    /// Accepted candidates in acceptance order, unique by URL
    pub candidates: Vec<TrackHit>,
    /// Search calls made, failed ones included
    pub attempts: usize,
    /// Whether the pool strategy was used
    pub pool_mode: bool,
}

enum Phase {
    Sampling,
    Validating {
        page: Vec<TrackHit>,
        anchor: Option<&'static str>,
    },
    Done,
}

/// Candidate set under construction
struct Pool {
    candidates: Vec<TrackHit>,
    seen: HashSet<String>,
    attempts: usize,
}

impl Pool {
    fn new() -> Self {
        Self {
            candidates: Vec::new(),
            seen: HashSet::new(),
            attempts: 0,
        }
    }

    /// Filter one ranked page into the set, stopping at `cap`
    fn absorb(&mut self, page: Vec<TrackHit>, anchor: Option<&str>, cap: usize) {
        let anchor_tokens = anchor.map(artist_tokens);
        let mut rejected = 0usize;

        for hit in page {
            if self.candidates.len() >= cap {
                break;
            }
            if self.seen.contains(&hit.url) {
                continue;
            }
            if let Some(tokens) = &anchor_tokens {
                if !matches_anchor(tokens, &hit.artist) {
                    rejected += 1;
                    continue;
                }
            }
            if is_seasonal(&hit.name) {
                rejected += 1;
                continue;
            }

            self.seen.insert(hit.url.clone());
            self.candidates.push(hit);
        }

        debug!(
            held = self.candidates.len(),
            rejected,
            anchor = anchor.unwrap_or(""),
            "Validated result page"
        );
    }
}

/// Runs the query/accumulation loop against a catalog
pub struct Accumulator<'a> {
    catalog: &'a dyn TrackSearch,
    settings: &'a SearchSettings,
}

impl<'a> Accumulator<'a> {
    pub fn new(catalog: &'a dyn TrackSearch, settings: &'a SearchSettings) -> Self {
        Self { catalog, settings }
    }

    /// Collect candidates for `keywords` under the given language preference
    pub async fn accumulate<R>(
        &self,
        keywords: &str,
        language: &str,
        rng: &mut R,
    ) -> AccumulationReport
    where
        R: Rng + ?Sized,
    {
        let mode = SearchMode::select(language, keywords, self.settings);
        let mut pool = Pool::new();
        let mut phase = Phase::Sampling;

        loop {
            phase = match phase {
                Phase::Sampling => {
                    if self.finished(&pool, &mode) {
                        Phase::Done
                    } else {
                        self.next_page(&mode, keywords, &mut pool, rng).await
                    }
                }
                Phase::Validating { page, anchor } => {
                    pool.absorb(page, anchor, self.settings.max_candidates);
                    Phase::Sampling
                }
                Phase::Done => break,
            };
        }

        info!(
            candidates = pool.candidates.len(),
            attempts = pool.attempts,
            pool_mode = mode.is_pool(),
            "Accumulation finished"
        );

        AccumulationReport {
            candidates: pool.candidates,
            attempts: pool.attempts,
            pool_mode: mode.is_pool(),
        }
    }

    fn finished(&self, pool: &Pool, mode: &SearchMode) -> bool {
        let budget = match mode {
            SearchMode::Pool(_) => self.settings.max_attempts,
            SearchMode::Direct { .. } => 1,
        };
        pool.candidates.len() >= self.settings.target_songs || pool.attempts >= budget
    }

    /// Issue one query; a failed call yields an empty page
    async fn next_page<R>(
        &self,
        mode: &SearchMode,
        keywords: &str,
        pool: &mut Pool,
        rng: &mut R,
    ) -> Phase
    where
        R: Rng + ?Sized,
    {
        let (query, market, anchor) = match mode {
            SearchMode::Pool(profile) => {
                let Some(&artist) = profile.artists.choose(rng) else {
                    warn!(language = profile.id, "Language pool is empty");
                    return Phase::Done;
                };
                (
                    pool_query(artist, profile.tag, keywords),
                    self.settings.default_market.as_str(),
                    Some(artist),
                )
            }
            SearchMode::Direct { query, market } => (query.clone(), market.as_str(), None),
        };

        pool.attempts += 1;
        debug!(attempt = pool.attempts, %query, %market, "Searching catalog");

        let page = match self
            .catalog
            .search(&query, self.settings.page_limit, market)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, attempt = pool.attempts, %query, "Catalog search failed");
                Vec::new()
            }
        };

        Phase::Validating { page, anchor }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::languages::{BENGALI, LANGUAGE_POOLS};
    use crate::catalog::test_support::ScriptedSearch;
    use crate::catalog::SearchError;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn hit(name: &str, artist: &str, url: &str) -> TrackHit {
        TrackHit::new(name, artist, url)
    }

    /// Pool artist the query was anchored on
    fn anchored_artist(query: &str) -> &'static str {
        BENGALI
            .artists
            .iter()
            .copied()
            .find(|artist| query.starts_with(artist))
            .expect("query not anchored on a bengali artist")
    }

    #[tokio::test]
    async fn test_direct_mode_single_attempt() {
        let settings = SearchSettings::default();
        let catalog = ScriptedSearch::fixed(Vec::new());

        let report = Accumulator::new(&catalog, &settings)
            .accumulate("soft acoustic", "random", &mut rng())
            .await;

        assert!(report.candidates.is_empty());
        assert_eq!(report.attempts, 1);
        assert!(!report.pool_mode);

        let calls = catalog.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].query, "soft acoustic music");
        assert_eq!(calls[0].market, "IN");
        assert_eq!(calls[0].limit, 10);
    }

    #[tokio::test]
    async fn test_english_uses_english_market() {
        let settings = SearchSettings::default();
        let catalog = ScriptedSearch::fixed(vec![hit("Levitating", "Dua Lipa", "u1")]);

        let report = Accumulator::new(&catalog, &settings)
            .accumulate("party dance", " English ", &mut rng())
            .await;

        assert_eq!(report.candidates.len(), 1);
        let calls = catalog.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].query, "Top party dance hits");
        assert_eq!(calls[0].market, "US");
    }

    #[tokio::test]
    async fn test_direct_mode_failure_is_empty() {
        let settings = SearchSettings::default();
        let catalog = ScriptedSearch::new(|_| {
            Err(SearchError::Api {
                status: 503,
                message: "down".to_string(),
            })
        });

        let report = Accumulator::new(&catalog, &settings)
            .accumulate("sad emotional", "random", &mut rng())
            .await;

        assert!(report.candidates.is_empty());
        assert_eq!(catalog.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_pool_mode_rejects_unrelated_artists() {
        let settings = SearchSettings::default();
        let catalog = ScriptedSearch::fixed(vec![
            hit("Song A", "Taylor Swift", "a"),
            hit("Song B", "Ed Sheeran", "b"),
        ]);

        let report = Accumulator::new(&catalog, &settings)
            .accumulate("heartbreak soulful", "bengali", &mut rng())
            .await;

        assert!(report.candidates.is_empty());
        assert_eq!(report.attempts, 8);
        assert!(report.pool_mode);

        let calls = catalog.calls();
        assert_eq!(calls.len(), 8);
        for call in calls {
            let artist = anchored_artist(&call.query);
            assert_eq!(call.query, format!("{artist} Bangla heartbreak soulful"));
            assert_eq!(call.market, "IN");
        }
    }

    #[tokio::test]
    async fn test_pool_mode_stops_once_target_reached() {
        let settings = SearchSettings::default();
        let counter = AtomicUsize::new(0);
        let catalog = ScriptedSearch::new(move |query| {
            let artist = anchored_artist(query);
            let page = (0..3)
                .map(|_| {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    hit(&format!("Track {n}"), artist, &format!("url-{n}"))
                })
                .collect();
            Ok(page)
        });

        let report = Accumulator::new(&catalog, &settings)
            .accumulate("happy feel good", "  BENGALI ", &mut rng())
            .await;

        assert_eq!(report.attempts, 2);
        assert_eq!(report.candidates.len(), 6);
        assert_eq!(catalog.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_pool_mode_continues_after_failures() {
        let settings = SearchSettings::default();
        let counter = AtomicUsize::new(0);
        let catalog = ScriptedSearch::new(move |query| {
            let call = counter.fetch_add(1, Ordering::SeqCst);
            if call < 3 {
                return Err(SearchError::Auth("expired".to_string()));
            }
            let artist = anchored_artist(query);
            Ok((0..5)
                .map(|i| hit(&format!("T{call}-{i}"), artist, &format!("u{call}-{i}")))
                .collect())
        });

        let report = Accumulator::new(&catalog, &settings)
            .accumulate("sad emotional", "bengali", &mut rng())
            .await;

        assert_eq!(report.attempts, 4);
        assert_eq!(report.candidates.len(), 5);
    }

    #[tokio::test]
    async fn test_candidates_capped_at_max() {
        let settings = SearchSettings::default();
        let page = (0..15)
            .map(|i| hit(&format!("Track {i}"), "Anyone", &format!("u{i}")))
            .collect();
        let catalog = ScriptedSearch::fixed(page);

        let report = Accumulator::new(&catalog, &settings)
            .accumulate("party dance", "random", &mut rng())
            .await;

        assert_eq!(report.candidates.len(), 10);
        assert_eq!(report.candidates[0].url, "u0");
        assert_eq!(report.candidates[9].url, "u9");
    }

    #[tokio::test]
    async fn test_duplicate_urls_are_dropped_across_attempts() {
        let settings = SearchSettings::default();
        let catalog = ScriptedSearch::new(|query| {
            let artist = anchored_artist(query);
            Ok(vec![
                hit("One", artist, "same-1"),
                hit("One (dup)", artist, "same-1"),
                hit("Two", artist, "same-2"),
            ])
        });

        let report = Accumulator::new(&catalog, &settings)
            .accumulate("soft acoustic", "bengali", &mut rng())
            .await;

        assert_eq!(report.attempts, 8);
        let urls: Vec<_> = report.candidates.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["same-1", "same-2"]);
        assert_eq!(report.candidates[0].name, "One");
    }

    #[tokio::test]
    async fn test_seasonal_tracks_are_rejected() {
        let settings = SearchSettings::default();
        let catalog = ScriptedSearch::fixed(vec![
            hit("Happy Birthday To You", "Band", "a"),
            hit("A CHRISTMAS Carol", "Band", "b"),
            hit("Christmastime", "Band", "c"),
            hit("Good Day", "Band", "d"),
        ]);

        let report = Accumulator::new(&catalog, &settings)
            .accumulate("happy feel good", "random", &mut rng())
            .await;

        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].name, "Good Day");
    }

    #[test]
    fn test_pool_query_skips_empty_tag() {
        assert_eq!(
            pool_query("Arijit Singh", "", "sad emotional"),
            "Arijit Singh sad emotional"
        );
        assert_eq!(
            pool_query("Anupam Roy", "Bangla", "soft acoustic"),
            "Anupam Roy Bangla soft acoustic"
        );
    }

    #[test]
    fn test_matches_anchor() {
        let tokens = artist_tokens("Anupam Roy");
        assert!(matches_anchor(&tokens, "ANUPAM ROY"));
        assert!(matches_anchor(&tokens, "Roy Brothers"));
        assert!(matches_anchor(&tokens, "Anupam Roy, Shreya Ghoshal"));
        assert!(!matches_anchor(&tokens, "Arijit Singh"));
        assert!(!matches_anchor(&[], "Anyone"));
    }

    #[test]
    fn test_pool_anchors_reject_unrelated_artists() {
        let unrelated = ["Taylor Swift", "Apocalyptica", "The Weeknd", "Coldplay", "Ed Sheeran"];
        for profile in LANGUAGE_POOLS {
            for artist in profile.artists {
                let tokens = artist_tokens(artist);
                for credited in unrelated {
                    assert!(
                        !matches_anchor(&tokens, credited),
                        "{artist} anchored {credited}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_mode_selection() {
        let settings = SearchSettings::default();
        assert!(SearchMode::select("hindi", "x", &settings).is_pool());
        assert!(SearchMode::select(" Punjabi", "x", &settings).is_pool());
        assert!(!SearchMode::select("random", "x", &settings).is_pool());
        assert!(!SearchMode::select("french", "x", &settings).is_pool());

        match SearchMode::select("french", "sad emotional", &settings) {
            SearchMode::Direct { query, market } => {
                assert_eq!(query, "sad emotional music");
                assert_eq!(market, "IN");
            }
            SearchMode::Pool(_) => panic!("expected direct mode"),
        }
    }
}
