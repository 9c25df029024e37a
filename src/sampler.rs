//! Final selection and shaping of songs.

use rand::seq::index;
use rand::Rng;

use crate::catalog::TrackHit;
use crate::types::{Platform, SongEntry};

/// Most songs returned per request
pub const MAX_SONGS: usize = 5;

const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

/// YouTube search URL for a track: spaces become `+`, apostrophes are dropped
pub fn youtube_search_url(name: &str, artist: &str) -> String {
    format!(
        "{YOUTUBE_SEARCH_URL}{}+{}",
        query_safe(name),
        query_safe(artist)
    )
}

fn query_safe(value: &str) -> String {
    value.replace(' ', "+").replace('\'', "")
}

impl SongEntry {
    /// Shape a candidate for the requested platform
    pub fn from_hit(hit: &TrackHit, platform: Platform) -> Self {
        Self {
            name: hit.name.clone(),
            artist: hit.artist.clone(),
            spotify: platform.wants_spotify().then(|| hit.url.clone()),
            youtube: platform
                .wants_youtube()
                .then(|| youtube_search_url(&hit.name, &hit.artist)),
        }
    }
}

/// Draw up to [`MAX_SONGS`] candidates uniformly without replacement, in
/// random order
pub fn sample<R>(candidates: &[TrackHit], platform: Platform, rng: &mut R) -> Vec<SongEntry>
where
    R: Rng + ?Sized,
{
    let amount = candidates.len().min(MAX_SONGS);
    if amount == 0 {
        return Vec::new();
    }

    index::sample(rng, candidates.len(), amount)
        .into_iter()
        .map(|i| SongEntry::from_hit(&candidates[i], platform))
        .collect()
}
