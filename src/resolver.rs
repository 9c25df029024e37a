//! Message -> mood -> songs, end to end.

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::catalog::TrackSearch;
use crate::config::SearchSettings;
use crate::engine::Accumulator;
use crate::mood::MoodClassifier;
use crate::sampler;
use crate::types::{SongRequest, SongResponse};

/// Composes classification, accumulation and sampling.
///
/// Holds only read-only collaborators, so one instance serves all requests.
#[derive(Clone)]
pub struct MoodResolver {
    classifier: MoodClassifier,
    catalog: Arc<dyn TrackSearch>,
    settings: SearchSettings,
}

impl MoodResolver {
    pub fn new(
        classifier: MoodClassifier,
        catalog: Arc<dyn TrackSearch>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            classifier,
            catalog,
            settings,
        }
    }

    pub async fn resolve<R>(&self, request: &SongRequest, rng: &mut R) -> SongResponse
    where
        R: Rng + ?Sized,
    {
        let mood = self.classifier.classify(&request.message);

        let report = Accumulator::new(self.catalog.as_ref(), &self.settings)
            .accumulate(&mood.keywords, &request.language, rng)
            .await;

        let songs = sampler::sample(&report.candidates, request.platform, rng);

        info!(
            mood = %mood.label,
            language = %request.language,
            attempts = report.attempts,
            songs = songs.len(),
            "Resolved songs"
        );

        SongResponse {
            mood: mood.label.to_string(),
            songs,
        }
    }
}
