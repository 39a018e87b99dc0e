//! Feed assembly: fetch candidates and signals, rank, strip scores.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::FeedConfig;
use crate::models::{FeedPage, GeoPoint, UserSignals};
use crate::services::ranking::RankingEngine;
use crate::services::sources::{CandidateSource, UserSignalSource};

/// A single feed request.
#[derive(Debug, Clone)]
pub struct FeedRequest {
    /// Requesting user; `None` for anonymous browsing.
    pub viewer: Option<Uuid>,
    pub center: GeoPoint,
    /// Search radius; falls back to the configured default when absent.
    pub radius_km: Option<f64>,
    /// Requested page size, clamped to the configured maximum.
    pub limit: usize,
}

/// Builds personalized feed pages on top of pluggable data sources.
///
/// Failures degrade instead of propagating: a missing signal set ranks
/// the page anonymously, and a failed candidate fetch yields an empty
/// page. Callers always get a `FeedPage`.
pub struct FeedBuilder {
    candidates: Arc<dyn CandidateSource>,
    signals: Arc<dyn UserSignalSource>,
    engine: RankingEngine,
    config: FeedConfig,
}

impl FeedBuilder {
    pub fn new(
        candidates: Arc<dyn CandidateSource>,
        signals: Arc<dyn UserSignalSource>,
        engine: RankingEngine,
        config: FeedConfig,
    ) -> Self {
        Self {
            candidates,
            signals,
            engine,
            config,
        }
    }

    pub async fn build(&self, request: &FeedRequest) -> FeedPage {
        let limit = request.limit.min(self.config.max_page_size);
        if limit == 0 {
            return FeedPage::empty();
        }
        let radius_km = request.radius_km.unwrap_or(self.config.default_radius_km);

        // Candidates and signals come from independent stores.
        let (candidates, signals) = tokio::join!(
            self.candidates
                .nearby(request.center, radius_km, self.config.candidate_fetch_limit),
            self.fetch_signals(request.viewer),
        );

        let candidates = match candidates {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "Candidate fetch failed, returning empty feed");
                return FeedPage::empty();
            }
        };

        let total_candidates = candidates.len();
        let scored = self.engine.rank(candidates, &signals, Utc::now(), limit);
        let has_more = total_candidates > scored.len();

        info!(
            viewer = ?request.viewer,
            total_candidates,
            page_size = scored.len(),
            has_more,
            "Built feed page"
        );

        FeedPage {
            items: scored.into_iter().map(|s| s.into_item()).collect(),
            total_candidates,
            has_more,
        }
    }

    /// Resolve personalization signals, degrading to anonymous on any
    /// failure so the feed stays available.
    async fn fetch_signals(&self, viewer: Option<Uuid>) -> UserSignals {
        let Some(user_id) = viewer else {
            debug!("Anonymous viewer, skipping signal fetch");
            return UserSignals::anonymous();
        };
        match self.signals.signals_for(user_id).await {
            Ok(signals) => signals,
            Err(e) => {
                warn!(%user_id, error = %e, "Signal fetch failed, ranking anonymously");
                UserSignals::anonymous()
            }
        }
    }
}
