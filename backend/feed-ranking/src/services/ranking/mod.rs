//! Relevance ranking over candidate items.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::config::RankingWeights;
use crate::models::{CandidateItem, ScoredItem, UserSignals};
use crate::services::scoring::{score_candidate, PreparedInterests};

/// Scores and orders feed candidates by a weighted blend of recency,
/// trust, interest match, and social proof.
///
/// The engine is synchronous and side-effect free: the clock comes in as
/// an argument, identical inputs produce identical output, and no input
/// can make ranking fail. Callers decide how candidates are fetched and
/// what happens to the ordered result.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    weights: RankingWeights,
}

impl RankingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine with custom weights. Non-finite or negative
    /// weights are rejected with a warning and the defaults apply,
    /// keeping every produced score finite.
    pub fn with_weights(weights: RankingWeights) -> Self {
        match weights.validate() {
            Ok(()) => Self { weights },
            Err(e) => {
                warn!(error = %e, "Invalid ranking weights, falling back to defaults");
                Self::default()
            }
        }
    }

    /// Effective weights, after any fallback in [`Self::with_weights`].
    pub fn weights(&self) -> &RankingWeights {
        &self.weights
    }

    /// Rank `candidates` for the given user signals at time `now`, keeping
    /// at most `limit` items.
    ///
    /// Ties keep their input order, so a caller feeding candidates in a
    /// deterministic order gets a deterministic page back.
    pub fn rank(
        &self,
        candidates: Vec<CandidateItem>,
        signals: &UserSignals,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Vec<ScoredItem> {
        if candidates.is_empty() || limit == 0 {
            return Vec::new();
        }

        let input_count = candidates.len();
        let interests = PreparedInterests::from_signals(signals);

        let mut scored: Vec<ScoredItem> = candidates
            .into_iter()
            .map(|item| score_candidate(item, signals, &interests, &self.weights, now))
            .collect();

        // Stable sort keeps equal-score items in input order. Scores are
        // finite by construction, so the comparator never actually hits
        // the Equal fallback for NaN.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(limit);

        debug!(
            input_count,
            output_count = scored.len(),
            top_score = scored.first().map(|s| s.score),
            anonymous = signals.is_anonymous(),
            "Ranked feed candidates"
        );

        scored
    }
}
