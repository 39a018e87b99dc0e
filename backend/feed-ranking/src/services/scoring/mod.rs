//! Per-term scoring functions for feed candidates.
//!
//! Every function here is pure: the clock is a parameter, nothing touches
//! the environment, and no input can make a term return a non-finite
//! value. The ranking engine composes these into a weighted sum.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::RankingWeights;
use crate::models::{CandidateItem, Favorite, ScoreBreakdown, ScoredItem, UserSignals};

/// Content older than this scores zero on recency (30 days).
pub const MAX_CONTENT_AGE_MS: i64 = 2_592_000_000;

/// Upper bound of the rating scale.
pub const RATING_SCALE: f64 = 5.0;

/// Endorsement-equivalent count at which social proof saturates.
pub const SOCIAL_PROOF_CAP: f64 = 20.0;

/// One referral counts as this many endorsements.
pub const REFERRAL_WEIGHT: f64 = 2.0;

/// Interest tags normalized once per ranking call instead of once per
/// candidate. Trimmed, lowercased, empties dropped.
#[derive(Debug, Clone, Default)]
pub(crate) struct PreparedInterests {
    tags: Vec<String>,
}

impl PreparedInterests {
    pub(crate) fn from_signals(signals: &UserSignals) -> Self {
        let tags = signals
            .interests
            .iter()
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();
        Self { tags }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Linear decay from 1.0 (posted just now) to 0.0 (30 days or older).
/// Missing timestamps read as very old; future timestamps clamp to "now".
pub fn recency_score(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match created_at {
        Some(created) => {
            let age_ms = (now - created).num_milliseconds().max(0);
            (1.0 - age_ms as f64 / MAX_CONTENT_AGE_MS as f64).max(0.0)
        }
        None => 0.0,
    }
}

/// Average rating normalized to [0, 1]. Unrated items score zero rather
/// than an assumed midpoint, so new items compete on recency instead of
/// fabricated trust. Out-of-range and non-finite inputs clamp.
pub fn trust_score(avg_rating: Option<f64>) -> f64 {
    match avg_rating {
        Some(rating) if rating.is_finite() => (rating / RATING_SCALE).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// Endorsements plus double-weighted referrals, saturating at the cap.
pub fn social_proof_score(endorsements: u32, referrals: u32) -> f64 {
    let weighted = endorsements as f64 + REFERRAL_WEIGHT * referrals as f64;
    (weighted / SOCIAL_PROOF_CAP).min(1.0)
}

/// Case-insensitive substring match of any interest tag against the
/// item's category and description text.
pub(crate) fn interest_match(item: &CandidateItem, interests: &PreparedInterests) -> bool {
    if interests.is_empty() {
        return false;
    }
    // Space joiner keeps a tag from matching across the field boundary.
    let haystack = format!("{} {}", item.category_label, item.reason_text).to_lowercase();
    interests.tags.iter().any(|tag| haystack.contains(tag))
}

fn favorite_applies(item: &CandidateItem, signals: &UserSignals) -> bool {
    signals.favorites.contains(&Favorite::post(item.id))
}

/// Score a single candidate against the user's signals.
pub(crate) fn score_candidate(
    item: CandidateItem,
    signals: &UserSignals,
    interests: &PreparedInterests,
    weights: &RankingWeights,
    now: DateTime<Utc>,
) -> ScoredItem {
    let breakdown = ScoreBreakdown {
        recency: weights.recency * recency_score(item.created_at, now),
        trust: weights.trust * trust_score(item.avg_rating),
        interest: if interest_match(&item, interests) {
            weights.interest
        } else {
            0.0
        },
        social: weights.social * social_proof_score(item.endorsement_count, item.referral_count),
        favorite: if favorite_applies(&item, signals) {
            weights.favorite_bonus
        } else {
            0.0
        },
    };
    let score = breakdown.total();

    debug!(
        item_id = %item.id,
        score,
        recency = breakdown.recency,
        trust = breakdown.trust,
        interest = breakdown.interest,
        social = breakdown.social,
        favorite = breakdown.favorite,
        "Scored candidate"
    );

    ScoredItem {
        item,
        score,
        breakdown,
    }
}
