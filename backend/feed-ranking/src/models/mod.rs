use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Geographic point. Carried through ranking untouched; proximity is the
/// candidate source's concern, not the engine's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Content kinds that can appear in a feed or a favorites list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Recommendation post ("someone vouches for this helper/shop").
    Post,
    /// Donation request.
    Donation,
    /// Classified listing.
    Listing,
    /// Helper profile.
    Helper,
}

impl ItemKind {
    /// Stable snake_case name, matching the serde representation. For
    /// log fields and storage keys that want the name without a serde
    /// round-trip.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Post => "post",
            ItemKind::Donation => "donation",
            ItemKind::Listing => "listing",
            ItemKind::Helper => "helper",
        }
    }
}

/// A saved/favorited item reference, keyed by kind and id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Favorite {
    pub kind: ItemKind,
    pub id: Uuid,
}

impl Favorite {
    pub fn new(kind: ItemKind, id: Uuid) -> Self {
        Self { kind, id }
    }

    /// Saved recommendation post. Only this kind grants the ranking bonus.
    pub fn post(id: Uuid) -> Self {
        Self::new(ItemKind::Post, id)
    }
}

/// Candidate content item as supplied by the candidate source.
///
/// Optional fields default to their neutral value rather than failing the
/// request: a missing timestamp reads as "very old", a missing rating as
/// "unrated", missing counters as zero. Counters are unsigned so negative
/// counts cannot get past this boundary at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateItem {
    pub id: Uuid,
    /// Content owner; `None` for anonymous sources.
    #[serde(default)]
    pub author_id: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Free-text category/classification, matched against interests.
    #[serde(default)]
    pub category_label: String,
    /// Free-text description, also matched against interests.
    #[serde(default)]
    pub reason_text: String,
    /// Average rating in [0, 5]; absent while the item has no ratings yet.
    #[serde(default)]
    pub avg_rating: Option<f64>,
    /// "Madad" endorsements.
    #[serde(default)]
    pub endorsement_count: u32,
    /// Times this item was recommended onward.
    #[serde(default)]
    pub referral_count: u32,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Distance from the query center, computed by the spatial query.
    #[serde(default)]
    pub distance_km: Option<f64>,
}

/// Declared interests and saved items for the requesting user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSignals {
    #[serde(default)]
    pub interests: HashSet<String>,
    #[serde(default)]
    pub favorites: HashSet<Favorite>,
}

impl UserSignals {
    /// Signals for an anonymous caller. Both personalization terms degrade
    /// to zero contribution and ranking falls back to
    /// recency + trust + social proof.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.interests.is_empty() && self.favorites.is_empty()
    }
}

/// Weighted contribution of each scoring term to a candidate's relevance.
///
/// Exposed for debugging and tuning; the sum of the five fields is the
/// relevance score itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub recency: f64,
    pub trust: f64,
    pub interest: f64,
    pub social: f64,
    pub favorite: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.recency + self.trust + self.interest + self.social + self.favorite
    }
}

/// A candidate together with its computed relevance score.
///
/// Exists only between scoring and truncation. Deliberately not
/// serializable: the score is an ordering artifact and must not leak into
/// a response payload shaped like the original item.
#[derive(Debug, Clone)]
pub struct ScoredItem {
    pub item: CandidateItem,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl ScoredItem {
    /// Drop the score and hand back the original item.
    pub fn into_item(self) -> CandidateItem {
        self.item
    }
}

/// Ordered, score-stripped feed slice returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPage {
    pub items: Vec<CandidateItem>,
    /// Candidates considered before truncation to the page limit.
    pub total_candidates: usize,
    pub has_more: bool,
}

impl FeedPage {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_candidates: 0,
            has_more: false,
        }
    }
}
