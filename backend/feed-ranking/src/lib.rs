//! Personalized feed ranking for the Madadgar platform.
//!
//! Scores location-scoped community content (recommendation posts,
//! donations, listings, helper profiles) by a weighted blend of recency,
//! trust, interest match, and social proof, and assembles score-stripped
//! feed pages. Transport-free by design: HTTP/gRPC services wrap the
//! [`FeedBuilder`] or call [`RankingEngine::rank`] directly.

pub mod config;
pub mod models;
pub mod services;

pub use config::{Config, ConfigError, FeedConfig, RankingWeights};
pub use models::{
    CandidateItem, Favorite, FeedPage, GeoPoint, ItemKind, ScoreBreakdown, ScoredItem, UserSignals,
};
pub use services::{CandidateSource, FeedBuilder, FeedRequest, RankingEngine, UserSignalSource};
