//! Feed ranking services.
//!
//! - [`scoring`]: pure per-term scoring functions and constants
//! - [`ranking`]: the engine composing terms into an ordered result
//! - [`sources`]: traits over candidate and signal storage
//! - [`feed`]: page assembly with graceful degradation

pub mod feed;
pub mod ranking;
pub mod scoring;
pub mod sources;

pub use feed::{FeedBuilder, FeedRequest};
pub use ranking::RankingEngine;
pub use sources::{CandidateSource, UserSignalSource};
