//! Data-source traits the feed builder depends on.
//!
//! Implementations live with the storage they wrap (Postgres/PostGIS in
//! production, mocks in tests). The builder only sees these seams.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{CandidateItem, GeoPoint, UserSignals};

/// Supplies feed candidates near a geographic center.
///
/// Implementations must return candidates in a stable order for identical
/// arguments (e.g. ordered by distance then id), since downstream ranking
/// preserves input order across ties.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn nearby(
        &self,
        center: GeoPoint,
        radius_km: f64,
        limit: usize,
    ) -> Result<Vec<CandidateItem>>;
}

/// Supplies per-user personalization signals.
#[async_trait]
pub trait UserSignalSource: Send + Sync {
    async fn signals_for(&self, user_id: Uuid) -> Result<UserSignals>;
}
