use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::models::stats::{CountryVisits, ReferrerVisits};
use crate::models::url::ShortenedUrl;
use crate::models::visit::Visit;

/// How many visits are scanned when ranking referrers.
pub const REFERRER_SCAN_LIMIT: i64 = 1000;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("short id {0} is already taken")]
    DuplicateShortId(String),
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    #[error("{0}")]
    Backend(String),
}

/// Persistence for shortened urls and their visits.
#[async_trait]
pub trait UrlStore: Send + Sync {
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<ShortenedUrl>, StoreError>;

    async fn short_id_exists(&self, short_id: &str) -> Result<bool, StoreError> {
        if short_id.is_empty() {
            return Ok(false);
        }
        Ok(self.find_by_short_id(short_id).await?.is_some())
    }

    /// Fails with [`StoreError::DuplicateShortId`] if the short id was taken in the meantime.
    async fn insert_url(&self, url: &ShortenedUrl) -> Result<(), StoreError>;

    async fn insert_visit(&self, visit: &Visit) -> Result<(), StoreError>;

    async fn count_visits(&self, url_id: &ObjectId) -> Result<u64, StoreError>;

    /// Visits grouped by non-empty country, most visits first.
    async fn visits_by_country(&self, url_id: &ObjectId) -> Result<Vec<CountryVisits>, StoreError>;

    /// Non-empty referrers among the first `scan_limit` visits, most visits first.
    async fn visits_by_referrer(
        &self,
        url_id: &ObjectId,
        scan_limit: i64,
    ) -> Result<Vec<ReferrerVisits>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
