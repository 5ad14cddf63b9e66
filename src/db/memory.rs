use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::store::{StoreError, UrlStore};
use crate::models::stats::{CountryVisits, ReferrerVisits, tally};
use crate::models::url::ShortenedUrl;
use crate::models::visit::Visit;

/// In-process store with the same semantics as the mongo collections.
#[derive(Default)]
pub struct MemoryStore {
    urls: RwLock<Vec<ShortenedUrl>>,
    visits: RwLock<Vec<Visit>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded visits, oldest first.
    pub async fn visits(&self) -> Vec<Visit> {
        self.visits.read().await.clone()
    }

    pub async fn url_count(&self) -> usize {
        self.urls.read().await.len()
    }
}

#[async_trait]
impl UrlStore for MemoryStore {
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<ShortenedUrl>, StoreError> {
        Ok(self
            .urls
            .read()
            .await
            .iter()
            .find(|u| u.short_id == short_id)
            .cloned())
    }

    async fn insert_url(&self, url: &ShortenedUrl) -> Result<(), StoreError> {
        let mut urls = self.urls.write().await;
        if urls.iter().any(|u| u.short_id == url.short_id) {
            return Err(StoreError::DuplicateShortId(url.short_id.clone()));
        }
        urls.push(url.clone());
        Ok(())
    }

    async fn insert_visit(&self, visit: &Visit) -> Result<(), StoreError> {
        self.visits.write().await.push(visit.clone());
        Ok(())
    }

    async fn count_visits(&self, url_id: &ObjectId) -> Result<u64, StoreError> {
        let visits = self.visits.read().await;
        Ok(visits
            .iter()
            .filter(|v| &v.shortened_url_id == url_id)
            .count() as u64)
    }

    async fn visits_by_country(&self, url_id: &ObjectId) -> Result<Vec<CountryVisits>, StoreError> {
        let visits = self.visits.read().await;
        let countries = visits
            .iter()
            .filter(|v| &v.shortened_url_id == url_id)
            .map(|v| v.country.as_str());

        Ok(tally(countries)
            .into_iter()
            .map(|(name, visits)| CountryVisits { name, visits })
            .collect())
    }

    async fn visits_by_referrer(
        &self,
        url_id: &ObjectId,
        scan_limit: i64,
    ) -> Result<Vec<ReferrerVisits>, StoreError> {
        let visits = self.visits.read().await;
        let referrers = visits
            .iter()
            .filter(|v| &v.shortened_url_id == url_id)
            .take(usize::try_from(scan_limit).unwrap_or(0))
            .map(|v| v.referrer.as_str());

        Ok(tally(referrers)
            .into_iter()
            .map(|(url, visits)| ReferrerVisits { url, visits })
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
