use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::info;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use serde::Deserialize;

use super::store::{StoreError, UrlStore};
use crate::config::AppConfig;
use crate::models::stats::{CountryVisits, ReferrerVisits};
use crate::models::url::ShortenedUrl;
use crate::models::visit::Visit;

pub const URL_COLLECTION: &str = "shortened_urls";
pub const VISIT_COLLECTION: &str = "visits";

const DUPLICATE_KEY_CODE: i32 = 11000;

/// `$group` output of the stats pipelines.
#[derive(Deserialize)]
struct Bucket {
    #[serde(rename = "_id")]
    key: String,
    visits: u64,
}

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
    urls: Collection<ShortenedUrl>,
    visits: Collection<Visit>,
}

impl MongoStore {
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        info!("Trying to connect to mongo @ {}", config.mongodb_uri);

        let client = Client::with_uri_str(&config.mongodb_uri).await?;
        let db = client.database(&config.mongodb_database);

        // the driver connects lazily, make sure the server is actually there
        db.run_command(doc! { "ping": 1 }).await?;
        info!("Connected to database {}", config.mongodb_database);

        let store = Self::new(db);
        store.ensure_indexes().await?;
        Ok(store)
    }

    pub fn new(db: Database) -> Self {
        Self {
            urls: db.collection::<ShortenedUrl>(URL_COLLECTION),
            visits: db.collection::<Visit>(VISIT_COLLECTION),
            db,
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let unique_short_id = IndexModel::builder()
            .keys(doc! { "short_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.urls.create_index(unique_short_id).await?;

        let visits_by_url = IndexModel::builder()
            .keys(doc! { "shortened_url_id": 1 })
            .build();
        self.visits.create_index(visits_by_url).await?;

        Ok(())
    }

    async fn group_visits(&self, pipeline: Vec<Document>) -> Result<Vec<Bucket>, StoreError> {
        Ok(self
            .visits
            .aggregate(pipeline)
            .with_type::<Bucket>()
            .await?
            .try_collect()
            .await?)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

/// Pipeline stages that count visits per non-empty `field`, most visits first.
fn group_by_stages(field: &str) -> Vec<Document> {
    let field_ref = format!("${}", field);
    vec![
        doc! { "$match": { field: { "$nin": ["", null] } } },
        doc! { "$group": { "_id": field_ref, "visits": { "$sum": 1 } } },
        doc! { "$sort": { "visits": -1, "_id": 1 } },
    ]
}

#[async_trait]
impl UrlStore for MongoStore {
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<ShortenedUrl>, StoreError> {
        Ok(self.urls.find_one(doc! { "short_id": short_id }).await?)
    }

    async fn insert_url(&self, url: &ShortenedUrl) -> Result<(), StoreError> {
        match self.urls.insert_one(url).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::DuplicateShortId(url.short_id.clone())),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert_visit(&self, visit: &Visit) -> Result<(), StoreError> {
        self.visits.insert_one(visit).await?;
        Ok(())
    }

    async fn count_visits(&self, url_id: &ObjectId) -> Result<u64, StoreError> {
        Ok(self
            .visits
            .count_documents(doc! { "shortened_url_id": *url_id })
            .await?)
    }

    async fn visits_by_country(&self, url_id: &ObjectId) -> Result<Vec<CountryVisits>, StoreError> {
        let mut pipeline = vec![doc! { "$match": { "shortened_url_id": *url_id } }];
        pipeline.extend(group_by_stages("country"));

        Ok(self
            .group_visits(pipeline)
            .await?
            .into_iter()
            .map(|b| CountryVisits {
                name: b.key,
                visits: b.visits,
            })
            .collect())
    }

    async fn visits_by_referrer(
        &self,
        url_id: &ObjectId,
        scan_limit: i64,
    ) -> Result<Vec<ReferrerVisits>, StoreError> {
        let mut pipeline = vec![
            doc! { "$match": { "shortened_url_id": *url_id } },
            doc! { "$limit": scan_limit },
        ];
        pipeline.extend(group_by_stages("referrer"));

        Ok(self
            .group_visits(pipeline)
            .await?
            .into_iter()
            .map(|b| ReferrerVisits {
                url: b.key,
                visits: b.visits,
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::from_document;

    #[test]
    fn group_stages_skip_empty_values_and_sort_by_count() {
        let stages = group_by_stages("country");
        assert_eq!(stages.len(), 3);
        assert_eq!(
            stages[0],
            doc! { "$match": { "country": { "$nin": ["", null] } } }
        );
        assert_eq!(
            stages[1],
            doc! { "$group": { "_id": "$country", "visits": { "$sum": 1 } } }
        );
        assert_eq!(stages[2], doc! { "$sort": { "visits": -1, "_id": 1 } });
    }

    #[test]
    fn bucket_accepts_int32_counts() {
        let bucket: Bucket = from_document(doc! { "_id": "Germany", "visits": 4_i32 }).unwrap();
        assert_eq!(bucket.key, "Germany");
        assert_eq!(bucket.visits, 4);
    }
}
