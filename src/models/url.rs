use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ShortenedUrl {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub long_url: String,
    pub short_id: String, // unique, see MongoStore::ensure_indexes
    #[serde(default)]
    pub created_at: i64,
}

impl ShortenedUrl {
    pub fn new(long_url: String, short_id: String) -> Self {
        Self {
            id: ObjectId::new(),
            long_url,
            short_id,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
