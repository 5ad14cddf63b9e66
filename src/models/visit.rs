use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One recorded redirect. Absent headers are stored as empty strings.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Visit {
    pub shortened_url_id: ObjectId, // Link to the shortened URL
    pub ip_address: String,
    pub user_agent: String,
    pub country: String,
    pub referrer: String,
    #[serde(default)]
    pub created_at: i64,
}

impl Visit {
    pub fn new(
        shortened_url_id: ObjectId,
        ip_address: String,
        user_agent: String,
        country: String,
        referrer: String,
    ) -> Self {
        Self {
            shortened_url_id,
            ip_address,
            user_agent,
            country,
            referrer,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
