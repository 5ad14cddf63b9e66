use std::sync::Arc;

use crate::db::UrlStore;
use crate::geo::CountryLookup;

pub struct AppState {
    pub store: Arc<dyn UrlStore>,
    pub geo: Arc<dyn CountryLookup>,
    /// e.g. `http://localhost:12345`, short urls are `{base_url}/s/{short_id}`
    pub base_url: String,
}

impl AppState {
    pub fn short_url(&self, short_id: &str) -> String {
        format!("{}/s/{}", self.base_url, short_id)
    }
}
