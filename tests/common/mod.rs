#![allow(dead_code)]

use actix_web::web;
use std::collections::HashMap;
use std::sync::Arc;

use link_shortener::db::{MemoryStore, UrlStore};
use link_shortener::geo::CountryLookup;
use link_shortener::models::url::ShortenedUrl;
use link_shortener::state::app_state::AppState;

pub const BASE_URL: &str = "http://sho.rt";

/// Country lookup driven by a fixed table.
pub struct FixedLookup(pub HashMap<String, String>);

impl FixedLookup {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(ip, country)| (ip.to_string(), country.to_string()))
                .collect(),
        )
    }
}

impl CountryLookup for FixedLookup {
    fn country(&self, ip: &str) -> String {
        self.0.get(ip).cloned().unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

pub fn default_lookup() -> Arc<dyn CountryLookup> {
    Arc::new(FixedLookup::new(&[
        ("81.2.69.142", "United Kingdom"),
        ("89.160.20.112", "Sweden"),
        ("2.125.160.216", "United Kingdom"),
    ]))
}

pub fn create_test_state(store: Arc<dyn UrlStore>) -> web::Data<AppState> {
    web::Data::new(AppState {
        store,
        geo: default_lookup(),
        base_url: BASE_URL.to_string(),
    })
}

pub async fn create_test_link(store: &MemoryStore, short_id: &str, long_url: &str) -> ShortenedUrl {
    let url = ShortenedUrl::new(long_url.to_string(), short_id.to_string());
    store.insert_url(&url).await.unwrap();
    url
}
