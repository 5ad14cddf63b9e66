use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CountryVisits {
    pub name: String,
    pub visits: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReferrerVisits {
    pub url: String,
    pub visits: u64,
}

/// Body of `GET /urls/{short_id}/stats`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    #[serde(rename = "by_country")]
    pub countries: Vec<CountryVisits>,
    #[serde(rename = "by_referrer")]
    pub referrers: Vec<ReferrerVisits>,
    pub total_visits: u64,
}

/// Counts occurrences of each non-empty key, most frequent first, ties by key.
pub fn tally<'a, I>(keys: I) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for key in keys.into_iter().filter(|k| !k.is_empty()) {
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(key, count)| (key.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}
