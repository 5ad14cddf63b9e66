use serde::{Deserialize, Serialize};
use validator::Validate;

/// Accepted as a form body (`url=...`), JSON, or the `url` query parameter.
#[derive(Deserialize, Serialize, Validate, Default)]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "url is required"))]
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ShortenResponse {
    pub long_url: String,
    pub short_id: String,
    pub short_url: String,
}
