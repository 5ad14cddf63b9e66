use anyhow::{Context, Result};
use std::env;

const DEFAULT_PORT: u16 = 12345;

/// Runtime settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    /// Prefix for generated short URLs, without a trailing slash.
    pub base_url: String,
    pub geoip_db_path: Option<String>,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let base_url = var("BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", port))
            .trim_end_matches('/')
            .to_string();

        let geoip_db_path = match lookup("GEOIP_DB_PATH") {
            // explicitly set to empty disables the lookup
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(path),
            None => Some(String::from("GeoLite2-Country.mmdb")),
        };

        let cors_origins = var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| String::from("127.0.0.1")),
            port,
            mongodb_uri: var("MONGODB_URI")
                .unwrap_or_else(|| String::from("mongodb://localhost:27017")),
            mongodb_database: var("MONGODB_DATABASE")
                .unwrap_or_else(|| String::from("traction_demo")),
            base_url,
            geoip_db_path,
            cors_origins,
        })
    }
}
