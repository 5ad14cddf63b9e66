use log::{info, warn};
use std::sync::Arc;

use super::maxmind::MaxMindLookup;
use crate::config::AppConfig;

/// Resolves an IP address to an English country name.
///
/// An empty string means "unknown"; a failed lookup must never fail the redirect.
pub trait CountryLookup: Send + Sync {
    fn country(&self, ip: &str) -> String;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// Used when no GeoIP database is available.
pub struct NoopLookup;

impl CountryLookup for NoopLookup {
    fn country(&self, _ip: &str) -> String {
        String::new()
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// MaxMind if the configured database can be opened, otherwise [`NoopLookup`].
pub fn from_config(config: &AppConfig) -> Arc<dyn CountryLookup> {
    let lookup: Arc<dyn CountryLookup> = match config.geoip_db_path.as_deref() {
        Some(path) => match MaxMindLookup::open(path) {
            Ok(reader) => Arc::new(reader),
            Err(e) => {
                warn!("GeoIP: {:#}, countries will not be recorded", e);
                Arc::new(NoopLookup)
            }
        },
        None => {
            info!("GeoIP: no database configured, countries will not be recorded");
            Arc::new(NoopLookup)
        }
    };

    info!("GeoIP: using {} provider", lookup.name());
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_database_falls_back_to_noop() {
        let mut config = AppConfig::from_lookup(|_| None).unwrap();
        config.geoip_db_path = Some("/nonexistent/GeoLite2-Country.mmdb".into());

        let lookup = from_config(&config);
        assert_eq!(lookup.name(), "none");
        assert_eq!(lookup.country("8.8.8.8"), "");
    }

    #[test]
    fn disabled_lookup_is_noop() {
        let mut config = AppConfig::from_lookup(|_| None).unwrap();
        config.geoip_db_path = None;

        assert_eq!(from_config(&config).name(), "none");
    }
}
