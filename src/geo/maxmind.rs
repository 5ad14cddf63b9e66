use anyhow::{Context, Result};
use log::{debug, info};
use maxminddb::{Reader, geoip2};
use std::net::IpAddr;

use super::lookup::CountryLookup;

/// Country lookup backed by a local GeoLite2-Country database.
pub struct MaxMindLookup {
    reader: Reader<Vec<u8>>,
}

impl MaxMindLookup {
    pub fn open(path: &str) -> Result<Self> {
        let reader = Reader::open_readfile(path)
            .with_context(|| format!("failed to open MaxMind database at {}", path))?;
        info!("GeoIP: loaded MaxMind database from {}", path);
        Ok(Self { reader })
    }
}

impl CountryLookup for MaxMindLookup {
    fn country(&self, ip: &str) -> String {
        let Ok(addr) = ip.parse::<IpAddr>() else {
            return String::new();
        };

        // private and loopback ranges aren't in the database
        let country = match self.reader.lookup::<geoip2::Country>(addr) {
            Ok(record) => record
                .country
                .and_then(|c| c.names)
                .and_then(|names| names.get("en").map(|name| name.to_string()))
                .unwrap_or_default(),
            Err(e) => {
                debug!("GeoIP: no country for {}: {}", ip, e);
                String::new()
            }
        };

        debug!("Found country {:?} for IP {}", country, ip);
        country
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}
