//! Country lookup for visitor IP addresses.

mod lookup;
mod maxmind;

pub use lookup::{CountryLookup, NoopLookup, from_config};
pub use maxmind::MaxMindLookup;
