pub mod memory;
pub mod mongodb;
pub mod store;

pub use memory::MemoryStore;
pub use self::mongodb::MongoStore;
pub use store::{REFERRER_SCAN_LIMIT, StoreError, UrlStore};
