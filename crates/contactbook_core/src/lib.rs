//! Core domain logic for the contact book app.
//! This crate owns the contact list, its persistence and its search projection.

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod search;
pub mod snapshot;
pub mod store;

pub use config::{default_log_level, LogConfig, StorageConfig};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use logging::{init_logging, logging_status};
pub use model::contact::{Contact, ContactField, ContactValidationError};
pub use search::name::{filter_by_name, filter_indexed_by_name, name_matches};
pub use snapshot::{decode_snapshot, encode_snapshot, SnapshotError, CONTACTS_KEY};
pub use store::contact_store::{ContactStore, LoadOutcome, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
