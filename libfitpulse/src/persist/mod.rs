//! Snapshot persistence
//!
//! The whitelisted slices of [`AppState`](crate::store::AppState) are
//! written as one versioned JSON document under a single storage key.
//! [`PersistGate`] reads it once at startup, migrating older layouts, and
//! writes it back whenever the persisted part of the state changes.

pub mod gate;
pub mod migrate;
pub mod snapshot;
pub mod storage;

pub use gate::PersistGate;
pub use migrate::{Migration, MigrationRegistry};
pub use snapshot::{PersistedSnapshot, SliceKey, CURRENT_VERSION};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;

/// Build a file-backed gate from configuration
///
/// Unknown names in `persist.whitelist` are logged and skipped.
pub fn gate_from_config(config: &Config) -> Result<PersistGate> {
    let whitelist = config
        .persist
        .whitelist
        .iter()
        .filter_map(|name| match name.parse::<SliceKey>() {
            Ok(key) => Some(key),
            Err(_) => {
                tracing::warn!(slice = %name, "Unknown slice in persist.whitelist, skipping");
                None
            }
        })
        .collect();

    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.storage_dir()));
    Ok(PersistGate::new(storage)
        .with_key(config.storage.key.clone())
        .with_whitelist(whitelist)
        .with_debounce(config.debounce()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_from_config_skips_unknown_slices() {
        let mut config = Config::default_config();
        config.persist.whitelist = vec!["water".to_string(), "nonsense".to_string()];
        let gate = gate_from_config(&config).unwrap();
        assert_eq!(gate.whitelist(), &[SliceKey::Water]);
    }

    #[test]
    fn test_gate_from_config_rejects_bad_debounce() {
        let mut config = Config::default_config();
        config.persist.debounce = "whenever".to_string();
        assert!(gate_from_config(&config).is_err());
    }
}
