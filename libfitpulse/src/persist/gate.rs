//! Load-on-start and save-on-change for the whitelisted slices

use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::migrate::MigrationRegistry;
use super::snapshot::{self, PersistedSnapshot, SliceKey};
use super::storage::KeyValueStore;
use crate::config::DEFAULT_STORAGE_KEY;
use crate::error::Result;
use crate::store::AppState;

/// Persistence boundary between the store and a [`KeyValueStore`]
///
/// Nothing here returns an error to the caller: failed reads fall back to
/// defaults and failed writes are retried on the next change or `flush`.
pub struct PersistGate {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    whitelist: Vec<SliceKey>,
    migrations: MigrationRegistry,
    debounce: Duration,
    /// Projection last written (or read) successfully
    written: Option<Map<String, Value>>,
    last_write: Option<Instant>,
    pending: Option<Map<String, Value>>,
}

impl std::fmt::Debug for PersistGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistGate")
            .field("key", &self.key)
            .field("whitelist", &self.whitelist)
            .field("debounce", &self.debounce)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

impl PersistGate {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            key: DEFAULT_STORAGE_KEY.to_string(),
            whitelist: SliceKey::DEFAULT_WHITELIST.to_vec(),
            migrations: MigrationRegistry::default(),
            debounce: Duration::ZERO,
            written: None,
            last_write: None,
            pending: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_whitelist(mut self, whitelist: Vec<SliceKey>) -> Self {
        self.whitelist = whitelist;
        self
    }

    pub fn with_migrations(mut self, migrations: MigrationRegistry) -> Self {
        self.migrations = migrations;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn whitelist(&self) -> &[SliceKey] {
        &self.whitelist
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Restore persisted slices on top of `initial`
    ///
    /// Any failure (unreadable storage, corrupt JSON, a failed or impossible
    /// migration) is logged and `initial` is returned as is.
    pub fn rehydrate(&mut self, initial: AppState) -> AppState {
        let snapshot = match self.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No snapshot stored, starting fresh");
                self.remember(&initial);
                return initial;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding persisted state");
                self.remember(&initial);
                return initial;
            }
        };

        let state = snapshot::seed(initial, &snapshot.slices, &self.whitelist);
        tracing::info!(
            key = %self.key,
            version = snapshot.version,
            slices = snapshot.slices.len(),
            "Rehydrated state"
        );
        self.remember(&state);
        state
    }

    fn load(&self) -> Result<Option<PersistedSnapshot>> {
        let Some(bytes) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        let stored = PersistedSnapshot::from_bytes(&bytes)?;
        let stored_version = stored.version;
        let migrated = self.migrations.migrate(stored)?;
        if stored_version != migrated.version {
            tracing::info!(
                from = stored_version,
                to = migrated.version,
                "Migrated persisted state"
            );
        }
        Ok(Some(migrated))
    }

    fn remember(&mut self, state: &AppState) {
        self.written = snapshot::project(state, &self.whitelist).ok();
    }

    /// Called after every dispatch
    ///
    /// Writes when the whitelisted projection differs from the last write
    /// and the debounce interval has passed; otherwise keeps it pending.
    pub fn state_changed(&mut self, state: &AppState) {
        let projection = match snapshot::project(state, &self.whitelist) {
            Ok(projection) => projection,
            Err(e) => {
                tracing::error!(error = %e, "Failed to project state for persistence");
                return;
            }
        };

        if self.written.as_ref() == Some(&projection) {
            self.pending = None;
            return;
        }

        let due = self
            .last_write
            .map(|at| at.elapsed() >= self.debounce)
            .unwrap_or(true);
        if due {
            self.write(projection);
        } else {
            self.pending = Some(projection);
        }
    }

    /// Write any pending projection now
    pub fn flush(&mut self) {
        if let Some(projection) = self.pending.take() {
            self.write(projection);
        }
    }

    fn write(&mut self, projection: Map<String, Value>) {
        let snapshot = PersistedSnapshot {
            version: self.migrations.current_version(),
            slices: projection,
        };
        let result = snapshot
            .to_bytes()
            .and_then(|bytes| self.storage.set(&self.key, &bytes));

        self.last_write = Some(Instant::now());
        match result {
            Ok(()) => {
                tracing::debug!(key = %self.key, "Persisted state");
                self.written = Some(snapshot.slices);
                self.pending = None;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to persist state");
                self.pending = Some(snapshot.slices);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::storage::MemoryStore;
    use crate::store::{reduce, Action};

    fn gate(store: &Arc<MemoryStore>) -> PersistGate {
        PersistGate::new(Arc::clone(store) as Arc<dyn KeyValueStore>)
    }

    #[test]
    fn test_empty_storage_returns_initial() {
        let store = Arc::new(MemoryStore::new());
        let state = gate(&store).rehydrate(AppState::default());
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_read_failure_returns_initial() {
        let store = Arc::new(MemoryStore::new().with_entry("persist:root", "{}"));
        store.set_fail_reads(true);
        let state = gate(&store).rehydrate(AppState::default());
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_corrupt_snapshot_returns_initial() {
        let store = Arc::new(MemoryStore::new().with_entry("persist:root", "{not json"));
        let state = gate(&store).rehydrate(AppState::default());
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_newer_snapshot_is_discarded() {
        let store = Arc::new(MemoryStore::new().with_entry(
            "persist:root",
            r#"{"version":9,"slices":{"theme":{"dark_mode":true}}}"#,
        ));
        let state = gate(&store).rehydrate(AppState::default());
        assert!(!state.theme.dark_mode);
    }

    #[test]
    fn test_writes_only_on_projection_change() {
        let store = Arc::new(MemoryStore::new());
        let mut gate = gate(&store);
        let state = gate.rehydrate(AppState::default());

        // not whitelisted
        let state = reduce(state, &Action::CatalogRequested);
        gate.state_changed(&state);
        assert_eq!(store.write_count(), 0);

        let state = reduce(state, &Action::AddWater);
        gate.state_changed(&state);
        assert_eq!(store.write_count(), 1);

        gate.state_changed(&state);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_round_trip_through_storage() {
        let store = Arc::new(MemoryStore::new());
        let mut first = gate(&store);
        let state = first.rehydrate(AppState::default());
        let state = reduce(state, &Action::SetDailyGoal(10));
        let state = reduce(state, &Action::AddWater);
        let state = reduce(state, &Action::ToggleTheme);
        first.state_changed(&state);

        let restored = gate(&store).rehydrate(AppState::default());
        assert_eq!(restored.water.cups, 1);
        assert_eq!(restored.water.daily_goal, 10);
        assert!(restored.theme.dark_mode);
    }

    #[test]
    fn test_debounced_change_waits_for_flush() {
        let store = Arc::new(MemoryStore::new());
        let mut gate = gate(&store).with_debounce(Duration::from_secs(3600));
        let state = gate.rehydrate(AppState::default());

        let state = reduce(state, &Action::AddWater);
        gate.state_changed(&state);
        assert_eq!(store.write_count(), 1);

        let state = reduce(state, &Action::AddWater);
        gate.state_changed(&state);
        assert_eq!(store.write_count(), 1);
        assert!(gate.has_pending());

        gate.flush();
        assert_eq!(store.write_count(), 2);
        assert!(!gate.has_pending());
    }

    #[test]
    fn test_failed_write_stays_pending() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_writes(true);
        let mut gate = gate(&store);
        let state = gate.rehydrate(AppState::default());

        let state = reduce(state, &Action::ToggleTheme);
        gate.state_changed(&state);
        assert!(gate.has_pending());

        store.set_fail_writes(false);
        gate.flush();
        assert_eq!(store.write_count(), 1);
        assert!(!gate.has_pending());
    }

    #[test]
    fn test_written_snapshot_is_current_version() {
        let store = Arc::new(MemoryStore::new());
        let mut gate = gate(&store);
        let state = reduce(gate.rehydrate(AppState::default()), &Action::ToggleTheme);
        gate.state_changed(&state);

        let raw = store.raw("persist:root").unwrap();
        let snapshot = PersistedSnapshot::from_bytes(&raw).unwrap();
        assert_eq!(snapshot.version, crate::persist::CURRENT_VERSION);
        assert_eq!(snapshot.slices["theme"]["dark_mode"], true);
    }
}
