//! Snapshot schema migrations
//!
//! A migration for version `n` turns a version `n - 1` slice map into a
//! version `n` one. Loading a snapshot stored at version `s` runs every
//! registered step in `(s, current]` once, in ascending order. Versions
//! without a registered step pass the slices through unchanged.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::snapshot::{PersistedSnapshot, CURRENT_VERSION};
use crate::error::{Result, StorageError};

type Slices = Map<String, Value>;

/// One schema step; the error string ends up in [`StorageError::Migration`]
pub type Migration = Box<dyn Fn(Slices) -> std::result::Result<Slices, String> + Send + Sync>;

pub struct MigrationRegistry {
    current: u32,
    steps: BTreeMap<u32, Migration>,
}

impl std::fmt::Debug for MigrationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationRegistry")
            .field("current", &self.current)
            .field("steps", &self.steps.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for MigrationRegistry {
    fn default() -> Self {
        Self::new(CURRENT_VERSION).register(1, v1_snake_case_layout)
    }
}

impl MigrationRegistry {
    /// Empty registry targeting `current`
    pub fn new(current: u32) -> Self {
        Self {
            current,
            steps: BTreeMap::new(),
        }
    }

    /// Register the step that produces `version`
    pub fn register<F>(mut self, version: u32, step: F) -> Self
    where
        F: Fn(Slices) -> std::result::Result<Slices, String> + Send + Sync + 'static,
    {
        self.steps.insert(version, Box::new(step));
        self
    }

    pub fn current_version(&self) -> u32 {
        self.current
    }

    /// Bring `snapshot` up to the current version
    ///
    /// Fails if the snapshot is newer than this build or a step rejects it.
    pub fn migrate(&self, snapshot: PersistedSnapshot) -> Result<PersistedSnapshot> {
        let stored = snapshot.version;
        if stored > self.current {
            return Err(StorageError::UnsupportedVersion {
                stored,
                supported: self.current,
            }
            .into());
        }

        let mut slices = snapshot.slices;
        if stored == self.current {
            return Ok(PersistedSnapshot {
                version: stored,
                slices,
            });
        }
        for (version, step) in self.steps.range(stored + 1..=self.current) {
            tracing::debug!(from = version - 1, to = version, "Migrating snapshot");
            slices = step(slices).map_err(|message| StorageError::Migration {
                version: *version,
                message,
            })?;
        }

        Ok(PersistedSnapshot {
            version: self.current,
            slices,
        })
    }
}

/// Version 1: camelCase fields become snake_case, derived data is dropped,
/// and the flat auth record moves under `session.data`.
pub fn v1_snake_case_layout(mut slices: Slices) -> std::result::Result<Slices, String> {
    if let Some(auth) = slices.remove("auth") {
        slices.insert("auth".to_string(), migrate_auth(auth)?);
    }

    rename_fields(&mut slices, "water", &[("dailyGoal", "daily_goal")], &["history"])?;
    rename_fields(&mut slices, "theme", &[("darkMode", "dark_mode")], &[])?;
    rename_fields(
        &mut slices,
        "wellness",
        &[
            ("selectedCategory", "selected_category"),
            ("savedTips", "saved_tips"),
        ],
        &["tips"],
    )?;

    // the old fitnessExercises slice was never persisted on purpose
    slices.remove("fitnessExercises");

    Ok(slices)
}

fn migrate_auth(auth: Value) -> std::result::Result<Value, String> {
    let Value::Object(mut auth) = auth else {
        return Err("auth is not an object".to_string());
    };
    if auth.contains_key("session") {
        return Ok(Value::Object(auth));
    }

    let profile_pic = auth
        .remove("profilePic")
        .or_else(|| auth.remove("profile_pic"))
        .unwrap_or(Value::Null);
    let mut data = Map::new();
    data.insert("token".to_string(), auth.remove("token").unwrap_or(Value::Null));
    data.insert(
        "username".to_string(),
        auth.remove("username").unwrap_or(Value::Null),
    );
    data.insert("profile_pic".to_string(), profile_pic);

    let mut session = Map::new();
    session.insert("data".to_string(), Value::Object(data));
    let mut migrated = Map::new();
    migrated.insert("session".to_string(), Value::Object(session));
    Ok(Value::Object(migrated))
}

fn rename_fields(
    slices: &mut Slices,
    slice: &str,
    renames: &[(&str, &str)],
    drop: &[&str],
) -> std::result::Result<(), String> {
    let Some(value) = slices.get_mut(slice) else {
        return Ok(());
    };
    let Value::Object(fields) = value else {
        return Err(format!("{} is not an object", slice));
    };
    for (old, new) in renames {
        if let Some(v) = fields.remove(*old) {
            fields.entry(new.to_string()).or_insert(v);
        }
    }
    for key in drop {
        fields.remove(*key);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn snapshot(version: u32, slices: Value) -> PersistedSnapshot {
        PersistedSnapshot {
            version,
            slices: slices.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn test_each_step_runs_exactly_once_in_order() {
        let calls = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut registry = MigrationRegistry::new(4);
        for version in 1..=4 {
            let calls = Arc::clone(&calls);
            registry = registry.register(version, move |slices| {
                calls.lock().unwrap().push(version);
                Ok(slices)
            });
        }

        let migrated = registry.migrate(snapshot(1, json!({}))).unwrap();
        assert_eq!(migrated.version, 4);
        assert_eq!(*calls.lock().unwrap(), vec![2, 3, 4]);
    }

    #[test]
    fn test_current_snapshot_runs_nothing() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let registry = MigrationRegistry::new(1).register(1, move |slices| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(slices)
        });
        registry.migrate(snapshot(1, json!({}))).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_newer_snapshot_is_rejected() {
        let registry = MigrationRegistry::default();
        let err = registry.migrate(snapshot(7, json!({}))).unwrap_err();
        assert!(matches!(
            err,
            crate::FitpulseError::Storage(StorageError::UnsupportedVersion {
                stored: 7,
                supported: 1
            })
        ));
    }

    #[test]
    fn test_step_error_names_version() {
        let registry = MigrationRegistry::new(2).register(2, |_| Err("boom".to_string()));
        let err = registry.migrate(snapshot(1, json!({}))).unwrap_err();
        assert!(err.to_string().contains("version 2"));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_v1_migrates_legacy_layout() {
        let legacy = json!({
            "auth": {
                "token": "abc",
                "username": "sam",
                "profilePic": "file:///pic.png",
                "status": "succeeded",
                "error": null
            },
            "water": { "cups": 3, "dailyGoal": 10, "history": [] },
            "theme": { "darkMode": true },
            "wellness": {
                "tips": [],
                "selectedCategory": "rest",
                "savedTips": ["2", "5"]
            },
            "favourites": { "items": [] }
        });
        let migrated = MigrationRegistry::default()
            .migrate(snapshot(0, legacy))
            .unwrap();

        assert_eq!(migrated.version, 1);
        let slices = Value::Object(migrated.slices);
        assert_eq!(
            slices["auth"],
            json!({ "session": { "data": {
                "token": "abc",
                "username": "sam",
                "profile_pic": "file:///pic.png"
            }}})
        );
        assert_eq!(slices["water"], json!({ "cups": 3, "daily_goal": 10 }));
        assert_eq!(slices["theme"], json!({ "dark_mode": true }));
        assert_eq!(
            slices["wellness"],
            json!({ "selected_category": "rest", "saved_tips": ["2", "5"] })
        );
    }

    #[test]
    fn test_v1_rejects_non_object_slice() {
        let err = MigrationRegistry::default()
            .migrate(snapshot(0, json!({ "theme": true })))
            .unwrap_err();
        assert!(err.to_string().contains("theme is not an object"));
    }
}
