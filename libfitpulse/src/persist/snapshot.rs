//! Versioned snapshot of the whitelisted slices

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::error::{FitpulseError, Result, StorageError};
use crate::store::AppState;

/// Schema version written by this build
pub const CURRENT_VERSION: u32 = 1;

/// Slices that may be persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SliceKey {
    Auth,
    Exercises,
    FitnessExercises,
    Favourites,
    Water,
    Wellness,
    Theme,
    Calories,
}

impl SliceKey {
    pub const ALL: [SliceKey; 8] = [
        SliceKey::Auth,
        SliceKey::Exercises,
        SliceKey::FitnessExercises,
        SliceKey::Favourites,
        SliceKey::Water,
        SliceKey::Wellness,
        SliceKey::Theme,
        SliceKey::Calories,
    ];

    /// Slices persisted unless configured otherwise
    pub const DEFAULT_WHITELIST: [SliceKey; 5] = [
        SliceKey::Auth,
        SliceKey::Favourites,
        SliceKey::Theme,
        SliceKey::Water,
        SliceKey::Wellness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SliceKey::Auth => "auth",
            SliceKey::Exercises => "exercises",
            SliceKey::FitnessExercises => "fitness_exercises",
            SliceKey::Favourites => "favourites",
            SliceKey::Water => "water",
            SliceKey::Wellness => "wellness",
            SliceKey::Theme => "theme",
            SliceKey::Calories => "calories",
        }
    }
}

impl std::fmt::Display for SliceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SliceKey {
    type Err = FitpulseError;

    fn from_str(s: &str) -> Result<Self> {
        SliceKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| FitpulseError::InvalidInput(format!("Unknown slice '{}'", s)))
    }
}

/// Stored document: `{ "version": n, "slices": { "<slice>": ... } }`
///
/// A missing `version` reads as 0, the layout written before versioning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub slices: Map<String, Value>,
}

impl PersistedSnapshot {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| StorageError::Encoding(e).into())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| StorageError::Encoding(e).into())
    }
}

/// Serialize the whitelisted slices, keyed by slice name
pub fn project(state: &AppState, whitelist: &[SliceKey]) -> Result<Map<String, Value>> {
    let mut slices = Map::new();
    for key in whitelist {
        let value = match key {
            SliceKey::Auth => serde_json::to_value(&state.auth),
            SliceKey::Exercises => serde_json::to_value(&state.exercises),
            SliceKey::FitnessExercises => serde_json::to_value(&state.fitness_exercises),
            SliceKey::Favourites => serde_json::to_value(&state.favourites),
            SliceKey::Water => serde_json::to_value(&state.water),
            SliceKey::Wellness => serde_json::to_value(&state.wellness),
            SliceKey::Theme => serde_json::to_value(&state.theme),
            SliceKey::Calories => serde_json::to_value(&state.calories),
        }
        .map_err(StorageError::Encoding)?;
        slices.insert(key.as_str().to_string(), value);
    }
    Ok(slices)
}

/// Seed `state` from snapshot slices
///
/// Only whitelisted slices are read. A slice that fails to decode keeps its
/// value from `state` and is logged; the others still apply.
pub fn seed(mut state: AppState, slices: &Map<String, Value>, whitelist: &[SliceKey]) -> AppState {
    for key in whitelist {
        let Some(value) = slices.get(key.as_str()) else {
            continue;
        };
        let applied = match key {
            SliceKey::Auth => apply(&mut state.auth, value),
            SliceKey::Exercises => apply(&mut state.exercises, value),
            SliceKey::FitnessExercises => apply(&mut state.fitness_exercises, value),
            SliceKey::Favourites => apply(&mut state.favourites, value),
            SliceKey::Water => apply(&mut state.water, value),
            SliceKey::Wellness => apply(&mut state.wellness, value),
            SliceKey::Theme => apply(&mut state.theme, value),
            SliceKey::Calories => apply(&mut state.calories, value),
        };
        if let Err(e) = applied {
            tracing::warn!(slice = %key, error = %e, "Ignoring unreadable persisted slice");
        }
    }
    state
}

fn apply<T: serde::de::DeserializeOwned>(
    slot: &mut T,
    value: &Value,
) -> std::result::Result<(), serde_json::Error> {
    *slot = T::deserialize(value)?;
    Ok(())
}
