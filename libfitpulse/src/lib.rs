//! Fitpulse - client core for a small fitness companion
//!
//! This library provides the application state store, the wrappers around
//! the product catalog and fitness services, and snapshot persistence of
//! user preferences between runs.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod persist;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use app::App;
pub use config::Config;
pub use error::{FitpulseError, Result};
pub use persist::{gate_from_config, PersistGate};
pub use service::FitpulseService;
pub use store::{Action, AppState, RemoteRequestState, RequestStatus, Store};
pub use types::{
    CaloriesRequest, Credentials, ExerciseFilters, ExerciseItem, ExerciseStatus, FeedSource,
    FilterPatch, Registration,
};
