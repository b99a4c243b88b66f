//! Remote service clients
//!
//! [`ProductSource`] and [`FitnessSource`] are the seams between the
//! services and the network. The reqwest-backed clients live in
//! [`catalog`] and [`fitness`]; [`mock`] provides scripted stand-ins.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CaloriesBurned, CaloriesRequest, ExerciseFilters};

pub mod catalog;
pub mod fitness;
pub mod http;

// Available outside tests so integration suites can script responses
pub mod mock;

pub use catalog::{ProductCatalogClient, ProductRecord};
pub use fitness::{ExerciseRecord, FitnessApiClient};
pub use http::HttpClient;

/// Product catalog listing
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn products(&self, limit: u32) -> Result<Vec<ProductRecord>>;
}

/// Exercise search and calorie estimates
#[async_trait]
pub trait FitnessSource: Send + Sync {
    /// Exercises matching the non-empty fields of `filters`
    async fn exercises(&self, filters: &ExerciseFilters) -> Result<Vec<ExerciseRecord>>;

    /// Calorie rows for an activity, as received
    async fn calories_burned(&self, request: &CaloriesRequest) -> Result<Vec<CaloriesBurned>>;
}
