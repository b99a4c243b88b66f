//! Service layer for Fitpulse
//!
//! `FitpulseService` is the facade the effect runner talks to. It owns the
//! sub-services, which share the same underlying sources:
//!
//! - `ExerciseService`: exercise search with the built-in fallback list
//! - `CatalogService`: product catalog listing
//! - `CaloriesService`: validated calorie lookups and popular activities
//! - `Authenticator`: login and registration against the accounts file
//!
//! # Example
//!
//! ```no_run
//! use libfitpulse::{Config, FitpulseService};
//!
//! # async fn example() -> libfitpulse::Result<()> {
//! let service = FitpulseService::from_config(&Config::load_or_default()?)?;
//! let feed = service.exercises().list().await?;
//! println!("{} exercises", feed.items.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod calories;
pub mod catalog;
pub mod exercises;

pub use auth::{Authenticator, StoredAuthenticator};
pub use calories::CaloriesService;
pub use catalog::CatalogService;
pub use exercises::ExerciseService;

use secrecy::SecretString;
use std::sync::Arc;

use crate::api::{FitnessApiClient, FitnessSource, ProductCatalogClient, ProductSource};
use crate::config::Config;
use crate::persist::{FileStore, KeyValueStore};
use crate::error::Result;

pub struct FitpulseService {
    exercises: ExerciseService,
    catalog: CatalogService,
    calories: CaloriesService,
    auth: Arc<dyn Authenticator>,
}

impl FitpulseService {
    /// Build the HTTP-backed service described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api.api_key.clone().map(SecretString::from);
        let fitness: Arc<dyn FitnessSource> = Arc::new(FitnessApiClient::new(
            &config.api.fitness_base_url,
            api_key.as_ref(),
        )?);
        let products: Arc<dyn ProductSource> =
            Arc::new(ProductCatalogClient::new(&config.api.catalog_base_url)?);
        let accounts: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.storage_dir()));
        let auth: Arc<dyn Authenticator> =
            Arc::new(StoredAuthenticator::new(accounts, config.auth_latency()?));

        Ok(Self::with_sources(products, fitness, auth, config))
    }

    /// Build from explicit sources; used by tests and embedders
    pub fn with_sources(
        products: Arc<dyn ProductSource>,
        fitness: Arc<dyn FitnessSource>,
        auth: Arc<dyn Authenticator>,
        config: &Config,
    ) -> Self {
        let mut exercises =
            ExerciseService::new(Arc::clone(&fitness), config.exercises.default_muscle.clone());
        if !config.exercises.use_fallback {
            exercises = exercises.without_fallback();
        }

        Self {
            exercises,
            catalog: CatalogService::new(products, config.api.catalog_limit),
            calories: CaloriesService::new(fitness),
            auth,
        }
    }

    pub fn exercises(&self) -> &ExerciseService {
        &self.exercises
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn calories(&self) -> &CaloriesService {
        &self.calories
    }

    pub fn auth(&self) -> &dyn Authenticator {
        self.auth.as_ref()
    }
}
