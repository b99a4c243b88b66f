//! Effect runner
//!
//! Bridges the synchronous [`Store`] and the async [`FitpulseService`].
//! Each effect dispatches its `*Requested` action right away, then spawns
//! the request onto a [`JoinSet`]. Completions are turned back into actions
//! and dispatched in the order they finish, so when two requests for the
//! same slice overlap, the one that resolves last wins.
//!
//! Requests have no timeout and cannot be cancelled individually.

use std::sync::Arc;
use tokio::task::JoinSet;

use crate::service::{calories, FitpulseService};
use crate::store::{Action, AppState, Store};
use crate::types::{CaloriesRequest, Credentials, ExerciseFilters, FilterPatch, Registration};

const CALORIES_FAILED: &str = "Failed to calculate. Please check your connection and try again.";

pub struct App {
    store: Store,
    service: Arc<FitpulseService>,
    in_flight: JoinSet<Action>,
}

impl App {
    pub fn new(store: Store, service: Arc<FitpulseService>) -> Self {
        Self {
            store,
            service,
            in_flight: JoinSet::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Dispatch a local action
    pub fn dispatch(&mut self, action: Action) {
        self.store.dispatch(action);
    }

    /// Number of requests still running
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn load_catalog(&mut self) {
        self.store.dispatch(Action::CatalogRequested);
        let service = Arc::clone(&self.service);
        self.in_flight.spawn(async move {
            match service.catalog().list().await {
                Ok(items) => Action::CatalogLoaded(items),
                Err(e) => {
                    tracing::warn!(error = %e, "Catalog request failed");
                    Action::CatalogFailed(e.user_message())
                }
            }
        });
    }

    pub fn search_exercises(&mut self, filters: ExerciseFilters) {
        self.store.dispatch(Action::ExercisesRequested);
        let service = Arc::clone(&self.service);
        self.in_flight.spawn(async move {
            match service.exercises().search(&filters).await {
                Ok(feed) => Action::ExercisesLoaded(feed),
                Err(e) => Action::ExercisesFailed(e.user_message()),
            }
        });
    }

    /// Search with the filters currently held in state
    pub fn search_with_current_filters(&mut self) {
        let filters = self.state().fitness_exercises.filters.clone();
        self.search_exercises(filters);
    }

    /// Merge `patch` into the filters, then search with the result
    pub fn apply_filters(&mut self, patch: FilterPatch) {
        self.store.dispatch(Action::SetFilters(patch));
        self.search_with_current_filters();
    }

    /// Exercises for one muscle group; the configured default when `None`
    pub fn exercises_by_muscle(&mut self, muscle: Option<String>) {
        self.store.dispatch(Action::ExercisesRequested);
        let service = Arc::clone(&self.service);
        self.in_flight.spawn(async move {
            match service.exercises().by_muscle(muscle.as_deref()).await {
                Ok(feed) => Action::ExercisesLoaded(feed),
                Err(e) => Action::ExercisesFailed(e.user_message()),
            }
        });
    }

    pub fn clear_filters_and_reload(&mut self) {
        self.store.dispatch(Action::ClearFilters);
        self.exercises_by_muscle(None);
    }

    pub fn login(&mut self, credentials: Credentials) {
        self.store.dispatch(Action::AuthRequested);
        let service = Arc::clone(&self.service);
        self.in_flight.spawn(async move {
            match service.auth().login(&credentials).await {
                Ok(grant) => Action::AuthSucceeded(grant),
                Err(e) => Action::AuthFailed(e.user_message()),
            }
        });
    }

    pub fn register(&mut self, registration: Registration) {
        self.store.dispatch(Action::AuthRequested);
        let service = Arc::clone(&self.service);
        self.in_flight.spawn(async move {
            match service.auth().register(&registration).await {
                Ok(grant) => Action::AuthSucceeded(grant),
                Err(e) => Action::AuthFailed(e.user_message()),
            }
        });
    }

    pub fn logout(&mut self) {
        self.store.dispatch(Action::Logout);
    }

    /// Calorie lookup; invalid input fails the slice without a request
    pub fn calculate_calories(&mut self, request: CaloriesRequest) {
        if let Err(e) = calories::validate(&request) {
            self.store.dispatch(Action::CaloriesFailed(e.user_message()));
            return;
        }

        self.store.dispatch(Action::CaloriesRequested);
        let service = Arc::clone(&self.service);
        self.in_flight.spawn(async move {
            match service.calories().lookup(&request).await {
                Ok(rows) => Action::CaloriesLoaded(rows),
                Err(e) => {
                    tracing::warn!(activity = %request.activity, error = %e, "Calorie lookup failed");
                    Action::CaloriesFailed(CALORIES_FAILED.to_string())
                }
            }
        });
    }

    pub fn load_popular_activities(&mut self) {
        self.store.dispatch(Action::PopularRequested);
        let service = Arc::clone(&self.service);
        self.in_flight.spawn(async move {
            match service.calories().popular_activities().await {
                Ok(activities) => Action::PopularLoaded(activities),
                Err(e) => Action::PopularFailed(e.user_message()),
            }
        });
    }

    /// Wait for the next request to finish and apply its result
    ///
    /// Returns the applied action, or `None` once nothing is in flight.
    /// A task that panicked is logged and skipped; its slice stays Pending.
    pub async fn next_completion(&mut self) -> Option<Action> {
        while let Some(joined) = self.in_flight.join_next().await {
            match joined {
                Ok(action) => {
                    tracing::debug!(action = action.name(), "Request completed");
                    self.store.dispatch(action.clone());
                    return Some(action);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Request task ended without a result");
                }
            }
        }
        None
    }

    /// Apply every in-flight completion
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    pub fn flush(&mut self) {
        self.store.flush();
    }

    /// Stop waiting on in-flight requests and hand back the store
    pub fn into_store(mut self) -> Store {
        self.in_flight.abort_all();
        self.store.flush();
        self.store
    }
}
