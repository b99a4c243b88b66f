//! Application state
//!
//! Single source of truth for the client. Values are replaced wholesale by
//! the reducer (see `reducer.rs`), never edited in place.

use serde::{Deserialize, Serialize};

use super::slices::{
    AuthState, CaloriesState, ExercisesState, FavouritesState, FitnessExercisesState, ThemeState,
    WaterState, WellnessState,
};

/// Root application state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub auth: AuthState,

    /// Product catalog shown on the home screen
    pub exercises: ExercisesState,

    /// Exercise search results and filters
    pub fitness_exercises: FitnessExercisesState,

    pub favourites: FavouritesState,
    pub water: WaterState,
    pub wellness: WellnessState,
    pub theme: ThemeState,
    pub calories: CaloriesState,
}
