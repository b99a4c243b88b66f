//! State slices
//!
//! Each slice owns one part of [`AppState`](super::state::AppState) and a
//! pure `reduce` that ignores actions it does not handle.

pub mod auth;
pub mod calories;
pub mod exercises;
pub mod favourites;
pub mod fitness_exercises;
pub mod theme;
pub mod water;
pub mod wellness;

pub use auth::AuthState;
pub use calories::CaloriesState;
pub use exercises::ExercisesState;
pub use favourites::FavouritesState;
pub use fitness_exercises::FitnessExercisesState;
pub use theme::{Palette, ThemeState};
pub use water::WaterState;
pub use wellness::WellnessState;
