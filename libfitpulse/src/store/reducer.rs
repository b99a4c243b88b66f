//! Root reducer
//!
//! `(AppState, &Action) -> AppState`. Every slice reducer sees every
//! action; slices that do not handle it hand their state back untouched.
//! No I/O happens here.

use super::actions::Action;
use super::slices;
use super::state::AppState;

pub fn reduce(state: AppState, action: &Action) -> AppState {
    AppState {
        auth: slices::auth::reduce(state.auth, action),
        exercises: slices::exercises::reduce(state.exercises, action),
        fitness_exercises: slices::fitness_exercises::reduce(state.fitness_exercises, action),
        favourites: slices::favourites::reduce(state.favourites, action),
        water: slices::water::reduce(state.water, action),
        wellness: slices::wellness::reduce(state.wellness, action),
        theme: slices::theme::reduce(state.theme, action),
        calories: slices::calories::reduce(state.calories, action),
    }
}
