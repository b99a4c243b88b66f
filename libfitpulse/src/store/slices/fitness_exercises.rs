//! Exercise search slice: results, where they came from, and the active filters

use serde::{Deserialize, Serialize};

use crate::store::actions::Action;
use crate::store::request::RemoteRequestState;
use crate::types::{ExerciseFilters, ExerciseItem, FeedSource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessExercisesState {
    pub items: RemoteRequestState<Vec<ExerciseItem>>,
    pub source: FeedSource,
    pub filters: ExerciseFilters,
}

impl FitnessExercisesState {
    /// True when the visible items are the built-in list, not search results
    pub fn showing_fallback(&self) -> bool {
        self.source.is_fallback()
    }
}

pub fn reduce(state: FitnessExercisesState, action: &Action) -> FitnessExercisesState {
    match action {
        Action::ExercisesRequested => FitnessExercisesState {
            items: state.items.begin(),
            ..state
        },

        Action::ExercisesLoaded(feed) => FitnessExercisesState {
            items: state.items.succeed(feed.items.clone()),
            source: feed.source.clone(),
            ..state
        },

        Action::ExercisesFailed(error) => FitnessExercisesState {
            items: state.items.fail(error.clone()),
            ..state
        },

        Action::SetFilters(patch) => FitnessExercisesState {
            filters: state.filters.merge(patch.clone()),
            ..state
        },

        Action::ClearFilters => FitnessExercisesState {
            filters: ExerciseFilters::default(),
            ..state
        },

        _ => state,
    }
}
