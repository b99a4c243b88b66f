//! Calorie lookups and the popular-activity summary

use serde::{Deserialize, Serialize};

use crate::store::actions::Action;
use crate::store::request::RemoteRequestState;
use crate::types::{CaloriesBurned, PopularActivity};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaloriesState {
    pub results: RemoteRequestState<Vec<CaloriesBurned>>,
    pub popular: RemoteRequestState<Vec<PopularActivity>>,
}

pub fn reduce(state: CaloriesState, action: &Action) -> CaloriesState {
    match action {
        Action::CaloriesRequested => CaloriesState {
            results: state.results.begin(),
            ..state
        },
        Action::CaloriesLoaded(results) => CaloriesState {
            results: state.results.succeed(results.clone()),
            ..state
        },
        Action::CaloriesFailed(error) => CaloriesState {
            results: state.results.fail(error.clone()),
            ..state
        },
        Action::PopularRequested => CaloriesState {
            popular: state.popular.begin(),
            ..state
        },
        Action::PopularLoaded(activities) => CaloriesState {
            popular: state.popular.succeed(activities.clone()),
            ..state
        },
        Action::PopularFailed(error) => CaloriesState {
            popular: state.popular.fail(error.clone()),
            ..state
        },
        _ => state,
    }
}
