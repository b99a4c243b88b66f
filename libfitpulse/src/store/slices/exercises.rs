//! Product catalog slice

use serde::{Deserialize, Serialize};

use crate::store::actions::Action;
use crate::store::request::RemoteRequestState;
use crate::types::ExerciseItem;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExercisesState {
    pub items: RemoteRequestState<Vec<ExerciseItem>>,
}

pub fn reduce(state: ExercisesState, action: &Action) -> ExercisesState {
    match action {
        Action::CatalogRequested => ExercisesState {
            items: state.items.begin(),
        },
        Action::CatalogLoaded(items) => ExercisesState {
            items: state.items.succeed(items.clone()),
        },
        Action::CatalogFailed(error) => ExercisesState {
            items: state.items.fail(error.clone()),
        },
        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::request::RequestStatus;
    use crate::types::ExerciseStatus;

    fn product(id: &str) -> ExerciseItem {
        ExerciseItem {
            id: id.to_string(),
            title: format!("Product {}", id),
            description: String::new(),
            muscle: None,
            difficulty: None,
            exercise_type: None,
            equipment: None,
            status: ExerciseStatus::Active,
            image: None,
        }
    }

    #[test]
    fn test_catalog_lifecycle() {
        let state = reduce(ExercisesState::default(), &Action::CatalogRequested);
        assert!(state.items.is_loading());

        let state = reduce(state, &Action::CatalogLoaded(vec![product("1"), product("2")]));
        assert_eq!(state.items.status(), RequestStatus::Succeeded);
        assert_eq!(state.items.data().len(), 2);
    }

    #[test]
    fn test_failure_keeps_items() {
        let state = reduce(ExercisesState::default(), &Action::CatalogLoaded(vec![product("1")]));
        let state = reduce(state, &Action::CatalogRequested);
        let state = reduce(state, &Action::CatalogFailed("HTTP 500".to_string()));

        assert_eq!(state.items.status(), RequestStatus::Failed);
        assert_eq!(state.items.error(), Some("HTTP 500"));
        assert_eq!(state.items.data().len(), 1);
    }
}
