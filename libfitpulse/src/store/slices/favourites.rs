//! Favourite exercises, kept in insertion order and unique by id

use serde::{Deserialize, Serialize};

use crate::store::actions::Action;
use crate::types::ExerciseItem;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavouritesState {
    pub items: Vec<ExerciseItem>,
}

impl FavouritesState {
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn reduce(state: FavouritesState, action: &Action) -> FavouritesState {
    match action {
        Action::AddFavourite(item) => add(state, item),
        Action::RemoveFavourite(id) => remove(state, id),
        Action::ToggleFavourite(item) => {
            if state.contains(&item.id) {
                remove(state, &item.id)
            } else {
                add(state, item)
            }
        }
        _ => state,
    }
}

fn add(state: FavouritesState, item: &ExerciseItem) -> FavouritesState {
    if state.contains(&item.id) {
        return state;
    }
    let mut items = state.items;
    items.push(item.clone());
    FavouritesState { items }
}

fn remove(state: FavouritesState, id: &str) -> FavouritesState {
    FavouritesState {
        items: state.items.into_iter().filter(|item| item.id != id).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExerciseStatus;

    fn item(id: &str, title: &str) -> ExerciseItem {
        ExerciseItem {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            muscle: None,
            difficulty: None,
            exercise_type: None,
            equipment: None,
            status: ExerciseStatus::Advanced,
            image: None,
        }
    }

    #[test]
    fn test_add_is_deduplicated_by_id() {
        let state = reduce(FavouritesState::default(), &Action::AddFavourite(item("a-0", "A")));
        // same id, different payload: first insert wins
        let state = reduce(state, &Action::AddFavourite(item("a-0", "Renamed")));
        assert_eq!(state.len(), 1);
        assert_eq!(state.items[0].title, "A");
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let state = [item("b-0", "B"), item("a-0", "A"), item("c-0", "C")]
            .into_iter()
            .fold(FavouritesState::default(), |state, fav| {
                reduce(state, &Action::AddFavourite(fav))
            });
        let ids: Vec<_> = state.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b-0", "a-0", "c-0"]);
    }

    fn ids(state: &FavouritesState) -> Vec<&str> {
        state.items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let start = reduce(FavouritesState::default(), &Action::AddFavourite(item("a-0", "A")));
        let start = reduce(start, &Action::AddFavourite(item("b-0", "B")));

        // absent item: removed again from the end, order untouched
        let once = reduce(start.clone(), &Action::ToggleFavourite(item("z-9", "Z")));
        assert_eq!(ids(&once), vec!["a-0", "b-0", "z-9"]);
        let twice = reduce(once, &Action::ToggleFavourite(item("z-9", "Z")));
        assert_eq!(twice, start);

        // present item: comes back at the end
        let once = reduce(start.clone(), &Action::ToggleFavourite(item("a-0", "A")));
        assert_eq!(ids(&once), vec!["b-0"]);
        let twice = reduce(once, &Action::ToggleFavourite(item("a-0", "A")));
        assert_eq!(ids(&twice), vec!["b-0", "a-0"]);
    }

    #[test]
    fn test_toggle_absent_appends_at_end() {
        let state = reduce(FavouritesState::default(), &Action::AddFavourite(item("a-0", "A")));
        let state = reduce(state, &Action::ToggleFavourite(item("b-0", "B")));
        assert_eq!(state.items.last().map(|i| i.id.as_str()), Some("b-0"));
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let state = reduce(FavouritesState::default(), &Action::AddFavourite(item("a-0", "A")));
        let next = reduce(state.clone(), &Action::RemoveFavourite("nope".to_string()));
        assert_eq!(state, next);
    }
}
