//! Derived views over [`AppState`]
//!
//! Pure functions; nothing here is stored.

use serde::Serialize;

use super::state::AppState;
use crate::types::{ExerciseItem, WellnessTip};
use super::slices::wellness::ALL_CATEGORIES;

/// Exercise counts by difficulty bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyBreakdown {
    pub easy: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

/// Figures shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_exercises: usize,
    pub favourites: usize,
    pub water_cups: u32,
    pub water_goal: u32,
    pub water_percentage: u32,
    pub difficulty: DifficultyBreakdown,
}

pub fn is_authenticated(state: &AppState) -> bool {
    state.auth.is_authenticated()
}

pub fn is_favourite(state: &AppState, id: &str) -> bool {
    state.favourites.contains(id)
}

/// Progress toward the daily goal, capped at 100
pub fn water_percentage(state: &AppState) -> u32 {
    let water = &state.water;
    if water.daily_goal == 0 {
        return if water.cups > 0 { 100 } else { 0 };
    }
    let percentage = (u64::from(water.cups) * 100) / u64::from(water.daily_goal);
    percentage.min(100) as u32
}

pub fn water_goal_met(state: &AppState) -> bool {
    state.water.cups >= state.water.daily_goal
}

/// Buckets catalog items by difficulty
///
/// "easy" and "beginner" count as easy, "advanced" and "expert" as
/// advanced. Items without a recognised difficulty are not counted.
pub fn difficulty_breakdown(items: &[ExerciseItem]) -> DifficultyBreakdown {
    items
        .iter()
        .filter_map(|item| item.difficulty.as_deref())
        .fold(DifficultyBreakdown::default(), |mut acc, difficulty| {
            match difficulty.to_ascii_lowercase().as_str() {
                "easy" | "beginner" => acc.easy += 1,
                "intermediate" => acc.intermediate += 1,
                "advanced" | "expert" => acc.advanced += 1,
                _ => {}
            }
            acc
        })
}

pub fn dashboard_stats(state: &AppState) -> DashboardStats {
    let items = state.exercises.items.data();
    DashboardStats {
        total_exercises: items.len(),
        favourites: state.favourites.len(),
        water_cups: state.water.cups,
        water_goal: state.water.daily_goal,
        water_percentage: water_percentage(state),
        difficulty: difficulty_breakdown(items),
    }
}

/// Tips matching the selected category, or all of them for "all"
pub fn visible_tips(state: &AppState) -> Vec<&WellnessTip> {
    let selected = state.wellness.selected_category.as_str();
    state
        .wellness
        .tips
        .iter()
        .filter(|tip| selected == ALL_CATEGORIES || tip.category == selected)
        .collect()
}

pub fn saved_tips(state: &AppState) -> Vec<&WellnessTip> {
    state
        .wellness
        .saved_tips
        .iter()
        .filter_map(|id| state.wellness.tips.iter().find(|tip| &tip.id == id))
        .collect()
}
