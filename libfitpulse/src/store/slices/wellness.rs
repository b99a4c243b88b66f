//! Wellness tips: a fixed list, a category filter and the user's saved ids

use serde::{Deserialize, Serialize};

use crate::store::actions::Action;
use crate::types::WellnessTip;

pub const ALL_CATEGORIES: &str = "all";

const TIPS: [(&str, &str, &str, &str, &str, &str); 8] = [
    (
        "1",
        "Stay Hydrated",
        "Drink at least 8 glasses of water daily to maintain proper hydration and boost metabolism.",
        "droplet",
        "#3498db",
        "hydration",
    ),
    (
        "2",
        "Quality Sleep",
        "Get 7-9 hours of sleep each night for better recovery and muscle growth.",
        "moon",
        "#2c3e50",
        "rest",
    ),
    (
        "3",
        "Balanced Diet",
        "Consume proteins, carbs, and healthy fats in proper proportions for optimal health.",
        "coffee",
        "#27ae60",
        "nutrition",
    ),
    (
        "4",
        "Regular Exercise",
        "Aim for at least 150 minutes of moderate-intensity exercise per week.",
        "activity",
        "#e74c3c",
        "exercise",
    ),
    (
        "5",
        "Stress Management",
        "Practice meditation, yoga, or deep breathing to reduce stress and improve mental health.",
        "wind",
        "#9b59b6",
        "mindfulness",
    ),
    (
        "6",
        "Morning Stretching",
        "Start your day with 10-15 minutes of light stretching to improve flexibility.",
        "trending-up",
        "#f39c12",
        "flexibility",
    ),
    (
        "7",
        "Consistent Tracking",
        "Keep track of your workouts, water intake, and meals for better progress monitoring.",
        "bar-chart-2",
        "#16a085",
        "tracking",
    ),
    (
        "8",
        "Warm Up Before Workout",
        "Always warm up for 5-10 minutes before starting your exercise to prevent injuries.",
        "zap",
        "#d35400",
        "safety",
    ),
];

/// The built-in tip list
pub fn default_tips() -> Vec<WellnessTip> {
    TIPS.iter()
        .map(|(id, title, description, icon, color, category)| WellnessTip {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            category: category.to_string(),
        })
        .collect()
}

fn default_category() -> String {
    ALL_CATEGORIES.to_string()
}

/// Tips are static and never written to the snapshot; only the user's
/// choices are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WellnessState {
    #[serde(skip, default = "default_tips")]
    pub tips: Vec<WellnessTip>,
    pub selected_category: String,
    pub saved_tips: Vec<String>,
}

impl Default for WellnessState {
    fn default() -> Self {
        Self {
            tips: default_tips(),
            selected_category: default_category(),
            saved_tips: Vec::new(),
        }
    }
}

impl WellnessState {
    pub fn is_saved(&self, id: &str) -> bool {
        self.saved_tips.iter().any(|saved| saved == id)
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];
        for tip in &self.tips {
            if !categories.contains(&tip.category.as_str()) {
                categories.push(tip.category.as_str());
            }
        }
        categories
    }
}

pub fn reduce(state: WellnessState, action: &Action) -> WellnessState {
    match action {
        Action::SelectTipCategory(category) => WellnessState {
            selected_category: category.clone(),
            ..state
        },
        Action::SaveTip(id) => save(state, id),
        Action::RemoveTip(id) => remove(state, id),
        Action::ToggleSavedTip(id) => {
            if state.is_saved(id) {
                remove(state, id)
            } else {
                save(state, id)
            }
        }
        _ => state,
    }
}

fn save(state: WellnessState, id: &str) -> WellnessState {
    if state.is_saved(id) {
        return state;
    }
    let mut saved_tips = state.saved_tips;
    saved_tips.push(id.to_string());
    WellnessState {
        saved_tips,
        ..state
    }
}

fn remove(state: WellnessState, id: &str) -> WellnessState {
    WellnessState {
        saved_tips: state.saved_tips.into_iter().filter(|saved| saved != id).collect(),
        ..state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = WellnessState::default();
        assert_eq!(state.tips.len(), 8);
        assert_eq!(state.tips[0].title, "Stay Hydrated");
        assert_eq!(state.tips[7].category, "safety");
        assert_eq!(state.selected_category, "all");
        assert!(state.saved_tips.is_empty());
    }

    #[test]
    fn test_save_is_deduplicated() {
        let state = reduce(WellnessState::default(), &Action::SaveTip("3".to_string()));
        let state = reduce(state, &Action::SaveTip("3".to_string()));
        assert_eq!(state.saved_tips, vec!["3"]);
    }

    #[test]
    fn test_toggle_and_remove() {
        let state = reduce(WellnessState::default(), &Action::ToggleSavedTip("2".to_string()));
        assert!(state.is_saved("2"));
        let state = reduce(state, &Action::ToggleSavedTip("2".to_string()));
        assert!(!state.is_saved("2"));

        let state = reduce(state, &Action::SaveTip("5".to_string()));
        let state = reduce(state, &Action::RemoveTip("5".to_string()));
        assert!(state.saved_tips.is_empty());
    }

    #[test]
    fn test_snapshot_omits_tips() {
        let state = reduce(WellnessState::default(), &Action::SaveTip("1".to_string()));
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("tips").is_none());

        let restored: WellnessState = serde_json::from_value(json).unwrap();
        assert_eq!(restored.tips.len(), 8);
        assert_eq!(restored.saved_tips, vec!["1"]);
    }

    #[test]
    fn test_categories_start_with_all() {
        let state = WellnessState::default();
        let categories = state.categories();
        assert_eq!(categories[0], "all");
        assert_eq!(categories.len(), 9);
    }
}
