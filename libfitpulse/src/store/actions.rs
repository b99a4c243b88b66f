//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. Remote fetches come in
//! triples (`*Requested`, `*Loaded`/`*Succeeded`, `*Failed`); the rest are
//! plain local edits.

use crate::types::{
    AuthGrant, CaloriesBurned, ExerciseFeed, ExerciseItem, FilterPatch, PopularActivity,
};

/// Actions that trigger state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // === Auth ===
    /// Login or registration submitted
    AuthRequested,

    /// Credentials accepted
    AuthSucceeded(AuthGrant),

    /// Credentials rejected or the form was invalid
    AuthFailed(String),

    /// Drop the token, keep the profile
    Logout,

    /// Edit locally stored profile fields; `None` leaves a field as is
    ///
    /// `profile_pic: Some(None)` clears the picture.
    UpdateProfile {
        username: Option<String>,
        profile_pic: Option<Option<String>>,
    },

    // === Product catalog ===
    CatalogRequested,
    CatalogLoaded(Vec<ExerciseItem>),
    CatalogFailed(String),

    // === Exercise search ===
    ExercisesRequested,
    ExercisesLoaded(ExerciseFeed),
    ExercisesFailed(String),

    /// Merge a partial filter update
    SetFilters(FilterPatch),

    /// Reset every filter to empty
    ClearFilters,

    // === Favourites ===
    /// Insert unless an item with the same id is present
    AddFavourite(ExerciseItem),

    /// Remove by id
    RemoveFavourite(String),

    /// Remove if present by id, append otherwise
    ///
    /// Toggling a present item twice keeps the same set of ids, but the
    /// item moves to the end of the list.
    ToggleFavourite(ExerciseItem),

    // === Water ===
    AddWater,
    RemoveWater,
    SetDailyGoal(u32),
    ResetDaily,
    SetWaterIntake(u32),

    // === Wellness ===
    SelectTipCategory(String),
    SaveTip(String),
    RemoveTip(String),
    ToggleSavedTip(String),

    // === Theme ===
    ToggleTheme,
    SetDark(bool),

    // === Calories ===
    CaloriesRequested,
    CaloriesLoaded(Vec<CaloriesBurned>),
    CaloriesFailed(String),
    PopularRequested,
    PopularLoaded(Vec<PopularActivity>),
    PopularFailed(String),
}

impl Action {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::AuthRequested => "auth/requested",
            Action::AuthSucceeded(_) => "auth/succeeded",
            Action::AuthFailed(_) => "auth/failed",
            Action::Logout => "auth/logout",
            Action::UpdateProfile { .. } => "auth/update_profile",
            Action::CatalogRequested => "exercises/requested",
            Action::CatalogLoaded(_) => "exercises/loaded",
            Action::CatalogFailed(_) => "exercises/failed",
            Action::ExercisesRequested => "fitness_exercises/requested",
            Action::ExercisesLoaded(_) => "fitness_exercises/loaded",
            Action::ExercisesFailed(_) => "fitness_exercises/failed",
            Action::SetFilters(_) => "fitness_exercises/set_filters",
            Action::ClearFilters => "fitness_exercises/clear_filters",
            Action::AddFavourite(_) => "favourites/add",
            Action::RemoveFavourite(_) => "favourites/remove",
            Action::ToggleFavourite(_) => "favourites/toggle",
            Action::AddWater => "water/add",
            Action::RemoveWater => "water/remove",
            Action::SetDailyGoal(_) => "water/set_daily_goal",
            Action::ResetDaily => "water/reset_daily",
            Action::SetWaterIntake(_) => "water/set_intake",
            Action::SelectTipCategory(_) => "wellness/select_category",
            Action::SaveTip(_) => "wellness/save_tip",
            Action::RemoveTip(_) => "wellness/remove_tip",
            Action::ToggleSavedTip(_) => "wellness/toggle_tip",
            Action::ToggleTheme => "theme/toggle",
            Action::SetDark(_) => "theme/set_dark",
            Action::CaloriesRequested => "calories/requested",
            Action::CaloriesLoaded(_) => "calories/loaded",
            Action::CaloriesFailed(_) => "calories/failed",
            Action::PopularRequested => "calories/popular_requested",
            Action::PopularLoaded(_) => "calories/popular_loaded",
            Action::PopularFailed(_) => "calories/popular_failed",
        }
    }
}
