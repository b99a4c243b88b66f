//! Daily water counter
//!
//! `cups` stays within `0..=2 * daily_goal` for every transition except
//! `SetDailyGoal`, which leaves an over-limit count alone until the next
//! change.

use serde::{Deserialize, Serialize};

use crate::store::actions::Action;

pub const DEFAULT_DAILY_GOAL: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterState {
    pub cups: u32,
    pub daily_goal: u32,
}

impl Default for WaterState {
    fn default() -> Self {
        Self {
            cups: 0,
            daily_goal: DEFAULT_DAILY_GOAL,
        }
    }
}

impl WaterState {
    pub fn limit(&self) -> u32 {
        self.daily_goal.saturating_mul(2)
    }
}

pub fn reduce(state: WaterState, action: &Action) -> WaterState {
    match action {
        Action::AddWater if state.cups < state.limit() => WaterState {
            cups: state.cups + 1,
            ..state
        },

        Action::RemoveWater => WaterState {
            cups: state.cups.saturating_sub(1),
            ..state
        },

        Action::SetDailyGoal(goal) => WaterState {
            daily_goal: *goal,
            ..state
        },

        Action::ResetDaily => WaterState { cups: 0, ..state },

        Action::SetWaterIntake(cups) => WaterState {
            cups: (*cups).min(state.limit()),
            ..state
        },

        _ => state,
    }
}
