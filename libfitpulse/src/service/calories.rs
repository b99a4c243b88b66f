//! Calorie estimates with client-side input checks

use futures::future::join_all;
use std::sync::Arc;

use crate::api::FitnessSource;
use crate::error::{FitpulseError, Result};
use crate::types::{CaloriesBurned, CaloriesRequest, PopularActivity};

pub const MIN_WEIGHT_LBS: u32 = 50;
pub const MAX_WEIGHT_LBS: u32 = 500;
pub const MIN_DURATION_MINUTES: u32 = 1;

pub const POPULAR_ACTIVITIES: [&str; 4] = ["running", "cycling", "swimming", "weight training"];
pub const POPULAR_WEIGHT_LBS: u32 = 160;
pub const POPULAR_DURATION_MINUTES: u32 = 60;

/// Reject out-of-range input before anything goes on the wire
pub fn validate(request: &CaloriesRequest) -> Result<()> {
    if request.activity.trim().is_empty() {
        return Err(FitpulseError::InvalidInput("Activity is required".to_string()));
    }
    if !(MIN_WEIGHT_LBS..=MAX_WEIGHT_LBS).contains(&request.weight_lbs) {
        return Err(FitpulseError::InvalidInput(
            "Weight must be between 50 and 500 lbs".to_string(),
        ));
    }
    if request.duration_minutes < MIN_DURATION_MINUTES {
        return Err(FitpulseError::InvalidInput(
            "Duration must be at least 1 minute".to_string(),
        ));
    }
    Ok(())
}

/// `activity-calories_per_hour`, with whole numbers printed without a fraction
pub fn popular_id(activity: &str, calories_per_hour: f64) -> String {
    if calories_per_hour.fract() == 0.0 {
        format!("{}-{}", activity, calories_per_hour as i64)
    } else {
        format!("{}-{}", activity, calories_per_hour)
    }
}

pub struct CaloriesService {
    source: Arc<dyn FitnessSource>,
}

impl CaloriesService {
    pub fn new(source: Arc<dyn FitnessSource>) -> Self {
        Self { source }
    }

    /// Validated lookup; rows come back exactly as the service sent them
    pub async fn lookup(&self, request: &CaloriesRequest) -> Result<Vec<CaloriesBurned>> {
        validate(request)?;
        self.source.calories_burned(request).await
    }

    /// First result for each popular activity, looked up concurrently
    ///
    /// Activities that fail or return nothing are left out; the rest keep
    /// the fixed activity order. Only when every lookup fails is the last
    /// error returned.
    pub async fn popular_activities(&self) -> Result<Vec<PopularActivity>> {
        let lookups = POPULAR_ACTIVITIES.iter().map(|activity| {
            let request = CaloriesRequest::new(*activity, POPULAR_WEIGHT_LBS, POPULAR_DURATION_MINUTES);
            async move {
                let rows = self.source.calories_burned(&request).await?;
                Ok::<_, FitpulseError>(rows.into_iter().next().map(|first| PopularActivity {
                    id: popular_id(&request.activity, first.calories_per_hour),
                    activity_type: request.activity,
                    result: first,
                }))
            }
        });

        let mut activities = Vec::new();
        let mut last_error: Option<FitpulseError> = None;
        let mut failures = 0;
        for (activity, outcome) in POPULAR_ACTIVITIES.iter().zip(join_all(lookups).await) {
            match outcome {
                Ok(Some(found)) => activities.push(found),
                Ok(None) => tracing::debug!(activity, "No calorie data for popular activity"),
                Err(e) => {
                    tracing::warn!(activity, error = %e, "Popular activity lookup failed");
                    failures += 1;
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if failures == POPULAR_ACTIVITIES.len() => Err(e),
            _ => Ok(activities),
        }
    }
}
