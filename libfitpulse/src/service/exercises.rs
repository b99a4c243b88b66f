//! Exercise search with the built-in fallback list

use std::sync::Arc;

use crate::api::{ExerciseRecord, FitnessSource};
use crate::error::Result;
use crate::types::{ExerciseFeed, ExerciseFilters, ExerciseItem, ExerciseStatus, FeedSource};

pub const EXERCISE_TYPES: [&str; 7] = [
    "cardio",
    "olympic_weightlifting",
    "plyometrics",
    "powerlifting",
    "strength",
    "stretching",
    "strongman",
];

pub const MUSCLE_GROUPS: [&str; 16] = [
    "abdominals",
    "adductors",
    "biceps",
    "calves",
    "chest",
    "forearms",
    "glutes",
    "hamstrings",
    "lats",
    "lower_back",
    "middle_back",
    "neck",
    "quadriceps",
    "shoulders",
    "traps",
    "triceps",
];

pub const DIFFICULTY_LEVELS: [&str; 3] = ["beginner", "intermediate", "expert"];

const NO_INSTRUCTIONS: &str = "No instructions provided";
const NO_EQUIPMENT: &str = "No equipment";

/// name, type, muscle, equipment, difficulty, instructions
const FALLBACK: [(&str, &str, &str, &str, &str, &str); 10] = [
    (
        "Push-Up",
        "strength",
        "chest",
        "body_only",
        "beginner",
        "Start in a high plank with hands under the shoulders. Lower the chest to just above the floor, then press back up.",
    ),
    (
        "Bodyweight Squat",
        "strength",
        "quadriceps",
        "body_only",
        "beginner",
        "Stand with feet shoulder-width apart. Sit the hips back and down until the thighs are parallel to the floor, then stand up.",
    ),
    (
        "Plank",
        "strength",
        "abdominals",
        "body_only",
        "beginner",
        "Rest on the forearms and toes with the body in a straight line. Hold the position while bracing the core.",
    ),
    (
        "Lunge",
        "strength",
        "quadriceps",
        "body_only",
        "beginner",
        "Step forward and lower the back knee toward the floor. Push through the front heel to return and switch legs.",
    ),
    (
        "Burpee",
        "plyometrics",
        "quadriceps",
        "body_only",
        "intermediate",
        "Squat, kick the feet back into a plank, do a push-up, jump the feet in and explode upward.",
    ),
    (
        "Mountain Climber",
        "cardio",
        "abdominals",
        "body_only",
        "intermediate",
        "From a high plank, drive the knees toward the chest one at a time at a quick pace.",
    ),
    (
        "Dumbbell Bicep Curl",
        "strength",
        "biceps",
        "dumbbell",
        "beginner",
        "Hold a dumbbell in each hand with palms forward. Curl the weights to the shoulders and lower under control.",
    ),
    (
        "Jumping Jacks",
        "cardio",
        "calves",
        "body_only",
        "beginner",
        "Jump the feet out while raising the arms overhead, then jump back to the start.",
    ),
    (
        "Glute Bridge",
        "strength",
        "glutes",
        "body_only",
        "beginner",
        "Lie on the back with knees bent. Drive the hips up by squeezing the glutes, pause, and lower.",
    ),
    (
        "Pull-Up",
        "strength",
        "lats",
        "pull-up_bar",
        "expert",
        "Hang from a bar with an overhand grip. Pull the chin over the bar and lower to a full hang.",
    ),
];

/// Map service records to items, keeping order; ids are `name-index`
pub fn shape(records: Vec<ExerciseRecord>) -> Vec<ExerciseItem> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let difficulty = record.difficulty.unwrap_or_default();
            ExerciseItem {
                id: format!("{}-{}", record.name, index),
                status: ExerciseStatus::from_difficulty(&difficulty),
                title: record.name,
                description: record
                    .instructions
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| NO_INSTRUCTIONS.to_string()),
                muscle: record.muscle,
                difficulty: Some(difficulty).filter(|d| !d.is_empty()),
                exercise_type: record.exercise_type,
                equipment: Some(
                    record
                        .equipment
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| NO_EQUIPMENT.to_string()),
                ),
                image: None,
            }
        })
        .collect()
}

/// The ten built-in exercises, in fixed order
pub fn fallback_exercises() -> Vec<ExerciseItem> {
    let records = FALLBACK
        .iter()
        .map(
            |(name, exercise_type, muscle, equipment, difficulty, instructions)| ExerciseRecord {
                name: name.to_string(),
                exercise_type: Some(exercise_type.to_string()),
                muscle: Some(muscle.to_string()),
                equipment: Some(equipment.to_string()),
                difficulty: Some(difficulty.to_string()),
                instructions: Some(instructions.to_string()),
            },
        )
        .collect();
    shape(records)
}

pub struct ExerciseService {
    source: Arc<dyn FitnessSource>,
    default_muscle: String,
    use_fallback: bool,
}

impl ExerciseService {
    pub fn new(source: Arc<dyn FitnessSource>, default_muscle: impl Into<String>) -> Self {
        Self {
            source,
            default_muscle: default_muscle.into(),
            use_fallback: true,
        }
    }

    /// Report failures as errors instead of substituting the fallback list
    pub fn without_fallback(mut self) -> Self {
        self.use_fallback = false;
        self
    }

    pub fn default_muscle(&self) -> &str {
        &self.default_muscle
    }

    /// Search with `filters`
    ///
    /// With no filters set this is the base listing: an empty answer is
    /// replaced by the fallback list. A filtered search that matches
    /// nothing is a live, empty feed.
    pub async fn search(&self, filters: &ExerciseFilters) -> Result<ExerciseFeed> {
        self.fetch(filters, filters.is_empty()).await
    }

    /// Exercises for one muscle group, the default group when `None`
    ///
    /// This backs the initial screen load, so an empty answer falls back.
    pub async fn by_muscle(&self, muscle: Option<&str>) -> Result<ExerciseFeed> {
        let muscle = muscle
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.default_muscle);
        self.fetch(&ExerciseFilters::by_muscle(muscle), true).await
    }

    /// Initial listing
    pub async fn list(&self) -> Result<ExerciseFeed> {
        self.by_muscle(None).await
    }

    async fn fetch(&self, filters: &ExerciseFilters, base_listing: bool) -> Result<ExerciseFeed> {
        match self.source.exercises(filters).await {
            Ok(records) if records.is_empty() && base_listing && self.use_fallback => {
                tracing::info!(?filters, "Base listing empty, using built-in exercises");
                Ok(ExerciseFeed {
                    items: fallback_exercises(),
                    source: FeedSource::FallbackEmpty,
                })
            }
            Ok(records) => {
                tracing::debug!(count = records.len(), "Exercises loaded");
                Ok(ExerciseFeed {
                    items: shape(records),
                    source: FeedSource::Live,
                })
            }
            Err(e) if self.use_fallback => {
                tracing::warn!(error = %e, "Exercise service unavailable, using built-in exercises");
                Ok(ExerciseFeed {
                    items: fallback_exercises(),
                    source: FeedSource::FallbackUnavailable {
                        reason: e.to_string(),
                    },
                })
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{exercise_record, MockFitnessSource};
    use std::time::Duration;

    fn service(source: MockFitnessSource) -> ExerciseService {
        ExerciseService::new(Arc::new(source), "biceps")
    }

    #[test]
    fn test_shape_maps_in_order_with_defaults() {
        let records = vec![
            ExerciseRecord {
                name: "Hammer Curl".to_string(),
                exercise_type: Some("strength".to_string()),
                muscle: Some("biceps".to_string()),
                equipment: None,
                difficulty: Some("intermediate".to_string()),
                instructions: None,
            },
            exercise_record("Plank", "abdominals", "easy"),
        ];
        let items = shape(records);

        assert_eq!(items[0].id, "Hammer Curl-0");
        assert_eq!(items[0].description, "No instructions provided");
        assert_eq!(items[0].equipment.as_deref(), Some("No equipment"));
        assert_eq!(items[0].status, ExerciseStatus::Intermediate);
        assert_eq!(items[1].id, "Plank-1");
        assert_eq!(items[1].status, ExerciseStatus::Beginner);
    }

    #[test]
    fn test_duplicate_names_get_distinct_ids() {
        let items = shape(vec![
            exercise_record("Curl", "biceps", "beginner"),
            exercise_record("Curl", "biceps", "beginner"),
        ]);
        assert_ne!(items[0].id, items[1].id);
    }

    #[test]
    fn test_fallback_list_is_fixed() {
        let items = fallback_exercises();
        assert_eq!(items.len(), 10);
        assert_eq!(items[0].title, "Push-Up");
        assert_eq!(items[9].title, "Pull-Up");
        assert_eq!(items[9].status, ExerciseStatus::Advanced);
        assert_eq!(items, fallback_exercises());
    }

    #[tokio::test]
    async fn test_empty_base_listing_falls_back() {
        let feed = service(MockFitnessSource::new()).list().await.unwrap();
        assert_eq!(feed.source, FeedSource::FallbackEmpty);
        assert_eq!(feed.items, fallback_exercises());
    }

    #[tokio::test]
    async fn test_empty_unfiltered_search_falls_back() {
        let feed = service(MockFitnessSource::new())
            .search(&ExerciseFilters::default())
            .await
            .unwrap();
        assert_eq!(feed.source, FeedSource::FallbackEmpty);
    }

    #[tokio::test]
    async fn test_filtered_search_with_no_matches_is_live_and_empty() {
        let feed = service(MockFitnessSource::new())
            .search(&ExerciseFilters {
                name: "zzz".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(feed.source, FeedSource::Live);
        assert!(feed.items.is_empty());
    }

    #[tokio::test]
    async fn test_failure_falls_back_with_reason() {
        let feed = service(MockFitnessSource::new().failing_exercises("connection refused"))
            .search(&ExerciseFilters::by_muscle("chest"))
            .await
            .unwrap();
        assert_eq!(feed.items, fallback_exercises());
        match feed.source {
            FeedSource::FallbackUnavailable { reason } => assert!(reason.contains("connection refused")),
            other => panic!("unexpected source {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failure_without_fallback_is_an_error() {
        let service = service(MockFitnessSource::new().failing_exercises("down")).without_fallback();
        assert!(service.list().await.is_err());
    }

    #[tokio::test]
    async fn test_by_muscle_defaults_to_biceps() {
        let source = MockFitnessSource::new().with_muscle(
            "biceps",
            Duration::ZERO,
            vec![exercise_record("Curl", "biceps", "beginner")],
        );
        let service = service(source.clone());

        let feed = service.by_muscle(None).await.unwrap();
        assert_eq!(feed.source, FeedSource::Live);
        assert_eq!(feed.items[0].title, "Curl");
        assert_eq!(source.exercise_calls()[0], ExerciseFilters::by_muscle("biceps"));

        service.by_muscle(Some("")).await.unwrap();
        assert_eq!(source.exercise_calls()[1].muscle, "biceps");
    }

    #[test]
    fn test_option_lists() {
        assert_eq!(EXERCISE_TYPES.len(), 7);
        assert_eq!(MUSCLE_GROUPS.len(), 16);
        assert_eq!(DIFFICULTY_LEVELS, ["beginner", "intermediate", "expert"]);
    }
}
