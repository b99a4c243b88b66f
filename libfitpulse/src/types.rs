//! Core data types shared by services, slices and the snapshot

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Coarse label shown on an exercise card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseStatus {
    Beginner,
    Intermediate,
    Advanced,
    /// Catalog product rated above 4
    Popular,
    /// Any other catalog product
    Active,
}

impl ExerciseStatus {
    /// Label derived from an exercise difficulty string
    ///
    /// "easy" and "beginner" map to Beginner, "intermediate" to
    /// Intermediate, anything else (including an empty string) to Advanced.
    pub fn from_difficulty(difficulty: &str) -> Self {
        match difficulty.trim().to_ascii_lowercase().as_str() {
            "easy" | "beginner" => ExerciseStatus::Beginner,
            "intermediate" => ExerciseStatus::Intermediate,
            _ => ExerciseStatus::Advanced,
        }
    }

    /// Label derived from a catalog product rating
    pub fn from_rating(rating: f64) -> Self {
        if rating > 4.0 {
            ExerciseStatus::Popular
        } else {
            ExerciseStatus::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseStatus::Beginner => "Beginner",
            ExerciseStatus::Intermediate => "Intermediate",
            ExerciseStatus::Advanced => "Advanced",
            ExerciseStatus::Popular => "Popular",
            ExerciseStatus::Active => "Active",
        }
    }
}

impl std::fmt::Display for ExerciseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized exercise record
///
/// Built either from a fitness API record, a catalog product, or the static
/// fallback list. `id` is synthesized locally, so two source records with
/// the same name at the same position collide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseItem {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub muscle: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(rename = "type", default)]
    pub exercise_type: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    pub status: ExerciseStatus,
    #[serde(default)]
    pub image: Option<String>,
}

/// Search filters; empty strings mean "not set"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseFilters {
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub muscle: String,
    pub difficulty: String,
}

impl ExerciseFilters {
    pub fn by_muscle(muscle: impl Into<String>) -> Self {
        Self {
            muscle: muscle.into(),
            ..Default::default()
        }
    }

    /// Query pairs for the non-empty filters, in name/type/muscle/difficulty order
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", self.name.as_str()),
            ("type", self.exercise_type.as_str()),
            ("muscle", self.muscle.as_str()),
            ("difficulty", self.difficulty.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Overlay the fields set in `patch`
    pub fn merge(self, patch: FilterPatch) -> Self {
        Self {
            name: patch.name.unwrap_or(self.name),
            exercise_type: patch.exercise_type.unwrap_or(self.exercise_type),
            muscle: patch.muscle.unwrap_or(self.muscle),
            difficulty: patch.difficulty.unwrap_or(self.difficulty),
        }
    }
}

/// Partial filter update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub name: Option<String>,
    pub exercise_type: Option<String>,
    pub muscle: Option<String>,
    pub difficulty: Option<String>,
}

/// Where the items of an [`ExerciseFeed`] came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedSource {
    /// Items are exactly what the service returned (possibly none)
    #[default]
    Live,
    /// The base listing came back empty; items are the fallback list
    FallbackEmpty,
    /// The request failed; items are the fallback list
    FallbackUnavailable { reason: String },
}

impl FeedSource {
    pub fn is_fallback(&self) -> bool {
        !matches!(self, FeedSource::Live)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseFeed {
    pub items: Vec<ExerciseItem>,
    pub source: FeedSource,
}

/// Calorie lookup parameters as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaloriesRequest {
    pub activity: String,
    pub weight_lbs: u32,
    pub duration_minutes: u32,
}

impl CaloriesRequest {
    pub fn new(activity: impl Into<String>, weight_lbs: u32, duration_minutes: u32) -> Self {
        Self {
            activity: activity.into(),
            weight_lbs,
            duration_minutes,
        }
    }
}

/// One row of the calorie service response, kept as received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaloriesBurned {
    pub name: String,
    pub calories_per_hour: f64,
    pub duration_minutes: f64,
    pub total_calories: f64,
}

/// First calorie result for one of the popular activities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularActivity {
    pub id: String,
    pub activity_type: String,
    #[serde(flatten)]
    pub result: CaloriesBurned,
}

/// Persisted identity of the signed-in user
///
/// `token` is the only field logout clears.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: Option<String>,
    pub username: Option<String>,
    pub profile_pic: Option<String>,
}

/// Result of a successful login or registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGrant {
    pub token: String,
    pub username: String,
}

/// Login form values
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration form values
pub struct Registration {
    pub credentials: Credentials,
    /// Confirmation field; `None` when the form has no confirmation input
    pub confirm: Option<SecretString>,
}

impl Registration {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(username, password),
            confirm: None,
        }
    }

    pub fn with_confirmation(mut self, confirm: impl Into<String>) -> Self {
        self.confirm = Some(SecretString::from(confirm.into()));
        self
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("credentials", &self.credentials)
            .field("confirm", &self.confirm.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Static wellness advice card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessTip {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub category: String,
}
