//! Scripted service sources for tests
//!
//! Each mock answers from canned data, can be told to fail, can be slowed
//! down to reorder completions, and records the requests it received.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use super::{ExerciseRecord, FitnessSource, ProductRecord, ProductSource};
use crate::error::{ApiError, Result};
use crate::types::{CaloriesBurned, CaloriesRequest, ExerciseFilters};

type Scripted<T> = std::result::Result<T, String>;

fn unavailable(service: &str, message: &str) -> crate::FitpulseError {
    ApiError::Transport {
        service: service.to_string(),
        message: message.to_string(),
    }
    .into()
}

/// Build a fitness record the way the service would send it
pub fn exercise_record(name: &str, muscle: &str, difficulty: &str) -> ExerciseRecord {
    ExerciseRecord {
        name: name.to_string(),
        exercise_type: Some("strength".to_string()),
        muscle: Some(muscle.to_string()),
        equipment: None,
        difficulty: Some(difficulty.to_string()),
        instructions: None,
    }
}

pub fn calories_row(name: &str, per_hour: f64, minutes: f64) -> CaloriesBurned {
    CaloriesBurned {
        name: name.to_string(),
        calories_per_hour: per_hour,
        duration_minutes: minutes,
        total_calories: (per_hour * minutes / 60.0).round(),
    }
}

#[derive(Clone)]
struct ExerciseScript {
    delay: Duration,
    response: Scripted<Vec<ExerciseRecord>>,
}

/// Scripted [`FitnessSource`]
///
/// Exercise responses are chosen by the `muscle` filter when a script for
/// that muscle exists, otherwise the default script answers. Calorie
/// responses are chosen by activity; unknown activities get an empty list.
#[derive(Clone)]
pub struct MockFitnessSource {
    default_exercises: ExerciseScript,
    by_muscle: HashMap<String, ExerciseScript>,
    calories: HashMap<String, Scripted<Vec<CaloriesBurned>>>,
    exercise_calls: Arc<Mutex<Vec<ExerciseFilters>>>,
    calorie_calls: Arc<Mutex<Vec<CaloriesRequest>>>,
}

impl Default for MockFitnessSource {
    fn default() -> Self {
        Self {
            default_exercises: ExerciseScript {
                delay: Duration::ZERO,
                response: Ok(Vec::new()),
            },
            by_muscle: HashMap::new(),
            calories: HashMap::new(),
            exercise_calls: Arc::new(Mutex::new(Vec::new())),
            calorie_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockFitnessSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exercises(mut self, records: Vec<ExerciseRecord>) -> Self {
        self.default_exercises.response = Ok(records);
        self
    }

    pub fn failing_exercises(mut self, message: &str) -> Self {
        self.default_exercises.response = Err(message.to_string());
        self
    }

    /// Answer searches for `muscle` after `delay`
    pub fn with_muscle(mut self, muscle: &str, delay: Duration, records: Vec<ExerciseRecord>) -> Self {
        self.by_muscle.insert(
            muscle.to_string(),
            ExerciseScript {
                delay,
                response: Ok(records),
            },
        );
        self
    }

    pub fn with_calories(mut self, activity: &str, rows: Vec<CaloriesBurned>) -> Self {
        self.calories.insert(activity.to_string(), Ok(rows));
        self
    }

    pub fn failing_calories(mut self, activity: &str, message: &str) -> Self {
        self.calories.insert(activity.to_string(), Err(message.to_string()));
        self
    }

    pub fn exercise_calls(&self) -> Vec<ExerciseFilters> {
        self.exercise_calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn calorie_calls(&self) -> Vec<CaloriesRequest> {
        self.calorie_calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl FitnessSource for MockFitnessSource {
    async fn exercises(&self, filters: &ExerciseFilters) -> Result<Vec<ExerciseRecord>> {
        if let Ok(mut calls) = self.exercise_calls.lock() {
            calls.push(filters.clone());
        }
        let script = self
            .by_muscle
            .get(&filters.muscle)
            .unwrap_or(&self.default_exercises)
            .clone();
        if !script.delay.is_zero() {
            sleep(script.delay).await;
        }
        script.response.map_err(|m| unavailable("fitness", &m))
    }

    async fn calories_burned(&self, request: &CaloriesRequest) -> Result<Vec<CaloriesBurned>> {
        if let Ok(mut calls) = self.calorie_calls.lock() {
            calls.push(request.clone());
        }
        match self.calories.get(&request.activity) {
            Some(Ok(rows)) => Ok(rows.clone()),
            Some(Err(message)) => Err(unavailable("fitness", message)),
            None => Ok(Vec::new()),
        }
    }
}

/// Scripted [`ProductSource`]
#[derive(Clone)]
pub struct MockProductSource {
    response: Scripted<Vec<ProductRecord>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<u32>>>,
}

impl Default for MockProductSource {
    fn default() -> Self {
        Self {
            response: Ok(Vec::new()),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockProductSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(mut self, products: Vec<ProductRecord>) -> Self {
        self.response = Ok(products);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.response = Err(message.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Limits requested so far
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

pub fn product(id: u64, title: &str, rating: f64) -> ProductRecord {
    ProductRecord {
        id: serde_json::Value::from(id),
        title: title.to_string(),
        description: format!("{} description", title),
        thumbnail: Some(format!("https://cdn.example/{}.png", id)),
        rating,
    }
}

#[async_trait]
impl ProductSource for MockProductSource {
    async fn products(&self, limit: u32) -> Result<Vec<ProductRecord>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(limit);
        }
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.response
            .clone()
            .map_err(|m| unavailable("product catalog", &m))
    }
}
