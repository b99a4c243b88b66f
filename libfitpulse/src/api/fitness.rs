//! Exercise and calorie service client

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::http::HttpClient;
use super::FitnessSource;
use crate::error::{FitpulseError, Result};
use crate::types::{CaloriesBurned, CaloriesRequest, ExerciseFilters};

/// Exercise as returned by the service; every field may be absent
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExerciseRecord {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub exercise_type: Option<String>,
    #[serde(default)]
    pub muscle: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

pub struct FitnessApiClient {
    http: HttpClient,
}

impl FitnessApiClient {
    /// Client sending `api_key` as `X-Api-Key` on every request
    pub fn new(base_url: &str, api_key: Option<&SecretString>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        match api_key {
            Some(key) => {
                let mut value = HeaderValue::from_str(key.expose_secret()).map_err(|_| {
                    FitpulseError::InvalidInput("API key contains invalid header characters".to_string())
                })?;
                value.set_sensitive(true);
                headers.insert("X-Api-Key", value);
            }
            None => tracing::warn!("No fitness API key configured; requests will likely be rejected"),
        }

        Ok(Self {
            http: HttpClient::new("fitness", base_url, headers)?,
        })
    }
}

#[async_trait]
impl FitnessSource for FitnessApiClient {
    async fn exercises(&self, filters: &ExerciseFilters) -> Result<Vec<ExerciseRecord>> {
        self.http.get_json("/allexercises", &filters.query_pairs()).await
    }

    async fn calories_burned(&self, request: &CaloriesRequest) -> Result<Vec<CaloriesBurned>> {
        let weight = request.weight_lbs.to_string();
        let duration = request.duration_minutes.to_string();
        self.http
            .get_json(
                "/caloriesburned",
                &[
                    ("activity", request.activity.as_str()),
                    ("weight", weight.as_str()),
                    ("duration", duration.as_str()),
                ],
            )
            .await
    }
}
