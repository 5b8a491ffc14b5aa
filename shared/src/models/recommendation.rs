//! Planting recommendation models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed text returned when no recommendation can be produced
pub const INSUFFICIENT_DATA_MESSAGE: &str =
    "Not enough data to produce a planting recommendation";

/// Terminal status of a planting recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationStatus {
    Optimal,
    Good,
    Poor,
    Bad,
    Unknown,
}

impl RecommendationStatus {
    /// Human-readable label for the status
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationStatus::Optimal => "Highly Suitable",
            RecommendationStatus::Good => "Suitable",
            RecommendationStatus::Poor => "Marginal",
            RecommendationStatus::Bad => "Not Recommended",
            RecommendationStatus::Unknown => "Insufficient Data",
        }
    }
}

/// Per-metric suitability scores, each in [0, 1]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricScores {
    pub temperature: f64,
    pub rainfall: f64,
    pub humidity: f64,
    pub overall: f64,
}

/// Complete recommendation for one crop, computed fresh per request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendation {
    #[serde(rename = "id")]
    pub crop_id: String,
    pub crop: String,
    pub status: RecommendationStatus,
    pub status_text: String,
    pub recommendation: String,
    pub best_dates: Vec<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_temp: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rainfall: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_humidity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<MetricScores>,
}

impl CropRecommendation {
    /// Recommendation for a crop that cannot be scored: unknown crop,
    /// missing rule set or an empty forecast window.
    pub fn insufficient_data(crop_id: &str, crop_name: &str) -> Self {
        Self {
            crop_id: crop_id.to_string(),
            crop: crop_name.to_string(),
            status: RecommendationStatus::Unknown,
            status_text: RecommendationStatus::Unknown.label().to_string(),
            recommendation: INSUFFICIENT_DATA_MESSAGE.to_string(),
            best_dates: Vec::new(),
            avg_temp: None,
            total_rainfall: None,
            avg_humidity: None,
            scores: None,
        }
    }
}
