//! Weather data models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One raw reading from the weather provider, attributable to a 1h or
/// 3h accumulation window. Request-scoped, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    /// Air temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in meters per second
    pub wind_speed: f64,
    /// Rain accumulated over the preceding hour, in mm
    pub rain_1h_mm: Option<f64>,
    /// Rain accumulated over the preceding three hours, in mm
    pub rain_3h_mm: Option<f64>,
}

/// One calendar day's aggregated forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temp_min: i32,
    pub temp_max: i32,
    pub temp_avg: i32,
    pub humidity: i32,
    /// Total rainfall in mm, one decimal
    pub rainfall: f64,
    /// Average wind speed in m/s, one decimal
    pub wind_speed: f64,
}

/// Current weather conditions at a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temp: i32,
    pub humidity: i32,
    pub wind_speed: f64,
    pub visibility_km: i32,
    pub description: String,
    pub pressure: i32,
}
