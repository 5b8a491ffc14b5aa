//! Agronomic planting rules
//!
//! Each crop is described by three metric bands (temperature, rainfall,
//! humidity) plus a set of hard-stop avoid conditions. Bands come from
//! the static rule catalog and are immutable for the process lifetime.

use serde::{Deserialize, Serialize};

/// Inclusive numeric range. Invariant: `min <= max`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Optimal and acceptable ranges for one weather metric.
///
/// The optimal range is assumed to be a subset of the acceptable range;
/// this is checked when the catalog is loaded, not at scoring time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricBand {
    pub optimal: MetricRange,
    pub acceptable: MetricRange,
}

impl MetricBand {
    /// Suitability score for a value: 1.0 inside the optimal range,
    /// 0.6 inside the acceptable range, 0.2 outside both.
    pub fn score(&self, value: f64) -> f64 {
        if self.optimal.contains(value) {
            1.0
        } else if self.acceptable.contains(value) {
            0.6
        } else {
            0.2
        }
    }

    /// Check that the optimal range sits inside the acceptable range.
    pub fn is_coherent(&self) -> bool {
        self.acceptable.min <= self.optimal.min && self.optimal.max <= self.acceptable.max
    }
}

/// Weather patterns that disqualify planting outright
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvoidConditions {
    /// Longest tolerated run of days with less than 1mm of rain
    pub max_consecutive_dry_days: u32,
    /// Maximum tolerated single-day rainfall, in mm
    pub max_daily_rainfall: f64,
    /// Minimum tolerated temperature, in degrees Celsius
    pub min_temperature: f64,
}

/// Full agronomic rule set for one crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlantingRule {
    pub temperature: MetricBand,
    pub rainfall: MetricBand,
    pub humidity: MetricBand,
    pub avoid_conditions: AvoidConditions,
}

impl PlantingRule {
    /// The three metric bands with their names, for validation and logging.
    pub fn bands(&self) -> [(&'static str, &MetricBand); 3] {
        [
            ("temperature", &self.temperature),
            ("rainfall", &self.rainfall),
            ("humidity", &self.humidity),
        ]
    }
}
