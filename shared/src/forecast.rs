//! Forecast aggregation
//!
//! Collapses raw per-timestamp provider samples into one summary per
//! calendar day. Days are derived in the provider's local time zone so
//! the buckets line up with what the farmer sees as "tomorrow".

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::models::{DailySummary, ForecastSample};

#[derive(Default)]
struct DayAccumulator {
    temps: Vec<f64>,
    humidity: Vec<f64>,
    wind: Vec<f64>,
    rainfall: f64,
}

/// Aggregate raw forecast samples into daily summaries.
///
/// `tz_offset_seconds` is the provider's reported offset from UTC for
/// the forecast location; `one_hour_rain_scale` approximates a 3h rain
/// bucket from a 1h reading when the provider omits the 3h value.
///
/// Output is sorted ascending by date. An empty input produces an
/// empty output; callers treat that as insufficient data.
pub fn aggregate_forecast(
    samples: &[ForecastSample],
    tz_offset_seconds: i32,
    one_hour_rain_scale: f64,
) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for sample in samples {
        let local_date =
            (sample.timestamp + Duration::seconds(i64::from(tz_offset_seconds))).date_naive();
        let day = days.entry(local_date).or_default();
        day.temps.push(sample.temperature);
        day.humidity.push(sample.humidity);
        day.wind.push(sample.wind_speed);
        day.rainfall += rain_contribution(sample, one_hour_rain_scale);
    }

    days.into_iter()
        .map(|(date, day)| DailySummary {
            date,
            temp_min: day.temps.iter().copied().fold(f64::INFINITY, f64::min).round() as i32,
            temp_max: day
                .temps
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max)
                .round() as i32,
            temp_avg: mean(&day.temps).round() as i32,
            humidity: mean(&day.humidity).round() as i32,
            rainfall: round_one_decimal(day.rainfall),
            wind_speed: round_one_decimal(mean(&day.wind)),
        })
        .collect()
}

/// Rainfall attributable to one sample: the 3h accumulation when
/// present, otherwise the scaled 1h accumulation, otherwise zero.
fn rain_contribution(sample: &ForecastSample, one_hour_scale: f64) -> f64 {
    match (sample.rain_3h_mm, sample.rain_1h_mm) {
        (Some(three_hour), _) => three_hour,
        (None, Some(one_hour)) => one_hour * one_hour_scale,
        (None, None) => 0.0,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
