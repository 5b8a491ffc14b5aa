//! Planting suitability core
//!
//! Pure decision logic: scores a forecast window against a crop's
//! agronomic rule set, detects disqualifying weather patterns, selects
//! the best planting dates and composes the final recommendation.

use chrono::NaiveDate;

use crate::models::{
    AvoidConditions, Crop, CropRecommendation, DailySummary, MetricScores, PlantingRule,
    RecommendationStatus,
};

/// How far ahead recommendations look, in daily summaries
pub const FORECAST_WINDOW_DAYS: usize = 8;

/// Maximum number of best planting dates returned
pub const MAX_BEST_DATES: usize = 3;

/// A day with less rainfall than this counts as dry
pub const DRY_DAY_THRESHOLD_MM: f64 = 1.0;

/// Metrics summarizing a forecast window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMetrics {
    pub avg_temp: i32,
    pub total_rainfall: f64,
    pub avg_humidity: i32,
}

/// The scoring window: the first [`FORECAST_WINDOW_DAYS`] summaries.
pub fn forecast_window(forecast: &[DailySummary]) -> &[DailySummary] {
    &forecast[..forecast.len().min(FORECAST_WINDOW_DAYS)]
}

/// Average and total metrics over a non-empty window.
pub fn window_metrics(window: &[DailySummary]) -> WindowMetrics {
    let len = window.len().max(1) as f64;
    let avg_temp = window.iter().map(|d| d.temp_avg).sum::<i32>() as f64 / len;
    let total_rainfall = window.iter().map(|d| d.rainfall).sum::<f64>();
    let avg_humidity = window.iter().map(|d| d.humidity).sum::<i32>() as f64 / len;

    WindowMetrics {
        avg_temp: avg_temp.round() as i32,
        total_rainfall: (total_rainfall * 10.0).round() / 10.0,
        avg_humidity: avg_humidity.round() as i32,
    }
}

/// Score the window metrics against the crop's bands.
pub fn score_window(rule: &PlantingRule, metrics: &WindowMetrics) -> MetricScores {
    let temperature = rule.temperature.score(f64::from(metrics.avg_temp));
    let rainfall = rule.rainfall.score(metrics.total_rainfall);
    let humidity = rule.humidity.score(f64::from(metrics.avg_humidity));

    MetricScores {
        temperature,
        rainfall,
        humidity,
        overall: (temperature + rainfall + humidity) / 3.0,
    }
}

/// Scan the window for hard-stop conditions.
///
/// The checks are independent; several issues may co-occur. Any issue
/// disqualifies the crop regardless of its score.
pub fn detect_issues(avoid: &AvoidConditions, window: &[DailySummary]) -> Vec<String> {
    let mut issues = Vec::new();

    let mut longest_dry_run = 0u32;
    let mut current_run = 0u32;
    for day in window {
        if day.rainfall < DRY_DAY_THRESHOLD_MM {
            current_run += 1;
            longest_dry_run = longest_dry_run.max(current_run);
        } else {
            current_run = 0;
        }
    }
    if longest_dry_run > avoid.max_consecutive_dry_days {
        issues.push(format!(
            "{longest_dry_run} consecutive days without rain"
        ));
    }

    let max_rainfall = window.iter().map(|d| d.rainfall).fold(0.0, f64::max);
    if max_rainfall > avoid.max_daily_rainfall {
        issues.push(format!("excessive rainfall ({max_rainfall}mm/day)"));
    }

    if let Some(min_temp) = window.iter().map(|d| d.temp_min).min() {
        if f64::from(min_temp) < avoid.min_temperature {
            issues.push(format!("temperature too low ({min_temp}\u{b0}C)"));
        }
    }

    issues
}

/// Days that simultaneously satisfy all acceptable bounds, in
/// chronological order, capped at [`MAX_BEST_DATES`].
///
/// Rainfall and cold bounds reuse the avoid-condition thresholds, so
/// this filter is stricter than acceptable-band scoring alone.
pub fn best_dates(rule: &PlantingRule, window: &[DailySummary]) -> Vec<NaiveDate> {
    window
        .iter()
        .filter(|day| {
            rule.temperature.acceptable.contains(f64::from(day.temp_avg))
                && day.rainfall <= rule.avoid_conditions.max_daily_rainfall
                && rule.humidity.acceptable.contains(f64::from(day.humidity))
                && f64::from(day.temp_min) >= rule.avoid_conditions.min_temperature
        })
        .map(|day| day.date)
        .take(MAX_BEST_DATES)
        .collect()
}

/// Produce a recommendation for one crop from its rule set and a daily
/// forecast. Pure and deterministic: identical inputs yield identical
/// results.
///
/// A missing rule set or an empty forecast produces an `unknown`
/// recommendation rather than an error, so bulk calls never abort on a
/// single unscorable crop.
pub fn recommend(
    crop: &Crop,
    rule: Option<&PlantingRule>,
    forecast: &[DailySummary],
) -> CropRecommendation {
    let Some(rule) = rule else {
        return CropRecommendation::insufficient_data(&crop.id, &crop.name);
    };
    let window = forecast_window(forecast);
    if window.is_empty() {
        return CropRecommendation::insufficient_data(&crop.id, &crop.name);
    }

    let metrics = window_metrics(window);
    let scores = score_window(rule, &metrics);
    let issues = detect_issues(&rule.avoid_conditions, window);
    let dates = best_dates(rule, window);
    let (status, recommendation, best_dates) = compose(&crop.name, scores.overall, &issues, dates);

    CropRecommendation {
        crop_id: crop.id.clone(),
        crop: crop.name.clone(),
        status,
        status_text: status.label().to_string(),
        recommendation,
        best_dates,
        avg_temp: Some(metrics.avg_temp),
        total_rainfall: Some(metrics.total_rainfall),
        avg_humidity: Some(metrics.avg_humidity),
        scores: Some(scores),
    }
}

/// Ordered status ladder, evaluated top-down; the first matching rung
/// wins. Disqualification and the bottom rung force the best dates
/// empty.
fn compose(
    crop_name: &str,
    overall: f64,
    issues: &[String],
    dates: Vec<NaiveDate>,
) -> (RecommendationStatus, String, Vec<NaiveDate>) {
    if !issues.is_empty() {
        return (
            RecommendationStatus::Bad,
            format!("Avoid planting due to: {}", issues.join(", ")),
            Vec::new(),
        );
    }
    if overall >= 0.8 && !dates.is_empty() {
        return (
            RecommendationStatus::Optimal,
            format!("Conditions are highly favorable for planting {crop_name}."),
            dates,
        );
    }
    if overall >= 0.6 && !dates.is_empty() {
        return (
            RecommendationStatus::Good,
            format!("Conditions are favorable for planting {crop_name}."),
            dates,
        );
    }
    if overall >= 0.4 {
        let text = if dates.is_empty() {
            "Consider postponing planting.".to_string()
        } else {
            "Conditions are below optimal but planting is still possible.".to_string()
        };
        return (RecommendationStatus::Poor, text, dates);
    }
    (
        RecommendationStatus::Bad,
        "Conditions do not support planting. Postponement is advised.".to_string(),
        Vec::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetricBand, MetricRange};

    fn range(min: f64, max: f64) -> MetricRange {
        MetricRange { min, max }
    }

    fn band(opt: (f64, f64), acc: (f64, f64)) -> MetricBand {
        MetricBand {
            optimal: range(opt.0, opt.1),
            acceptable: range(acc.0, acc.1),
        }
    }

    fn rule() -> PlantingRule {
        PlantingRule {
            temperature: band((20.0, 28.0), (15.0, 33.0)),
            // rainfall band applies to the window total
            rainfall: band((20.0, 60.0), (10.0, 100.0)),
            humidity: band((50.0, 70.0), (40.0, 85.0)),
            avoid_conditions: AvoidConditions {
                max_consecutive_dry_days: 3,
                max_daily_rainfall: 30.0,
                min_temperature: 10.0,
            },
        }
    }

    fn crop() -> Crop {
        Crop {
            id: "tomat".to_string(),
            name: "Tomat".to_string(),
        }
    }

    fn day(d: u32, temp_avg: i32, rainfall: f64) -> DailySummary {
        DailySummary {
            date: NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            temp_min: temp_avg - 5,
            temp_max: temp_avg + 5,
            temp_avg,
            humidity: 60,
            rainfall,
            wind_speed: 2.0,
        }
    }

    #[test]
    fn window_truncates_to_eight_days() {
        let forecast: Vec<_> = (1..=12).map(|d| day(d, 25, 1.0)).collect();
        assert_eq!(forecast_window(&forecast).len(), FORECAST_WINDOW_DAYS);
    }

    #[test]
    fn metrics_average_and_sum_over_window() {
        let window = [day(1, 24, 2.5), day(2, 26, 1.2)];
        let metrics = window_metrics(&window);
        assert_eq!(metrics.avg_temp, 25);
        assert_eq!(metrics.total_rainfall, 3.7);
        assert_eq!(metrics.avg_humidity, 60);
    }

    #[test]
    fn optimal_never_scores_below_acceptable() {
        let r = rule();
        let optimal_metrics = WindowMetrics {
            avg_temp: 25,
            total_rainfall: 40.0,
            avg_humidity: 60,
        };
        let acceptable_metrics = WindowMetrics {
            avg_temp: 17,
            total_rainfall: 15.0,
            avg_humidity: 80,
        };

        let inside = score_window(&r, &optimal_metrics);
        let outside = score_window(&r, &acceptable_metrics);
        assert!(inside.temperature >= outside.temperature);
        assert!(inside.overall >= outside.overall);
        assert_eq!(inside.overall, 1.0);
    }

    #[test]
    fn dry_streak_is_detected_and_reset_by_rain() {
        let avoid = rule().avoid_conditions;
        // 2 dry, rain, 4 dry: longest run is 4
        let window = [
            day(1, 25, 0.0),
            day(2, 25, 0.5),
            day(3, 25, 5.0),
            day(4, 25, 0.0),
            day(5, 25, 0.2),
            day(6, 25, 0.9),
            day(7, 25, 0.0),
        ];

        let issues = detect_issues(&avoid, &window);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("4 consecutive days"));
    }

    #[test]
    fn dry_streak_at_threshold_is_not_an_issue() {
        let avoid = rule().avoid_conditions;
        let window = [day(1, 25, 0.0), day(2, 25, 0.0), day(3, 25, 0.0)];
        assert!(detect_issues(&avoid, &window).is_empty());
    }

    #[test]
    fn extreme_rainfall_and_cold_snap_co_occur() {
        let avoid = rule().avoid_conditions;
        let mut cold_wet = day(1, 25, 45.0);
        cold_wet.temp_min = 5;
        let window = [cold_wet, day(2, 25, 8.0)];

        let issues = detect_issues(&avoid, &window);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.contains("excessive rainfall")));
        assert!(issues.iter().any(|i| i.contains("temperature too low")));
    }

    #[test]
    fn best_dates_chronological_and_capped() {
        let r = rule();
        let forecast: Vec<_> = (1..=8).map(|d| day(d, 25, 5.0)).collect();
        let dates = best_dates(&r, &forecast);

        assert_eq!(dates.len(), MAX_BEST_DATES);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }

    #[test]
    fn best_dates_use_avoid_thresholds_as_hard_bounds() {
        let r = rule();
        // a 35mm day is above the 30mm avoid threshold, so the day must
        // not qualify even though nothing else disqualifies it
        let window = [day(1, 25, 35.0)];
        assert!(best_dates(&r, &window).is_empty());

        // temp_min below the cold threshold also disqualifies the day
        let mut cold = day(2, 25, 5.0);
        cold.temp_min = 8;
        assert!(best_dates(&r, &[cold]).is_empty());
    }

    #[test]
    fn all_optimal_window_is_status_optimal() {
        // 8 days, tempAvg 25, 5mm/day, 60% humidity: everything optimal
        let forecast: Vec<_> = (1..=8).map(|d| day(d, 25, 5.0)).collect();
        let rec = recommend(&crop(), Some(&rule()), &forecast);

        assert_eq!(rec.status, RecommendationStatus::Optimal);
        assert_eq!(rec.scores.unwrap().overall, 1.0);
        assert_eq!(rec.best_dates.len(), 3);
        assert_eq!(rec.avg_temp, Some(25));
        assert_eq!(rec.total_rainfall, Some(40.0));
    }

    #[test]
    fn disqualification_forces_bad_and_empty_dates() {
        // 5 dry days exceed maxConsecutiveDryDays = 3; every day would
        // otherwise qualify on temperature and humidity
        let forecast: Vec<_> = (1..=5).map(|d| day(d, 25, 0.0)).collect();
        let rec = recommend(&crop(), Some(&rule()), &forecast);

        assert_eq!(rec.status, RecommendationStatus::Bad);
        assert!(rec.recommendation.contains("5 consecutive days without rain"));
        assert!(rec.best_dates.is_empty());
    }

    #[test]
    fn empty_forecast_is_unknown() {
        let rec = recommend(&crop(), Some(&rule()), &[]);
        assert_eq!(rec.status, RecommendationStatus::Unknown);
        assert_eq!(
            rec.recommendation,
            crate::models::INSUFFICIENT_DATA_MESSAGE
        );
        assert!(rec.scores.is_none());
    }

    #[test]
    fn missing_rule_set_is_unknown() {
        let forecast: Vec<_> = (1..=8).map(|d| day(d, 25, 5.0)).collect();
        let rec = recommend(&crop(), None, &forecast);
        assert_eq!(rec.status, RecommendationStatus::Unknown);
    }

    #[test]
    fn good_status_at_exact_threshold() {
        // temperature acceptable (17), rainfall optimal, humidity optimal:
        // overall = (0.6 + 1.0 + 1.0) / 3 ~ 0.8667 -> optimal needs dates
        let forecast: Vec<_> = (1..=8).map(|d| day(d, 17, 5.0)).collect();
        let rec = recommend(&crop(), Some(&rule()), &forecast);
        assert_eq!(rec.status, RecommendationStatus::Optimal);

        // two metrics acceptable-only: (0.6 + 0.6 + 1.0) / 3 ~ 0.733 -> good
        let mut forecast: Vec<_> = (1..=8).map(|d| day(d, 17, 5.0)).collect();
        for d in &mut forecast {
            d.humidity = 80;
        }
        let rec = recommend(&crop(), Some(&rule()), &forecast);
        assert_eq!(rec.status, RecommendationStatus::Good);
    }

    #[test]
    fn poor_status_without_best_dates_suggests_postponing() {
        // all three metrics acceptable-only: overall = 0.6, but make the
        // days fail the best-date filter via cold mornings
        let mut forecast: Vec<_> = (1..=8).map(|d| day(d, 17, 5.0)).collect();
        for d in &mut forecast {
            d.humidity = 80;
            d.temp_min = 8; // below minTemperature 10 -> no best dates
        }
        // cold mornings also trip the cold-snap check, so push the
        // threshold down to isolate the ladder rung
        let mut r = rule();
        r.avoid_conditions.min_temperature = 0.0;

        let rec = recommend(&crop(), Some(&r), &forecast);
        assert_eq!(rec.status, RecommendationStatus::Poor);
        assert!(rec.recommendation.contains("postponing"));
    }

    #[test]
    fn hostile_window_is_bad_with_empty_dates() {
        // every metric outside both bands: overall = 0.2
        let mut forecast: Vec<_> = (1..=8).map(|d| day(d, 40, 70.0)).collect();
        for d in &mut forecast {
            d.humidity = 20;
        }
        let mut r = rule();
        // keep avoid conditions out of the way
        r.avoid_conditions.max_daily_rainfall = 1000.0;
        r.avoid_conditions.min_temperature = -100.0;
        r.avoid_conditions.max_consecutive_dry_days = 100;

        let rec = recommend(&crop(), Some(&r), &forecast);
        assert_eq!(rec.status, RecommendationStatus::Bad);
        assert!(rec.best_dates.is_empty());
    }

    #[test]
    fn recommend_is_idempotent() {
        let forecast: Vec<_> = (1..=8).map(|d| day(d, 25, 5.0)).collect();
        let first = recommend(&crop(), Some(&rule()), &forecast);
        let second = recommend(&crop(), Some(&rule()), &forecast);
        assert_eq!(first, second);
    }
}
