//! Crop catalog and harvest economics models

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A crop available for planting recommendations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Crop {
    pub id: String,
    pub name: String,
}

/// Static economics for a crop, used by the harvest calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropEconomics {
    /// Expected yield in kilograms per square meter
    pub yield_per_m2: Decimal,
    /// Default market price per kilogram, in local currency
    pub price_per_kg: Decimal,
    /// Days from planting to harvest
    pub days_to_harvest: u32,
}

/// Result of a harvest yield/income estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestEstimate {
    pub crop_type: String,
    pub area: Decimal,
    pub price_per_kg: Decimal,
    pub estimated_yield: Decimal,
    pub estimated_income: Decimal,
    pub harvest_duration_days: u32,
    pub estimated_harvest_date: NaiveDate,
}

impl CropEconomics {
    /// Estimate yield, income and harvest date for a planted area.
    ///
    /// The caller may override the default price per kilogram. Yield is
    /// rounded to two decimals, income to whole currency units.
    pub fn estimate(
        &self,
        crop_id: &str,
        area_m2: Decimal,
        planting_date: NaiveDate,
        price_override: Option<Decimal>,
    ) -> HarvestEstimate {
        let price = price_override.unwrap_or(self.price_per_kg);
        let estimated_yield = (area_m2 * self.yield_per_m2).round_dp(2);
        let estimated_income = (estimated_yield * price).round_dp(0);

        HarvestEstimate {
            crop_type: crop_id.to_string(),
            area: area_m2,
            price_per_kg: price,
            estimated_yield,
            estimated_income,
            harvest_duration_days: self.days_to_harvest,
            estimated_harvest_date: planting_date + Duration::days(i64::from(self.days_to_harvest)),
        }
    }
}
