//! Harvest calculator service
//!
//! Simple arithmetic over the static economics catalog. Unlike the
//! recommendation path, an unknown crop here is a client error.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::HarvestEstimate;

use crate::catalog::CropCatalog;
use crate::error::{AppError, AppResult};

/// Harvest calculator service
#[derive(Clone)]
pub struct HarvestService {
    catalog: Arc<CropCatalog>,
}

/// Input for a harvest estimate
#[derive(Debug, Deserialize)]
pub struct HarvestCalculationInput {
    pub crop_type: String,
    /// Planted area in square meters
    pub area: Decimal,
    pub planting_date: NaiveDate,
    /// Optional price override; the catalog default applies otherwise
    pub price_per_kg: Option<Decimal>,
}

impl HarvestService {
    /// Create a new HarvestService instance
    pub fn new(catalog: Arc<CropCatalog>) -> Self {
        Self { catalog }
    }

    /// Estimate yield, income and harvest date for a planted area
    pub fn calculate(&self, input: HarvestCalculationInput) -> AppResult<HarvestEstimate> {
        let crop_id = input.crop_type.to_lowercase();

        if input.area <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "area".to_string(),
                message: "area must be greater than zero".to_string(),
            });
        }
        if let Some(price) = input.price_per_kg {
            if price <= Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "price_per_kg".to_string(),
                    message: "price per kg must be greater than zero".to_string(),
                });
            }
        }

        let economics = self
            .catalog
            .economics(&crop_id)
            .ok_or_else(|| AppError::UnknownCrop(crop_id.clone()))?;

        Ok(economics.estimate(&crop_id, input.area, input.planting_date, input.price_per_kg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::CropEconomics;
    use std::collections::HashMap;

    fn service() -> HarvestService {
        let mut economics = HashMap::new();
        economics.insert(
            "tomat".to_string(),
            CropEconomics {
                yield_per_m2: Decimal::new(8, 1), // 0.8
                price_per_kg: Decimal::new(5000, 0),
                days_to_harvest: 75,
            },
        );

        HarvestService::new(Arc::new(CropCatalog {
            crops: Vec::new(),
            rules: HashMap::new(),
            economics,
        }))
    }

    fn input(crop: &str, area: i64) -> HarvestCalculationInput {
        HarvestCalculationInput {
            crop_type: crop.to_string(),
            area: Decimal::new(area, 0),
            planting_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            price_per_kg: None,
        }
    }

    #[test]
    fn calculates_for_known_crop() {
        let estimate = service().calculate(input("tomat", 100)).unwrap();
        assert_eq!(estimate.estimated_yield, Decimal::new(8000, 2)); // 80.00
        assert_eq!(estimate.estimated_income, Decimal::new(400_000, 0));
    }

    #[test]
    fn crop_id_is_case_insensitive() {
        let estimate = service().calculate(input("Tomat", 10)).unwrap();
        assert_eq!(estimate.crop_type, "tomat");
    }

    #[test]
    fn unknown_crop_is_client_error() {
        let err = service().calculate(input("durian", 100)).unwrap_err();
        assert!(matches!(err, AppError::UnknownCrop(id) if id == "durian"));
    }

    #[test]
    fn non_positive_area_is_rejected() {
        let err = service().calculate(input("tomat", 0)).unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "area"));
    }

    #[test]
    fn non_positive_price_override_is_rejected() {
        let mut bad = input("tomat", 10);
        bad.price_per_kg = Some(Decimal::ZERO);
        let err = service().calculate(bad).unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "price_per_kg"));
    }
}
