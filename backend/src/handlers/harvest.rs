//! HTTP handlers for the harvest calculator

use axum::{extract::State, Json};
use shared::HarvestEstimate;

use crate::error::AppResult;
use crate::services::harvest::{HarvestCalculationInput, HarvestService};
use crate::AppState;

/// Calculate estimated yield, income and harvest date
pub async fn calculate_harvest(
    State(state): State<AppState>,
    Json(input): Json<HarvestCalculationInput>,
) -> AppResult<Json<HarvestEstimate>> {
    let service = HarvestService::new(state.catalog.clone());
    Ok(Json(service.calculate(input)?))
}
