//! Route definitions for the Agri Planting Advisor

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Planting advisory
        .nest("/planting", planting_routes())
        // Harvest calculator
        .nest("/harvest", harvest_routes())
}

/// Planting advisory routes
fn planting_routes() -> Router<AppState> {
    Router::new()
        .route("/crops", get(handlers::list_crops))
        .route("/weather", get(handlers::get_weather))
        .route("/recommendations", get(handlers::get_recommendations))
        .route("/recommendations/:crop_id", get(handlers::get_recommendation))
}

/// Harvest calculator routes
fn harvest_routes() -> Router<AppState> {
    Router::new().route("/calculate", post(handlers::calculate_harvest))
}
