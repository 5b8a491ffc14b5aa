//! HTTP handlers for planting advisory endpoints

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use shared::{Crop, CropRecommendation, GpsCoordinates, Location};

use crate::error::AppResult;
use crate::services::planting::{PlantingService, WeatherOverview};
use crate::AppState;

/// Query parameters for location-aware endpoints. When coordinates are
/// omitted the location is resolved from the client IP.
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub location_name: Option<String>,
}

/// List the crops available for recommendations
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<Crop>> {
    Json(state.catalog.crops.clone())
}

/// Get current weather and the daily forecast for a location
pub async fn get_weather(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<WeatherOverview>> {
    let location = resolve_location(&state, &headers, &query).await;
    let overview = planting_service(&state).weather_overview(location).await?;
    Ok(Json(overview))
}

/// Get the planting recommendation for a single crop
pub async fn get_recommendation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(crop_id): Path<String>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<CropRecommendation>> {
    let location = resolve_location(&state, &headers, &query).await;
    let recommendation = planting_service(&state)
        .recommend_one(&crop_id, location.coords)
        .await?;
    Ok(Json(recommendation))
}

/// Get planting recommendations for every crop in the catalog
pub async fn get_recommendations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<Vec<CropRecommendation>>> {
    let location = resolve_location(&state, &headers, &query).await;
    let recommendations = planting_service(&state)
        .recommend_all(location.coords)
        .await?;
    Ok(Json(recommendations))
}

fn planting_service(state: &AppState) -> PlantingService {
    PlantingService::new(
        state.catalog.clone(),
        state.weather.clone(),
        state.config.weather.one_hour_rain_scale,
    )
}

async fn resolve_location(
    state: &AppState,
    headers: &HeaderMap,
    query: &LocationQuery,
) -> Location {
    match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => Location {
            name: query
                .location_name
                .clone()
                .unwrap_or_else(|| "Your location".to_string()),
            coords: GpsCoordinates::new(lat, lon),
        },
        _ => state.geoip.resolve(client_ip(headers).as_deref()).await,
    }
}

/// First entry of X-Forwarded-For, if present
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
}
