//! Planting advisory service
//!
//! Orchestrates the weather fetch and hands the aggregated forecast to
//! the pure scoring core in the shared crate. Weather is fetched once
//! per request; recommend_all reuses the same forecast for every crop.

use std::sync::Arc;

use serde::Serialize;
use shared::forecast::aggregate_forecast;
use shared::planting::recommend;
use shared::{CropRecommendation, CurrentConditions, DailySummary, GpsCoordinates, Location};

use crate::catalog::CropCatalog;
use crate::error::AppResult;
use crate::external::WeatherClient;

/// Planting advisory service
#[derive(Clone)]
pub struct PlantingService {
    catalog: Arc<CropCatalog>,
    weather: WeatherClient,
    one_hour_rain_scale: f64,
}

/// Current conditions plus the daily forecast for a location
#[derive(Debug, Clone, Serialize)]
pub struct WeatherOverview {
    pub current: CurrentConditions,
    pub forecast: Vec<DailySummary>,
    pub location: Location,
}

impl PlantingService {
    /// Create a new PlantingService instance
    pub fn new(
        catalog: Arc<CropCatalog>,
        weather: WeatherClient,
        one_hour_rain_scale: f64,
    ) -> Self {
        Self {
            catalog,
            weather,
            one_hour_rain_scale,
        }
    }

    /// Current weather and the daily forecast for a resolved location
    pub async fn weather_overview(&self, location: Location) -> AppResult<WeatherOverview> {
        let coords = location.coords;
        let current = self
            .weather
            .get_current(coords.latitude, coords.longitude)
            .await?;
        let forecast = self.daily_forecast(coords).await?;

        Ok(WeatherOverview {
            current,
            forecast,
            location,
        })
    }

    /// Recommendation for a single crop.
    ///
    /// An unknown crop id or a crop without rules yields an `unknown`
    /// recommendation, not an error.
    pub async fn recommend_one(
        &self,
        crop_id: &str,
        coords: GpsCoordinates,
    ) -> AppResult<CropRecommendation> {
        let forecast = self.daily_forecast(coords).await?;
        Ok(self.recommend_for(crop_id, &forecast))
    }

    /// Recommendations for every crop in the catalog, from one fetch.
    pub async fn recommend_all(&self, coords: GpsCoordinates) -> AppResult<Vec<CropRecommendation>> {
        let forecast = self.daily_forecast(coords).await?;
        Ok(self
            .catalog
            .crops
            .iter()
            .map(|crop| recommend(crop, self.catalog.rule(&crop.id), &forecast))
            .collect())
    }

    async fn daily_forecast(&self, coords: GpsCoordinates) -> AppResult<Vec<DailySummary>> {
        let provider = self
            .weather
            .get_forecast(coords.latitude, coords.longitude)
            .await?;

        Ok(aggregate_forecast(
            &provider.samples,
            provider.timezone_offset_seconds,
            self.one_hour_rain_scale,
        ))
    }

    fn recommend_for(&self, crop_id: &str, forecast: &[DailySummary]) -> CropRecommendation {
        match self.catalog.crop(crop_id) {
            Some(crop) => recommend(crop, self.catalog.rule(crop_id), forecast),
            None => CropRecommendation::insufficient_data(crop_id, crop_id),
        }
    }
}
