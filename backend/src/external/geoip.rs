//! IP geolocation client
//!
//! Resolves an approximate location from the client IP when the caller
//! sends no coordinates. The lookup uses a short timeout and any
//! failure falls back to the configured default location; geolocation
//! problems never fail a request.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::{GpsCoordinates, Location};

use crate::config::GeoIpConfig;
use crate::error::{AppError, AppResult};

/// IP geolocation client
#[derive(Clone)]
pub struct GeoIpClient {
    client: Client,
    base_url: String,
    fallback: Location,
}

#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    region: Option<String>,
}

impl GeoIpClient {
    /// Create a new GeoIpClient from configuration
    pub fn new(config: &GeoIpConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_endpoint.clone(),
            fallback: Location {
                name: config.fallback.name.clone(),
                coords: GpsCoordinates::new(config.fallback.latitude, config.fallback.longitude),
            },
        })
    }

    /// Resolve a location from the client IP, falling back to the
    /// configured default on any failure.
    pub async fn resolve(&self, client_ip: Option<&str>) -> Location {
        let Some(ip) = client_ip else {
            return self.fallback.clone();
        };

        match self.lookup(ip).await {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(error = %e, "geolocation lookup failed, using fallback location");
                self.fallback.clone()
            }
        }
    }

    async fn lookup(&self, ip: &str) -> AppResult<Location> {
        let url = format!("{}/{}/json/", self.base_url, ip);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::GeolocationUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::GeolocationUnavailable(format!(
                "{}",
                response.status()
            )));
        }

        let data: GeoIpResponse = response
            .json()
            .await
            .map_err(|e| AppError::GeolocationUnavailable(format!("invalid response: {}", e)))?;

        let (Some(latitude), Some(longitude)) = (data.latitude, data.longitude) else {
            return Err(AppError::GeolocationUnavailable(
                "response has no coordinates".to_string(),
            ));
        };

        let name = match (data.city, data.region) {
            (Some(city), Some(region)) => format!("{}, {}", city, region),
            (Some(city), None) => city,
            _ => self.fallback.name.clone(),
        };

        Ok(Location {
            name,
            coords: GpsCoordinates::new(latitude, longitude),
        })
    }
}
