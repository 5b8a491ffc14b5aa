//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap for current conditions and the
//! 5-day/3-hour forecast. Calls carry a bounded timeout; failures
//! surface as recoverable per-request errors and are never retried.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::{CurrentConditions, ForecastSample};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Raw forecast as returned by the provider: ordered samples plus the
/// location's UTC offset used for day bucketing
#[derive(Debug, Clone)]
pub struct ProviderForecast {
    pub samples: Vec<ForecastSample>,
    pub timezone_offset_seconds: i32,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    main: OWMMain,
    visibility: Option<i32>,
    wind: OWMWind,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    pressure: i32,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    #[serde(default)]
    speed: f64,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    city: OWMCity,
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMCity {
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    wind: OWMWind,
    rain: Option<OWMRain>,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current(&self, latitude: f64, longitude: f64) -> AppResult<CurrentConditions> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let data: OWMCurrentResponse = self.fetch(&url).await?;
        Ok(convert_current_response(data))
    }

    /// Fetch the forecast by GPS coordinates
    pub async fn get_forecast(&self, latitude: f64, longitude: f64) -> AppResult<ProviderForecast> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let data: OWMForecastResponse = self.fetch(&url).await?;
        Ok(convert_forecast_response(data))
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::WeatherServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherServiceUnavailable(format!(
                "{} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::WeatherServiceUnavailable(format!("invalid response: {}", e)))
    }
}

/// Convert the OpenWeatherMap current response to our format
fn convert_current_response(data: OWMCurrentResponse) -> CurrentConditions {
    CurrentConditions {
        temp: data.main.temp.round() as i32,
        humidity: data.main.humidity.round() as i32,
        wind_speed: (data.wind.speed * 10.0).round() / 10.0,
        visibility_km: (f64::from(data.visibility.unwrap_or(0)) / 1000.0).round() as i32,
        description: data
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_default(),
        pressure: data.main.pressure,
    }
}

/// Convert the OpenWeatherMap forecast response to raw samples
fn convert_forecast_response(data: OWMForecastResponse) -> ProviderForecast {
    let samples = data
        .list
        .into_iter()
        .map(|item| ForecastSample {
            timestamp: DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now),
            temperature: item.main.temp,
            humidity: item.main.humidity,
            wind_speed: item.wind.speed,
            rain_1h_mm: item.rain.as_ref().and_then(|r| r.one_hour),
            rain_3h_mm: item.rain.as_ref().and_then(|r| r.three_hour),
        })
        .collect();

    ProviderForecast {
        samples,
        timezone_offset_seconds: data.city.timezone,
    }
}
