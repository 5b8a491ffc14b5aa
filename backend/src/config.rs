//! Configuration management for the Agri Planting Advisor
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRI_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// IP geolocation fallback configuration
    pub geoip: GeoIpConfig,

    /// Static data catalog configuration
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    /// Request timeout for weather calls, in seconds
    pub timeout_seconds: u64,

    /// Factor applied to a 1h rain reading to approximate a 3h bucket
    /// when the provider omits the 3h accumulation
    pub one_hour_rain_scale: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeoIpConfig {
    /// Geolocation API endpoint
    pub api_endpoint: String,

    /// Request timeout for geolocation calls, in seconds
    pub timeout_seconds: u64,

    /// Location used when the caller sends no coordinates and the
    /// IP lookup fails
    pub fallback: FallbackLocation,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FallbackLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Directory containing the crop catalog JSON files
    pub dir: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.timeout_seconds", 10)?
            .set_default("weather.one_hour_rain_scale", 3.0)?
            .set_default("geoip.api_endpoint", "https://ipapi.co")?
            .set_default("geoip.timeout_seconds", 3)?
            .set_default("geoip.fallback.latitude", -2.5489)?
            .set_default("geoip.fallback.longitude", 118.0149)?
            .set_default("geoip.fallback.name", "Indonesia")?
            .set_default("data.dir", "data")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
