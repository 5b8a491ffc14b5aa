//! External API integrations

pub mod geoip;
pub mod weather;

pub use geoip::GeoIpClient;
pub use weather::{ProviderForecast, WeatherClient};
