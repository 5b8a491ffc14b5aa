//! Agri Planting Advisor - Backend Server
//!
//! An HTTP API for smallholder farmers: harvest yield/income estimates
//! from static crop economics, and planting timing recommendations
//! scored against short-term weather forecasts.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use catalog::CropCatalog;
use external::{GeoIpClient, WeatherClient};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<CropCatalog>,
    pub weather: WeatherClient,
    pub geoip: GeoIpClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "advisor_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Agri Planting Advisor Server");
    tracing::info!("Environment: {}", config.environment);

    // Load static crop catalogs
    let catalog = CropCatalog::load(&config.data.dir)?;
    tracing::info!(
        crops = catalog.crops.len(),
        rules = catalog.rules.len(),
        economics = catalog.economics.len(),
        "Crop catalogs loaded"
    );

    // External clients
    let weather = WeatherClient::new(&config.weather)?;
    let geoip = GeoIpClient::new(&config.geoip)?;

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(catalog),
        weather,
        geoip,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Agri Planting Advisor API v1.0"
}
