//! Beacon Registration Service
//!
//! Serves the registration pages and submits completed registrations

use anyhow::{Context, Result};
use registration_service::{
    create_router, AppState, Config, HttpBeaconsApi, InMemoryCache, RedisCache, RegistrationCache,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "registration_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    info!("Starting Beacon Registration Service");
    info!("Backend registration API: {}", config.beacons_api_url);

    // Initialize cache
    let cache: Arc<dyn RegistrationCache> = match &config.redis_url {
        Some(redis_url) => Arc::new(
            RedisCache::new(redis_url, config.registration_ttl)
                .await
                .context("Failed to initialize Redis cache")?,
        ),
        None => {
            warn!("REDIS_URL not set, registrations are kept in memory");
            Arc::new(InMemoryCache::new())
        }
    };

    let beacons_api = HttpBeaconsApi::new(&config.beacons_api_url, config.beacons_api_timeout)
        .context("Failed to create backend API client")?;

    // Create router
    let app = create_router(AppState::new(cache, Arc::new(beacons_api)));

    // Bind and serve
    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    info!("Beacon Registration Service running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
