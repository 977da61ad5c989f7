//! Configuration management for the registration service
//!
//! Loads configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Redis holding in-progress registrations; in-memory cache when unset
    pub redis_url: Option<String>,

    /// Expiry of a cached registration, refreshed on every write
    pub registration_ttl: Duration,

    /// Base URL of the backend registration API
    pub beacons_api_url: String,

    pub beacons_api_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("SERVICE_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Invalid SERVICE_PORT")?,

            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),

            registration_ttl: Duration::from_secs(
                env::var("REGISTRATION_TTL_SECS")
                    .unwrap_or_else(|_| "86400".to_string())
                    .parse()
                    .context("Invalid REGISTRATION_TTL_SECS")?,
            ),

            beacons_api_url: env::var("BEACONS_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080/spring-api".to_string()),

            beacons_api_timeout: Duration::from_secs(
                env::var("BEACONS_API_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("Invalid BEACONS_API_TIMEOUT_SECS")?,
            ),
        };

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("SERVICE_PORT must be greater than 0");
        }

        if self.registration_ttl.is_zero() {
            anyhow::bail!("REGISTRATION_TTL_SECS must be greater than 0");
        }

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
