//! Client for the backend registration API

use async_trait::async_trait;
use beacon_registration::RegistrationRequest;
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, ServiceError};

#[async_trait]
pub trait BeaconsApi: Send + Sync {
    /// Send one registration. A single attempt; failures are not retried.
    async fn send_registration(&self, request: &RegistrationRequest) -> Result<()>;
}

pub struct HttpBeaconsApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBeaconsApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn register_url(&self) -> String {
        format!("{}/registrations/register", self.base_url)
    }
}

#[async_trait]
impl BeaconsApi for HttpBeaconsApi {
    async fn send_registration(&self, request: &RegistrationRequest) -> Result<()> {
        let url = self.register_url();

        debug!("Sending registration to {}", url);

        let response = self.client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(ServiceError::Rejected(response.status()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_url() {
        let api = HttpBeaconsApi::new("http://localhost:8080/spring-api/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(
            api.register_url(),
            "http://localhost:8080/spring-api/registrations/register"
        );
    }
}
