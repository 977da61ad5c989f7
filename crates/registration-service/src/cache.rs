//! Registration cache keyed by submission id
//!
//! Both implementations are get-or-create: reading an unseen id stores and
//! returns an empty registration, so callers never see a missing entry.

use async_trait::async_trait;
use beacon_registration::{FormSubmission, Registration};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::Result;

#[async_trait]
pub trait RegistrationCache: Send + Sync {
    /// The registration for `id`, created empty on first access
    async fn get(&self, id: &str) -> Result<Registration>;

    /// Merge a page submission into the registration for `id`.
    async fn update(&self, id: &str, form_data: &FormSubmission) -> Result<()>;

    /// Replace the registration for `id`.
    async fn set(&self, id: &str, registration: &Registration) -> Result<()>;

    async fn clear(&self, id: &str) -> Result<()>;
}

/// Process-local cache for development and tests
#[derive(Default)]
pub struct InMemoryCache {
    registrations: Mutex<HashMap<String, Registration>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistrationCache for InMemoryCache {
    async fn get(&self, id: &str) -> Result<Registration> {
        let mut registrations = self.registrations.lock().await;
        let registration = registrations.entry(id.to_string()).or_insert_with(|| {
            debug!("Creating registration for submission: {}", id);
            Registration::new()
        });
        Ok(registration.clone())
    }

    async fn update(&self, id: &str, form_data: &FormSubmission) -> Result<()> {
        let mut registrations = self.registrations.lock().await;
        registrations
            .entry(id.to_string())
            .or_default()
            .update(form_data);
        Ok(())
    }

    async fn set(&self, id: &str, registration: &Registration) -> Result<()> {
        self.registrations
            .lock()
            .await
            .insert(id.to_string(), registration.clone());
        Ok(())
    }

    async fn clear(&self, id: &str) -> Result<()> {
        self.registrations.lock().await.remove(id);
        debug!("Cleared registration for submission: {}", id);
        Ok(())
    }
}

/// Redis cache storing each registration as JSON under `registration:{id}`
pub struct RedisCache {
    conn: ConnectionManager,
    ttl: Duration,
}

impl RedisCache {
    /// Connect to Redis; every write refreshes the entry's expiry to `ttl`.
    pub async fn new(redis_url: &str, ttl: Duration) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        info!("Connected to Redis at {}", redis_url);

        Ok(Self { conn, ttl })
    }

    fn key(id: &str) -> String {
        format!("registration:{}", id)
    }

    async fn load(&self, id: &str) -> Result<Option<Registration>> {
        let mut conn = self.conn.clone();
        let json: Option<String> = conn.get(Self::key(id)).await?;

        match json {
            Some(data) => Ok(Some(Registration::from_json(&data)?)),
            None => Ok(None),
        }
    }

    async fn store(&self, id: &str, registration: &Registration) -> Result<()> {
        let json = registration.to_json()?;
        let mut conn = self.conn.clone();

        redis::cmd("SET")
            .arg(Self::key(id))
            .arg(json)
            .arg("EX")
            .arg(self.ttl.as_secs())
            .query_async::<_, ()>(&mut conn)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl RegistrationCache for RedisCache {
    async fn get(&self, id: &str) -> Result<Registration> {
        if let Some(registration) = self.load(id).await? {
            return Ok(registration);
        }

        debug!("Creating registration for submission: {}", id);
        let registration = Registration::new();
        self.store(id, &registration).await?;
        Ok(registration)
    }

    async fn update(&self, id: &str, form_data: &FormSubmission) -> Result<()> {
        let mut registration = self.get(id).await?;
        registration.update(form_data);
        self.store(id, &registration).await
    }

    async fn set(&self, id: &str, registration: &Registration) -> Result<()> {
        self.store(id, registration).await
    }

    async fn clear(&self, id: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(Self::key(id)).await?;

        debug!("Cleared registration for submission: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_registration::RegistrationState;

    fn form(pairs: &[(&str, &str)]) -> FormSubmission {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    async fn exercise(cache: &dyn RegistrationCache, id: &str) {
        let created = cache.get(id).await.unwrap();
        assert_eq!(created.state(), RegistrationState::Empty);
        assert_eq!(cache.get(id).await.unwrap(), created);

        cache
            .update(id, &form(&[("hexId", "1D0E9B07CEFFBFF"), ("foo", "bar")]))
            .await
            .unwrap();
        let first = cache.get(id).await.unwrap();
        let second = cache.get(id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.beacon().hex_id, "1D0E9B07CEFFBFF");

        cache.update(id, &form(&[("model", "Chopper")])).await.unwrap();
        let updated = cache.get(id).await.unwrap();
        assert_eq!(updated.beacon().hex_id, "1D0E9B07CEFFBFF");
        assert_eq!(updated.beacon().model, "Chopper");

        let mut replacement = Registration::new();
        replacement.set_reference_number("ABC1234");
        cache.set(id, &replacement).await.unwrap();
        assert_eq!(cache.get(id).await.unwrap(), replacement);

        cache.clear(id).await.unwrap();
        assert_eq!(cache.get(id).await.unwrap(), Registration::new());

        cache.clear(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_in_memory_cache() {
        exercise(&InMemoryCache::new(), "in-memory-submission").await;
    }

    #[tokio::test]
    async fn test_in_memory_cache_keeps_sessions_apart() {
        let cache = InMemoryCache::new();
        cache.update("a", &form(&[("model", "A")])).await.unwrap();
        cache.update("b", &form(&[("model", "B")])).await.unwrap();

        assert_eq!(cache.get("a").await.unwrap().beacon().model, "A");
        assert_eq!(cache.get("b").await.unwrap().beacon().model, "B");
    }

    #[tokio::test]
    #[ignore] // Requires Redis to be running
    async fn test_redis_cache() {
        let cache = RedisCache::new("redis://127.0.0.1:6379/15", Duration::from_secs(60))
            .await
            .expect("Failed to connect to test Redis");

        exercise(&cache, "redis-submission").await;
    }
}
