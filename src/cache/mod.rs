pub mod categories;

use redis::{aio::ConnectionManager, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

pub use categories::CategoryCache;

/// Thin JSON-over-Redis wrapper shared by the profile cache and the notification store.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

fn encode<T: Serialize>(value: &T) -> redis::RedisResult<String> {
    serde_json::to_string(value).map_err(|e| {
        RedisError::from((
            redis::ErrorKind::TypeError,
            "Serialization error",
            e.to_string(),
        ))
    })
}

fn decode<T: DeserializeOwned>(raw: &str) -> redis::RedisResult<T> {
    serde_json::from_str(raw).map_err(|e| {
        RedisError::from((
            redis::ErrorKind::TypeError,
            "Deserialization error",
            e.to_string(),
        ))
    })
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    /// Get a value from cache
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> redis::RedisResult<Option<T>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;

        value.as_deref().map(decode).transpose()
    }

    /// Set a value in cache with optional TTL (in seconds)
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> redis::RedisResult<()> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(encode(value)?);

        if let Some(ttl) = ttl_seconds {
            cmd.arg("EX").arg(ttl);
        }

        cmd.query_async(&mut self.connection.clone()).await
    }

    /// Delete a key from cache
    pub async fn delete(&self, key: &str) -> redis::RedisResult<()> {
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await
    }

    /// Store `value` under `field` of the hash at `key`.
    pub async fn hset<T: Serialize>(
        &self,
        key: &str,
        field: &str,
        value: &T,
    ) -> redis::RedisResult<()> {
        let _: i64 = redis::cmd("HSET")
            .arg(key)
            .arg(field)
            .arg(encode(value)?)
            .query_async(&mut self.connection.clone())
            .await?;
        Ok(())
    }

    pub async fn hget<T: DeserializeOwned>(
        &self,
        key: &str,
        field: &str,
    ) -> redis::RedisResult<Option<T>> {
        let value: Option<String> = redis::cmd("HGET")
            .arg(key)
            .arg(field)
            .query_async(&mut self.connection.clone())
            .await?;

        value.as_deref().map(decode).transpose()
    }

    /// All values of the hash at `key`.
    pub async fn hvals<T: DeserializeOwned>(&self, key: &str) -> redis::RedisResult<Vec<T>> {
        let values: Vec<String> = redis::cmd("HVALS")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;

        values.iter().map(|v| decode(v)).collect()
    }

    /// Remove a field; returns whether it existed.
    pub async fn hdel(&self, key: &str, field: &str) -> redis::RedisResult<bool> {
        let removed: i64 = redis::cmd("HDEL")
            .arg(key)
            .arg(field)
            .query_async(&mut self.connection.clone())
            .await?;
        Ok(removed > 0)
    }
}

/// Cache key generators
pub mod keys {
    use uuid::Uuid;

    /// Public profile of a user
    pub fn user(id: Uuid) -> String {
        format!("user:{id}")
    }

    /// Hash of a user's notifications, keyed by notification id
    pub fn notifications(user_id: Uuid) -> String {
        format!("notifications:{user_id}")
    }
}

/// Profile entries expire after 15 minutes.
pub const USER_PROFILE_TTL_SECS: u64 = 900;

/// Wrapper type for Actix-web app data
pub type CacheData = Arc<RedisCache>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn keys_are_namespaced_by_user() {
        let id = Uuid::nil();
        assert_eq!(
            keys::user(id),
            "user:00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            keys::notifications(id),
            "notifications:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn decode_reports_type_errors() {
        let err = decode::<u32>("\"nope\"").unwrap_err();
        assert_eq!(err.kind(), redis::ErrorKind::TypeError);
        assert_eq!(decode::<u32>("7").unwrap(), 7);
    }
}
