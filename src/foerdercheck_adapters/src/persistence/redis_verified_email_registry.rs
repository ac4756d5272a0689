use std::sync::Arc;

use foerdercheck_core::{Email, RegistryError, VerifiedEmailRegistry};
use redis::{Commands, Connection};
use tokio::sync::RwLock;

// All verified addresses live in one set.
const VERIFIED_EMAILS_KEY: &str = "verified_emails";

#[derive(Clone)]
pub struct RedisVerifiedEmailRegistry {
    conn: Arc<RwLock<Connection>>,
}

impl RedisVerifiedEmailRegistry {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl VerifiedEmailRegistry for RedisVerifiedEmailRegistry {
    #[tracing::instrument(name = "Marking email verified in Redis", skip_all)]
    async fn mark_verified(&self, email: &Email) -> Result<(), RegistryError> {
        let mut conn = self.conn.write().await;
        let _: i64 = conn
            .sadd(VERIFIED_EMAILS_KEY, email.as_str())
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;
        Ok(())
    }

    #[tracing::instrument(name = "Checking verified email in Redis", skip_all)]
    async fn is_verified(&self, email: &Email) -> Result<bool, RegistryError> {
        let mut conn = self.conn.write().await;
        conn.sismember(VERIFIED_EMAILS_KEY, email.as_str())
            .map_err(|e| RegistryError::Unavailable(e.to_string()))
    }
}
