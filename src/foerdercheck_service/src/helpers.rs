use std::sync::Arc;

use foerdercheck_adapters::persistence::PostgresEligibilityRecordStore;
use redis::{Client, RedisResult};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::sync::RwLock;

/// Create a PostgreSQL pool and bring the schema up to date.
pub async fn configure_postgresql(url: &str) -> Result<PostgresEligibilityRecordStore, sqlx::Error> {
    let pool = get_postgres_pool(url).await?;
    let store = PostgresEligibilityRecordStore::new(pool);
    store.migrate().await?;
    Ok(store)
}

pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}

/// Open a shared Redis connection.
pub fn configure_redis(redis_hostname: &str) -> RedisResult<Arc<RwLock<redis::Connection>>> {
    let connection = get_redis_client(redis_hostname)?.get_connection()?;
    Ok(Arc::new(RwLock::new(connection)))
}

pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
