use redis::{AsyncCommands, RedisResult};
use tracing::info;

const PRICING_SNAPSHOT_KEY: &str = "pricing:configuration";

#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
}

impl RedisClient {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    /// Whole pricing document as a JSON snapshot string.
    pub async fn get_pricing_snapshot(&self) -> RedisResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.get(PRICING_SNAPSHOT_KEY).await
    }

    pub async fn set_pricing_snapshot(&self, document: &str) -> RedisResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(PRICING_SNAPSHOT_KEY, document).await?;
        info!("Pricing snapshot written to redis");
        Ok(())
    }

    pub async fn check_rate_limit(&self, key: &str, limit: i64, window_seconds: i64) -> RedisResult<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let (count,): (i64,) = redis::pipe()
            .atomic()
            .incr(key, 1)
            .expire(key, window_seconds)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(count <= limit)
    }
}
