use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres, Row};
use std::time::Duration;
use tracing::info;

use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    /// Build a client without touching the network. The pool connects on
    /// first use, which keeps boot working while postgres is down.
    pub fn connect_lazy(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_lazy(connection_string)?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations").run(&self.pool).await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    /// The single stored pricing document, or `None` before the first write.
    pub async fn fetch_pricing_document(&self) -> Result<Option<Value>, sqlx::Error> {
        let row = sqlx::query("SELECT document FROM pricing_configurations WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(record) => Ok(Some(record.try_get::<Value, _>("document")?)),
            None => Ok(None),
        }
    }

    /// Last-writer-wins upsert of the whole document.
    pub async fn upsert_pricing_document(
        &self,
        document: &Value,
        updated_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO pricing_configurations (id, document, updated_at) \
             VALUES (1, $1, $2) \
             ON CONFLICT (id) DO UPDATE SET document = $1, updated_at = $2",
        )
        .bind(document)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
