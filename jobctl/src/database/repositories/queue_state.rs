//! Queue pause-state repository.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use engine_api::QueueName;

use crate::database::DbPool;
use crate::Result;

/// Durable storage for per-queue pause flags.
#[async_trait]
pub trait QueueStateRepository: Send + Sync {
    /// Load every persisted flag. Queues without a row are absent from the
    /// map and default to running.
    async fn load_all(&self) -> Result<HashMap<QueueName, bool>>;

    /// Persist the flag for one queue, replacing any prior row.
    async fn save(&self, name: QueueName, is_paused: bool) -> Result<()>;
}

/// SQLx implementation of [`QueueStateRepository`].
pub struct SqlxQueueStateRepository {
    pool: DbPool,
}

impl SqlxQueueStateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueStateRepository for SqlxQueueStateRepository {
    async fn load_all(&self) -> Result<HashMap<QueueName, bool>> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT name, is_paused FROM queue_state")
                .fetch_all(&self.pool)
                .await?;

        let mut flags = HashMap::new();
        for (name, is_paused) in rows {
            match QueueName::from_str(&name) {
                Ok(queue) => {
                    flags.insert(queue, is_paused != 0);
                }
                Err(_) => {
                    // Row from a removed queue; harmless, skip it.
                    tracing::warn!(name, "Ignoring persisted state for unknown queue");
                }
            }
        }
        Ok(flags)
    }

    async fn save(&self, name: QueueName, is_paused: bool) -> Result<()> {
        sqlx::query(
            "INSERT INTO queue_state (name, is_paused, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET
                 is_paused = excluded.is_paused,
                 updated_at = excluded.updated_at",
        )
        .bind(name.to_string())
        .bind(is_paused as i64)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
