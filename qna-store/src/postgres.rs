//! PostgreSQL implementation of the Q&A bank.

use sqlx::{PgPool, Row, postgres::PgPoolOptions, postgres::PgRow};
use tracing::{debug, info};

use crate::{
    config::DbConfig,
    errors::{Result, StoreError},
    pair::QnaPair,
    source::{BoxFuture, QnaSource},
};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS qna_pairs (
    id SERIAL PRIMARY KEY,
    question TEXT NOT NULL,
    answer TEXT NOT NULL
)";

/// Q&A store over table `qna_pairs`.
///
/// The pool connects lazily, so the server starts even when the database is
/// offline; every call then reports [`StoreError::Unreachable`].
#[derive(Debug, Clone)]
pub struct PgQnaStore {
    pool: PgPool,
}

impl PgQnaStore {
    /// Creates a store with a lazily connecting pool.
    pub fn connect_lazy(cfg: &DbConfig) -> Self {
        info!(
            host = %cfg.host,
            port = cfg.port,
            database = %cfg.database,
            "configuring PostgreSQL pool (lazy)"
        );
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(cfg.connect_timeout)
            .connect_lazy_with(cfg.connect_options());
        Self { pool }
    }

    /// Creates `qna_pairs` if it does not exist.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Inserts `pair` unless the exact (question, answer) pair is already stored.
    ///
    /// Returns `true` when a row was inserted.
    pub async fn insert_if_absent(&self, pair: &QnaPair) -> Result<bool> {
        let res = sqlx::query(
            "INSERT INTO qna_pairs (question, answer)
             SELECT $1, $2
             WHERE NOT EXISTS (
                 SELECT 1 FROM qna_pairs WHERE question = $1 AND answer = $2
             )",
        )
        .bind(&pair.question)
        .bind(&pair.answer)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    async fn select_all(&self) -> Result<Vec<QnaPair>> {
        let rows = sqlx::query("SELECT question, answer FROM qna_pairs")
            .fetch_all(&self.pool)
            .await?;
        let pairs = rows.iter().map(row_to_pair).collect::<Result<Vec<_>>>()?;
        debug!(rows = pairs.len(), "fetched Q&A bank");
        if pairs.is_empty() {
            return Err(StoreError::NoRows);
        }
        Ok(pairs)
    }

    async fn select_limited(&self, limit: i64) -> Result<Vec<QnaPair>> {
        let rows = sqlx::query("SELECT question, answer FROM qna_pairs LIMIT $1")
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_pair).collect()
    }
}

fn row_to_pair(row: &PgRow) -> Result<QnaPair> {
    Ok(QnaPair {
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
    })
}

impl QnaSource for PgQnaStore {
    fn fetch_all<'a>(&'a self) -> BoxFuture<'a, Result<Vec<QnaPair>>> {
        Box::pin(self.select_all())
    }

    fn fetch_limited<'a>(&'a self, limit: i64) -> BoxFuture<'a, Result<Vec<QnaPair>>> {
        Box::pin(self.select_limited(limit))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn offline_config() -> DbConfig {
        DbConfig {
            host: "127.0.0.1".into(),
            port: 1,
            connect_timeout: Duration::from_millis(500),
            max_connections: 1,
            ..DbConfig::default()
        }
    }

    #[tokio::test]
    async fn offline_database_is_reported_as_unreachable() {
        let store = PgQnaStore::connect_lazy(&offline_config());
        let err = store.fetch_all().await.unwrap_err();
        assert!(err.is_unreachable(), "unexpected error: {err}");

        let err = store.fetch_limited(10).await.unwrap_err();
        assert!(err.is_unreachable(), "unexpected error: {err}");
    }
}
