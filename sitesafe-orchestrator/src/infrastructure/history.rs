//! SQLx implementation of the analysis history sink

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use sitesafe_core::domain::AnalysisHistoryEntry;

use crate::domain::{HistoryError, HistorySink};

/// Appends model interactions to the `analysis_history` table
pub struct PostgresHistorySink {
    pool: Arc<PgPool>,
}

impl PostgresHistorySink {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistorySink for PostgresHistorySink {
    async fn record(&self, entry: AnalysisHistoryEntry) -> Result<(), HistoryError> {
        sqlx::query(
            r#"
            INSERT INTO analysis_history (query, response, type, metadata, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&entry.query)
        .bind(&entry.response)
        .bind(entry.kind.as_str())
        .bind(&entry.metadata)
        .bind(entry.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| HistoryError::Write(e.to_string()))?;

        Ok(())
    }
}
