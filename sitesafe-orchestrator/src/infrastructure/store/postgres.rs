//! SQLx implementation of the remote assessment store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use std::sync::Arc;

use sitesafe_core::domain::{RiskAssessment, StoredAssessmentRecord};

use super::AssessmentStore;
use crate::domain::StoreError;

pub const ASSESSMENTS_TABLE: &str = "risk_assessments";

/// PostgreSQL-backed store over the `risk_assessments` table
///
/// Schema management is external; the table is probed, never created.
pub struct PostgresAssessmentStore {
    pool: Arc<PgPool>,
}

impl PostgresAssessmentStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssessmentStore for PostgresAssessmentStore {
    async fn is_available(&self) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
            .bind(ASSESSMENTS_TABLE)
            .fetch_one(&*self.pool)
            .await?;

        if !exists {
            tracing::warn!(table = ASSESSMENTS_TABLE, "Assessment table is missing");
        }
        Ok(exists)
    }

    async fn save(&self, record: &StoredAssessmentRecord) -> Result<(), StoreError> {
        let assessment = serde_json::to_value(&record.assessment)?;

        sqlx::query(
            r#"
            INSERT INTO risk_assessments (site_id, assessment, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&record.site_id)
        .bind(assessment)
        .bind(record.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| {
            tracing::error!(site_id = %record.site_id, "Database error saving assessment: {}", e);
            StoreError::Database(e)
        })?;

        tracing::debug!(site_id = %record.site_id, "Assessment saved to remote store");
        Ok(())
    }

    async fn load_recent(
        &self,
        site_id: &str,
        limit: usize,
    ) -> Result<Vec<StoredAssessmentRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT site_id, assessment, created_at
            FROM risk_assessments
            WHERE site_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(site_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&*self.pool)
        .await?;

        rows.into_iter()
            .map(|row| -> Result<StoredAssessmentRecord, StoreError> {
                let assessment: serde_json::Value = row.try_get("assessment")?;
                let created_at: DateTime<Utc> = row.try_get("created_at")?;
                Ok(StoredAssessmentRecord {
                    site_id: row.try_get("site_id")?,
                    assessment: serde_json::from_value::<RiskAssessment>(assessment)?,
                    created_at,
                })
            })
            .collect()
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM risk_assessments")
            .execute(&*self.pool)
            .await?;

        tracing::info!(deleted = result.rows_affected(), "Remote assessments cleared");
        Ok(result.rows_affected())
    }
}
