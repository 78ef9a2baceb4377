//! Assessment persistence
//!
//! [`FallbackStore`] composes a remote [`AssessmentStore`] (PostgreSQL) with a
//! [`LocalStore`] over a key-value backend. Writes and reads go remote first
//! and fall back to local on any failure.

pub mod fallback;
pub mod kv;
pub mod local;
pub mod postgres;

use async_trait::async_trait;

use sitesafe_core::domain::StoredAssessmentRecord;

use crate::domain::StoreError;

pub use fallback::{FallbackStore, SaveOutcome};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use local::LocalStore;
pub use postgres::{ASSESSMENTS_TABLE, PostgresAssessmentStore};

/// Storage interface for assessment records
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Probe whether the backing table exists and is reachable
    async fn is_available(&self) -> Result<bool, StoreError>;

    async fn save(&self, record: &StoredAssessmentRecord) -> Result<(), StoreError>;

    /// Most recent records for a site, newest first, at most `limit`
    async fn load_recent(
        &self,
        site_id: &str,
        limit: usize,
    ) -> Result<Vec<StoredAssessmentRecord>, StoreError>;

    /// Delete every record, returning how many were removed
    async fn clear(&self) -> Result<u64, StoreError>;
}
