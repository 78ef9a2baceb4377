//! Local fallback store over a key-value backend
//!
//! Layout per site: an index entry `keys_for_<site_id>` holding an ordered
//! list of record pointers, plus one entry per pointer with the serialized
//! record. The index is capped on write and records are sorted on read, so
//! with [`EvictionPolicy::InsertionOrder`] a pointer can be evicted while an
//! older-timestamped one survives. [`EvictionPolicy::OldestTimestamp`] keeps
//! the index sorted by timestamp instead.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use sitesafe_core::config::{EvictionPolicy, StorageConfig};
use sitesafe_core::domain::StoredAssessmentRecord;

use super::AssessmentStore;
use super::kv::KeyValueStore;
use crate::domain::StoreError;

const INDEX_PREFIX: &str = "keys_for_";
const RECORD_PREFIX: &str = "assessment_";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexEntry {
    key: String,
    created_at: DateTime<Utc>,
}

pub struct LocalStore {
    kv: Arc<dyn KeyValueStore>,
    cap: usize,
    eviction: EvictionPolicy,
    /// Serializes index read-modify-write; the record write happens outside it
    index_lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, cap: usize, eviction: EvictionPolicy) -> Self {
        Self {
            kv,
            cap: cap.max(1),
            eviction,
            index_lock: Mutex::new(()),
        }
    }

    pub fn from_config(kv: Arc<dyn KeyValueStore>, config: &StorageConfig) -> Self {
        Self::new(kv, config.local_index_cap, config.eviction)
    }

    pub fn index_key(site_id: &str) -> String {
        format!("{INDEX_PREFIX}{site_id}")
    }

    fn record_key(site_id: &str) -> String {
        format!("{RECORD_PREFIX}{site_id}_{}", uuid::Uuid::new_v4())
    }

    async fn read_index(&self, site_id: &str) -> Result<Vec<IndexEntry>, StoreError> {
        match self.kv.get(&Self::index_key(site_id)).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Add a pointer to the site index and return the evicted pointers
    async fn push_pointer(
        &self,
        site_id: &str,
        entry: IndexEntry,
    ) -> Result<Vec<IndexEntry>, StoreError> {
        let _guard = self.index_lock.lock().await;

        let mut index = self.read_index(site_id).await?;
        index.push(entry);
        if self.eviction == EvictionPolicy::OldestTimestamp {
            index.sort_by_key(|e| e.created_at);
        }

        let excess = index.len().saturating_sub(self.cap);
        let evicted: Vec<IndexEntry> = index.drain(..excess).collect();

        self.kv
            .set(&Self::index_key(site_id), serde_json::to_string(&index)?)
            .await?;
        Ok(evicted)
    }
}

#[async_trait]
impl AssessmentStore for LocalStore {
    async fn is_available(&self) -> Result<bool, StoreError> {
        Ok(true)
    }

    async fn save(&self, record: &StoredAssessmentRecord) -> Result<(), StoreError> {
        let key = Self::record_key(&record.site_id);
        self.kv.set(&key, serde_json::to_string(record)?).await?;

        let evicted = self
            .push_pointer(
                &record.site_id,
                IndexEntry {
                    key,
                    created_at: record.created_at,
                },
            )
            .await?;

        for entry in &evicted {
            if let Err(e) = self.kv.remove(&entry.key).await {
                warn!(key = %entry.key, error = %e, "Failed to remove evicted local record");
            }
        }

        debug!(
            site_id = %record.site_id,
            evicted = evicted.len(),
            "Assessment saved to local store"
        );
        Ok(())
    }

    async fn load_recent(
        &self,
        site_id: &str,
        limit: usize,
    ) -> Result<Vec<StoredAssessmentRecord>, StoreError> {
        let index = self.read_index(site_id).await?;

        let mut records = Vec::with_capacity(index.len());
        for entry in index {
            match self.kv.get(&entry.key).await? {
                Some(raw) => match serde_json::from_str::<StoredAssessmentRecord>(&raw) {
                    Ok(record) => records.push(record),
                    Err(e) => warn!(key = %entry.key, error = %e, "Skipping corrupt local record"),
                },
                None => warn!(key = %entry.key, "Local index points at a missing record"),
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        Ok(records)
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        let _guard = self.index_lock.lock().await;

        let mut removed = 0;
        for key in self.kv.keys().await? {
            if key.starts_with(RECORD_PREFIX) {
                self.kv.remove(&key).await?;
                removed += 1;
            } else if key.starts_with(INDEX_PREFIX) {
                self.kv.remove(&key).await?;
            }
        }
        Ok(removed)
    }
}
