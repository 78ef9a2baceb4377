//! Dual-write store: remote first, local on any failure

use std::sync::Arc;
use tracing::{error, info, warn};

use sitesafe_core::domain::StoredAssessmentRecord;

use super::AssessmentStore;
use super::postgres::ASSESSMENTS_TABLE;
use crate::domain::StoreError;

/// Where a saved record ended up
#[derive(Debug)]
pub enum SaveOutcome {
    Remote,
    /// Written locally; `remote_error` is set when the remote was tried
    Local { remote_error: Option<StoreError> },
    /// Neither backend accepted the record
    Dropped {
        remote_error: Option<StoreError>,
        local_error: StoreError,
    },
}

impl SaveOutcome {
    pub fn is_persisted(&self) -> bool {
        !matches!(self, SaveOutcome::Dropped { .. })
    }

    /// Errors absorbed while saving
    pub fn into_errors(self) -> Vec<StoreError> {
        match self {
            SaveOutcome::Remote => Vec::new(),
            SaveOutcome::Local { remote_error } => remote_error.into_iter().collect(),
            SaveOutcome::Dropped {
                remote_error,
                local_error,
            } => remote_error.into_iter().chain(Some(local_error)).collect(),
        }
    }
}

pub struct FallbackStore {
    remote: Option<Arc<dyn AssessmentStore>>,
    local: Arc<dyn AssessmentStore>,
    read_limit: usize,
}

impl FallbackStore {
    pub fn new(
        remote: Option<Arc<dyn AssessmentStore>>,
        local: Arc<dyn AssessmentStore>,
        read_limit: usize,
    ) -> Self {
        if remote.is_none() {
            info!("Remote store not configured; assessments are kept locally");
        }
        Self {
            remote,
            local,
            read_limit: read_limit.max(1),
        }
    }

    /// Store with no remote backend
    pub fn local_only(local: Arc<dyn AssessmentStore>, read_limit: usize) -> Self {
        Self::new(None, local, read_limit)
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn read_limit(&self) -> usize {
        self.read_limit
    }

    /// Persist a record. Never fails; the outcome reports what happened.
    pub async fn save(&self, record: &StoredAssessmentRecord) -> SaveOutcome {
        let remote_error = match &self.remote {
            Some(remote) => match Self::save_remote(remote.as_ref(), record).await {
                Ok(()) => return SaveOutcome::Remote,
                Err(e) => {
                    warn!(site_id = %record.site_id, error = %e, "Remote save failed, writing locally");
                    Some(e)
                }
            },
            None => None,
        };

        match self.local.save(record).await {
            Ok(()) => SaveOutcome::Local { remote_error },
            Err(local_error) => {
                error!(
                    site_id = %record.site_id,
                    error = %local_error,
                    "Local save failed, assessment dropped"
                );
                SaveOutcome::Dropped {
                    remote_error,
                    local_error,
                }
            }
        }
    }

    async fn save_remote(
        remote: &dyn AssessmentStore,
        record: &StoredAssessmentRecord,
    ) -> Result<(), StoreError> {
        if !remote.is_available().await? {
            return Err(StoreError::TableMissing(ASSESSMENTS_TABLE));
        }
        remote.save(record).await
    }

    /// Most recent records for a site, newest first. Never fails; may be empty.
    pub async fn load_recent(&self, site_id: &str) -> Vec<StoredAssessmentRecord> {
        if let Some(remote) = &self.remote {
            match Self::load_remote(remote.as_ref(), site_id, self.read_limit).await {
                Ok(records) if !records.is_empty() => return records,
                Ok(_) => info!(site_id, "No remote assessments, reading local store"),
                Err(e) => warn!(site_id, error = %e, "Remote read failed, reading local store"),
            }
        }

        match self.local.load_recent(site_id, self.read_limit).await {
            Ok(records) => records,
            Err(e) => {
                error!(site_id, error = %e, "Local read failed");
                Vec::new()
            }
        }
    }

    async fn load_remote(
        remote: &dyn AssessmentStore,
        site_id: &str,
        limit: usize,
    ) -> Result<Vec<StoredAssessmentRecord>, StoreError> {
        if !remote.is_available().await? {
            return Err(StoreError::TableMissing(ASSESSMENTS_TABLE));
        }
        let mut records = remote.load_recent(site_id, limit).await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        Ok(records)
    }

    /// Delete all remote records. The local store is left untouched.
    pub async fn clear_all(&self) -> Result<u64, StoreError> {
        let remote = self
            .remote
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("remote store is not configured".to_string()))?;

        if !remote.is_available().await? {
            return Err(StoreError::TableMissing(ASSESSMENTS_TABLE));
        }
        remote.clear().await
    }
}
