//! Site data collection from JSON snapshot files

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use sitesafe_core::config::{CollectorConfig, ValidationError};
use sitesafe_core::domain::SiteSnapshot;

use crate::domain::{CollectorError, DataCollector};

/// Reads `<data_dir>/<site_id>.json` and validates it
pub struct JsonFileCollector {
    data_dir: PathBuf,
}

impl JsonFileCollector {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn from_config(config: &CollectorConfig) -> Self {
        Self::new(&config.data_dir)
    }

    fn snapshot_path(&self, site_id: &str) -> Result<PathBuf, ValidationError> {
        let id = site_id.trim();
        if id.is_empty() {
            return Err(ValidationError::input("site id is empty"));
        }
        if id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(ValidationError::input(format!(
                "site id {id:?} is not a plain identifier"
            )));
        }
        Ok(self.data_dir.join(format!("{id}.json")))
    }
}

#[async_trait]
impl DataCollector for JsonFileCollector {
    async fn collect_site_data(&self, site_id: &str) -> Result<SiteSnapshot, CollectorError> {
        let path = self.snapshot_path(site_id)?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CollectorError::NotFound(site_id.to_string()));
            }
            Err(e) => return Err(CollectorError::Io(e)),
        };

        let snapshot: SiteSnapshot = serde_json::from_slice(&bytes)
            .map_err(|e| CollectorError::Malformed(format!("{}: {}", path.display(), e)))?;

        if snapshot.site_id != site_id.trim() {
            return Err(CollectorError::Invalid(ValidationError::input(format!(
                "{} holds site {}, expected {}",
                path.display(),
                snapshot.site_id,
                site_id.trim()
            ))));
        }
        snapshot.validate()?;

        debug!(
            site_id = %snapshot.site_id,
            tasks = snapshot.tasks.len(),
            incidents = snapshot.incidents.len(),
            "Site data collected"
        );
        Ok(snapshot)
    }
}
