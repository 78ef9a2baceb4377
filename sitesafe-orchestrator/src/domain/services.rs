//! Collaborator seams consumed by the orchestrator

use async_trait::async_trait;

use sitesafe_core::domain::SiteSnapshot;

use super::enrichment::{EnrichmentRequest, EnrichmentResponse};
use super::errors::{CollectorError, EnrichmentError};

/// Source of site, weather and task data
#[async_trait]
pub trait DataCollector: Send + Sync {
    /// Collect a validated snapshot for the site
    async fn collect_site_data(&self, site_id: &str) -> Result<SiteSnapshot, CollectorError>;
}

/// Secondary, independent assessment source
#[async_trait]
pub trait EnrichmentService: Send + Sync {
    async fn enrich(&self, request: EnrichmentRequest)
    -> Result<EnrichmentResponse, EnrichmentError>;
}
