//! HTTP client for the multi-agent enrichment service

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use sitesafe_core::config::EnrichmentConfig;

use crate::domain::{EnrichmentError, EnrichmentRequest, EnrichmentResponse, EnrichmentService};

/// POSTs enrichment requests to a configured endpoint
pub struct HttpEnrichmentClient {
    client: Client,
    endpoint: String,
}

impl HttpEnrichmentClient {
    /// Without a timeout the transport default applies
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, EnrichmentError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    /// Build from configuration; `None` when enrichment is disabled
    pub fn from_config(config: &EnrichmentConfig) -> Result<Option<Self>, EnrichmentError> {
        if !config.enabled {
            return Ok(None);
        }
        let endpoint = config
            .endpoint
            .as_deref()
            .ok_or(EnrichmentError::NotConfigured)?;

        Self::new(endpoint, config.timeout_seconds.map(Duration::from_secs)).map(Some)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EnrichmentService for HttpEnrichmentClient {
    async fn enrich(
        &self,
        request: EnrichmentRequest,
    ) -> Result<EnrichmentResponse, EnrichmentError> {
        debug!(endpoint = %self.endpoint, location = %request.location, "Requesting enrichment");

        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let enrichment: EnrichmentResponse = response.json().await?;
        if enrichment.error {
            return Err(EnrichmentError::Reported(
                enrichment
                    .message
                    .unwrap_or_else(|| "no message".to_string()),
            ));
        }

        Ok(enrichment)
    }
}
