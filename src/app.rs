//! Application wiring

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use sitesafe_core::Config;
use sitesafe_llm::ResilientModelClient;
use sitesafe_orchestrator::AssessmentOrchestrator;
use sitesafe_orchestrator::domain::{HistorySink, TracingHistorySink};
use sitesafe_orchestrator::infrastructure::{
    AssessmentStore, FallbackStore, FileKeyValueStore, HttpEnrichmentClient, JsonFileCollector,
    KeyValueStore, LocalStore, MemoryKeyValueStore, PostgresAssessmentStore, PostgresHistorySink,
};

/// Wired application components
pub struct AppHandle {
    pub orchestrator: AssessmentOrchestrator,
    pub config: Arc<Config>,
    /// Present when a database URL is configured
    pub db_pool: Option<Arc<PgPool>>,
}

/// Build the orchestrator and its collaborators from configuration
///
/// The database pool connects lazily, so an unreachable database degrades
/// persistence to the local store instead of failing startup.
pub async fn create_app(
    config: Config,
) -> Result<AppHandle, Box<dyn std::error::Error + Send + Sync>> {
    let config = Arc::new(config);

    let db_pool = match config.storage.database_url.as_deref() {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.storage.max_connections)
                .acquire_timeout(Duration::from_secs(config.storage.connect_timeout_seconds))
                .connect_lazy(url)?;
            tracing::info!(
                max_connections = config.storage.max_connections,
                "Database pool configured"
            );
            Some(Arc::new(pool))
        }
        None => {
            tracing::info!("No database configured; running with local storage only");
            None
        }
    };

    let history: Arc<dyn HistorySink> = match &db_pool {
        Some(pool) => Arc::new(PostgresHistorySink::new(pool.clone())),
        None => Arc::new(TracingHistorySink),
    };

    let model = Arc::new(ResilientModelClient::from_config(&config.llm).with_history(history.clone()));
    tracing::info!(
        model = %config.llm.model,
        configured = model.is_configured(),
        "Model client initialized"
    );

    let kv: Arc<dyn KeyValueStore> = match &config.storage.local_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Local store backed by file");
            Arc::new(FileKeyValueStore::new(path))
        }
        None => Arc::new(MemoryKeyValueStore::new()),
    };
    let local = Arc::new(LocalStore::from_config(kv, &config.storage));
    let remote = db_pool
        .as_ref()
        .map(|pool| Arc::new(PostgresAssessmentStore::new(pool.clone())) as Arc<dyn AssessmentStore>);
    let store = Arc::new(FallbackStore::new(remote, local, config.storage.read_limit));

    let collector = Arc::new(JsonFileCollector::from_config(&config.collector));

    let mut orchestrator =
        AssessmentOrchestrator::new(collector, model, store).with_history(history);
    if let Some(enrichment) = HttpEnrichmentClient::from_config(&config.enrichment)? {
        tracing::info!(endpoint = %enrichment.endpoint(), "Enrichment service enabled");
        orchestrator = orchestrator.with_enrichment(Arc::new(enrichment));
    }

    Ok(AppHandle {
        orchestrator,
        config,
        db_pool,
    })
}
