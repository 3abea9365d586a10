//! Sentio server entrypoint.
//!
//! Wires storage, cache, NLP, and workflow adapters from configuration and
//! serves the HTTP API.

use anyhow::Context;
use clap::Parser;
use sentio_api::{create_router, AppState};
use sentio_cache::{MemoryCacheStore, ResultCache};
use sentio_core::ports::{
    CacheStore, DocumentStore, JobRepository, PiiDetector, SentimentAnalyzer, WorkflowTrigger,
};
use sentio_db::{Database, PgCacheStore, PgJobRepository};
use sentio_jobs::{
    DocumentProcessor, HttpWorkflowTrigger, JobService, LocalWorkflowTrigger, MemoryJobRepository,
};
use sentio_nlp::{NlpClient, NlpConfig};
use sentio_store::{FilesystemDocumentStore, MemoryDocumentStore, S3DocumentStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::{DocumentBackend, ServerConfig, StorageBackend, WorkflowBackend};

#[derive(Parser)]
#[command(name = "sentio-server")]
#[command(author, version, about = "Sentio text analysis API server", long_about = None)]
struct Cli {
    /// Path to a configuration file.
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = ServerConfig::load(cli.config.as_deref()).context("loading configuration")?;

    let database = match (cfg.jobs.backend, cfg.cache.backend) {
        (StorageBackend::Memory, StorageBackend::Memory) => None,
        _ => {
            let db = Database::connect(&cfg.database.url)
                .await
                .context("connecting to database")?;
            if cfg.database.run_migrations {
                db.migrate().await.context("running migrations")?;
            }
            Some(db)
        }
    };

    let job_repo: Arc<dyn JobRepository> = match cfg.jobs.backend {
        StorageBackend::Memory => {
            info!("using in-memory job store");
            Arc::new(MemoryJobRepository::new())
        }
        StorageBackend::Postgres => {
            info!("using postgres job store");
            let db = database
                .as_ref()
                .context("postgres job store requires a database connection")?;
            Arc::new(PgJobRepository::new(db.pool().clone()))
        }
    };

    let cache_store: Arc<dyn CacheStore> = match cfg.cache.backend {
        StorageBackend::Memory => Arc::new(MemoryCacheStore::new()),
        StorageBackend::Postgres => {
            let db = database
                .as_ref()
                .context("postgres cache store requires a database connection")?;
            Arc::new(PgCacheStore::new(db.pool().clone()))
        }
    };
    let cache = Arc::new(ResultCache::with_ttl(cache_store, cfg.cache.ttl_secs));

    let documents: Arc<dyn DocumentStore> = match cfg.documents.backend {
        DocumentBackend::Memory => {
            info!("using in-memory document store");
            Arc::new(MemoryDocumentStore::new())
        }
        DocumentBackend::Filesystem => {
            info!(root_dir = %cfg.documents.root_dir, "using filesystem document store");
            Arc::new(FilesystemDocumentStore::new(PathBuf::from(
                &cfg.documents.root_dir,
            )))
        }
        DocumentBackend::S3 => {
            anyhow::ensure!(
                !cfg.documents.bucket.is_empty(),
                "documents.bucket is required for the s3 backend"
            );
            info!(bucket = %cfg.documents.bucket, "using s3 document store");
            Arc::new(S3DocumentStore::from_env(cfg.documents.bucket.clone()).await)
        }
    };

    let nlp = Arc::new(NlpClient::new(NlpConfig {
        base_url: cfg.nlp.base_url.clone(),
        api_key: cfg.nlp.api_key.clone(),
    }));
    let analyzer: Arc<dyn SentimentAnalyzer> = nlp.clone();
    let pii: Arc<dyn PiiDetector> = nlp;

    let workflow: Arc<dyn WorkflowTrigger> = match cfg.workflow.backend {
        WorkflowBackend::Local => {
            info!("running the document worker in-process");
            let processor = Arc::new(DocumentProcessor::new(
                job_repo.clone(),
                documents.clone(),
                analyzer.clone(),
                pii.clone(),
            ));
            Arc::new(LocalWorkflowTrigger::new(processor))
        }
        WorkflowBackend::Http => {
            info!(endpoint = %cfg.workflow.endpoint, "delegating to external workflow engine");
            Arc::new(HttpWorkflowTrigger::new(cfg.workflow.endpoint.clone()))
        }
    };

    let jobs = Arc::new(JobService::new(job_repo, documents, workflow));
    let state = Arc::new(AppState::new(cache, jobs, analyzer, pii));
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "sentio server listening");
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
