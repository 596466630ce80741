//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use forum_common::{AppConfig, AppError, StoreBackend};
use forum_core::traits::{ReactionRepository, SubjectRepository};
use forum_db::{
    create_pool, run_migrations, MemoryReactionStore, MemorySubjectDirectory, PgReactionRepository,
    PgSubjectRepository,
};
use forum_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let is_production = state.config().app.env.is_production();
    let router = create_router();
    let router = apply_middleware(router, is_production);
    router.with_state(state)
}

type Stores = (Arc<dyn ReactionRepository>, Arc<dyn SubjectRepository>);

async fn postgres_stores(config: &AppConfig) -> Result<Stores, AppError> {
    let database = config
        .database
        .as_ref()
        .ok_or_else(|| AppError::Config("DATABASE_URL is required for the postgres store".to_string()))?;

    info!("Connecting to PostgreSQL...");
    let db_config = forum_db::DatabaseConfig {
        url: database.url.clone(),
        max_connections: database.max_connections,
        min_connections: database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let reactions: Arc<dyn ReactionRepository> = Arc::new(PgReactionRepository::new(pool.clone()));
    let subjects: Arc<dyn SubjectRepository> = Arc::new(PgSubjectRepository::new(pool));
    Ok((reactions, subjects))
}

fn memory_stores(config: &AppConfig) -> Stores {
    let directory = MemorySubjectDirectory::new();
    for (kind, subject_id) in &config.memory_subjects {
        directory.register(*kind, *subject_id);
    }

    if config.memory_subjects.is_empty() {
        warn!("Memory store has no registered subjects; set MEMORY_SUBJECTS");
    }
    warn!("Using in-memory reaction store; reactions are lost on restart");

    let reactions: Arc<dyn ReactionRepository> = Arc::new(MemoryReactionStore::new());
    let subjects: Arc<dyn SubjectRepository> = Arc::new(directory);
    (reactions, subjects)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let (reaction_repo, subject_repo) = match config.store {
        StoreBackend::Postgres => postgres_stores(&config).await?,
        StoreBackend::Memory => memory_stores(&config),
    };

    let service_context = ServiceContextBuilder::new()
        .reaction_repo(reaction_repo)
        .subject_repo(subject_repo)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::internal)?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, &addr).await
}
