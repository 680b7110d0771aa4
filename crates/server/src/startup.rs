use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig, StorageBackend};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::{
    auth::AuthService,
    message::{
        repo::{file::FileMessageRepository, seaorm::SeaOrmMessageRepository},
        repository::MessageRepository,
        MessageStore,
    },
    runtime,
};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Assemble handler state from validated configuration.
///
/// Configuration problems are fatal. An unreachable database is only logged:
/// the server starts anyway and storage requests fail until it recovers.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let auth = AuthService::from_config(&cfg.auth).map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let (repo, db): (Arc<dyn MessageRepository>, Option<DatabaseConnection>) = match cfg.storage.backend {
        StorageBackend::File => {
            runtime::ensure_env(&cfg.storage.data_dir, &cfg.storage.file_path)
                .await
                .map_err(|e| StartupError::Runtime(e.to_string()))?;
            let repo: Arc<dyn MessageRepository> = FileMessageRepository::new(&cfg.storage.file_path)
                .await
                .map_err(|e| StartupError::Runtime(e.to_string()))?;
            (repo, None)
        }
        StorageBackend::Database => {
            let db = models::db::connect_lazy(&cfg.database)
                .await
                .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
            if !models::db::warm_up(&db).await {
                warn!("continuing without a verified database connection");
            }
            let repo: Arc<dyn MessageRepository> = Arc::new(SeaOrmMessageRepository { db: db.clone() });
            (repo, Some(db))
        }
    };

    Ok(ServerState::new(Arc::new(auth), MessageStore::new(repo), db))
}

/// Build the application router for the given state.
pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let backend = state.messages.backend();
    let app = build_app(state);

    // Bind and serve
    let addr = bind_addr(&cfg.server)?;
    info!(%addr, backend, "starting aviso server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
