use std::{future::Future, sync::Arc};

use axum::Router;
use configs::ServerConfig;
use service::students::{InMemoryStudentStore, StudentStore};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

/// Any origin, method and header; no credentials.
pub fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Router over a fresh, empty in-memory store.
pub fn build_app() -> Router {
    let store: Arc<dyn StudentStore> = InMemoryStudentStore::new();
    build_app_with_store(store)
}

pub fn build_app_with_store(store: Arc<dyn StudentStore>) -> Router {
    routes::build_router(AppState::new(store), build_cors())
}

/// Bind the configured address and serve until `shutdown` resolves.
pub async fn run<F>(cfg: ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = cfg.bind_addr();
    if cfg.port == 0 {
        return Err(StartupError::InvalidConfig(format!("refusing to bind port 0 ({addr})")).into());
    }
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;

    let local = listener.local_addr()?;
    info!(addr = %local, "starting student api");
    serve(listener, build_app(), shutdown).await
}

/// Serve `app` on an already-bound listener with graceful shutdown.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped accepting connections");
    Ok(())
}
