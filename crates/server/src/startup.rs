use std::{net::SocketAddr, sync::Arc};

use axum::http::HeaderValue;
use configs::{AppConfig, CorsConfig, ServerConfig, StorageBackend};
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

use service::product::{
    seed::{seed_if_empty, SEED_PRODUCTS},
    InMemoryProductRepository, ProductRepository, ProductService, SeaOrmProductRepository,
};

use crate::routes::{self, AppState};

/// Allow the configured origin with any method and header. Requests from any
/// other origin get no `access-control-allow-origin` header.
pub fn build_cors(cfg: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = cfg.allowed_origin.parse()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods(Any)
        .allow_headers(Any))
}

pub fn bind_addr(cfg: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

/// Open the configured backend, create the table and seed it when empty.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let repo: Arc<dyn ProductRepository> = match cfg.storage.backend {
        StorageBackend::Database => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            Arc::new(SeaOrmProductRepository::new(db))
        }
        StorageBackend::Memory => Arc::new(InMemoryProductRepository::new()),
    };
    info!(backend = ?cfg.storage.backend, "product store ready");

    if cfg.seed.enabled {
        seed_if_empty(repo.as_ref(), &SEED_PRODUCTS).await?;
    }
    Ok(AppState { products: ProductService::new(repo) })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        return;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let cors = build_cors(&cfg.cors)?;
    let app = routes::build_router(state, cors);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting product api");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
