use std::{future::Future, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use service::{
    ship::{SeaOrmShipRepository, ShipRepository},
    storage::ship_file_store::FileShipRepository,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let raw = format!("{}:{}", cfg.server.host, cfg.server.port);
    raw.parse().with_context(|| format!("invalid bind address {raw}"))
}

/// Open the configured ship store. Postgres is migrated before use.
pub async fn build_repository(cfg: &AppConfig) -> anyhow::Result<Arc<dyn ShipRepository>> {
    match cfg.storage.backend {
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await.context("running migrations")?;
            info!(backend = "postgres", "ship repository ready");
            Ok(Arc::new(SeaOrmShipRepository::new(db)))
        }
        StorageBackend::File => {
            let repo = FileShipRepository::new(&cfg.storage.file_path).await?;
            info!(backend = "file", path = %cfg.storage.file_path, "ship repository ready");
            Ok(repo as Arc<dyn ShipRepository>)
        }
    }
}

/// Build the app and serve it until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let repo = build_repository(&cfg).await?;
    let app: Router = routes::build_router(ServerState::new(repo), build_cors());

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "ship registry listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server drained");
    Ok(())
}
