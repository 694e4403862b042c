//! Service entry point: configuration, logging, store, routes, server.

use std::sync::Arc;

use oolong_api::{routes, store::MemoryTeaStore, telemetry};
use oolong_core::TeaRepository;
use oolong_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init(&telemetry::LogConfig::from_env())?;

    let config = ServerConfig::from_env();
    tracing::info!(addr = config.http_addr(), "starting oolong");

    let repo: Arc<dyn TeaRepository> = Arc::new(MemoryTeaStore::new());
    let router = routes::router(repo)?;

    Server::new(config, router).run().await?;
    Ok(())
}
