//! `avalon-server [addr]`
//!
//! Serves the tracker API over the SQLite store named by `AVALON_ENV` and
//! `AVALON_DATA_DIR`. The listen address comes from the first argument, then
//! `AVALON_ADDR`, then `127.0.0.1:5000`.

use std::net::SocketAddr;

use avalon_tracker::config::ServerConfig;
use avalon_tracker::server::{serve, ServerError};
use avalon_tracker::store::SqliteStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = ServerConfig::from_env()?;
    if let Some(raw) = std::env::args().nth(1) {
        config = config.with_addr(raw.parse::<SocketAddr>()?);
    }

    let store = SqliteStore::open_with_config(&config.store)?;
    info!(db = %config.store.db_path().display(), "store ready");

    serve(config.addr, store).await
}
