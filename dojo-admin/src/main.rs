//! dojo-admin - Martial-arts school administration backend

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dojo_admin::cache::Cache;
use dojo_admin::notify::{Mailer, Notifier};
use dojo_admin::{build_router, db, AppState};
use dojo_common::config::Config;

#[derive(Debug, Parser)]
#[command(name = "dojo-admin", about = "Martial-arts school administration backend")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen port (overrides config)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    info!("Starting dojo-admin v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load(args.config.as_deref(), args.port)?;

    info!("Database: {}", config.database_path.display());
    let pool = dojo_common::db::init_database(&config.database_path).await?;
    info!("Database connection established");

    db::users::ensure_admin(&pool, &config.admin).await?;
    let purged = db::sessions::purge_expired(&pool).await?;
    if purged > 0 {
        info!("Purged {} expired sessions", purged);
    }

    let cache = Cache::connect(&config.redis_url).await;
    let notifier = Notifier::new(Mailer::new(&config.mail)?);

    let state = AppState::new(pool, cache, notifier, Arc::new(config));
    let app = build_router(state.clone());

    let address = format!("{}:{}", state.config.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
