use mimalloc::MiMalloc;
use persons::config::Config;
use persons::db::{self, SqlitePersonStore};
use persons::server::router::{PersonsState, persons_router};
use persons::utils::logging::init_tracing;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tracing::{info, warn};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;
    init_tracing(&cfg.basic.loglevel);

    info!(
        database_url = %cfg.basic.database_url,
        loglevel = %cfg.basic.loglevel,
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        query_timeout_secs = cfg.basic.query_timeout_secs,
        "configuration loaded"
    );

    let pool = db::connect(&cfg.basic.database_url).await?;
    let store = SqlitePersonStore::with_timeout(pool.clone(), cfg.basic.query_timeout());
    let app = persons_router(PersonsState::new(Arc::new(store)));

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    shutdown_signal().await;
    let _ = stop_tx.send(());
    drain(server, cfg.basic.shutdown_timeout()).await;

    pool.close().await;
    info!("Server has shut down gracefully.");
    Ok(())
}

/// Wait for in-flight requests, but no longer than `limit`.
async fn drain(server: tokio::task::JoinHandle<std::io::Result<()>>, limit: Duration) {
    match tokio::time::timeout(limit, server).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => warn!(error = %e, "server exited with error"),
        Ok(Err(e)) => warn!(error = %e, "server task failed"),
        Err(_) => warn!(?limit, "graceful shutdown timed out; dropping open connections"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
