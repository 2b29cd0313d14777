use std::{
    io,
    net::{IpAddr, SocketAddr},
    path::Path,
    str::FromStr,
};

use clap::Parser;
use server::{cli::Cli, db, routes, AppState};
use shared::{configure_tracing, load_dotenv};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    load_dotenv()?;
    configure_tracing()?;

    let args = Cli::parse();
    debug!(?args);

    if args.debug_delete_database {
        delete_database(&args.sqlite_connection_string)?;
    }

    // Run the migrations synchronously before creating the pool or launching the server
    let ran = db::run_migrations(&args.sqlite_connection_string)?;
    info!("Ran {ran} db migrations");

    let pool = db::create_pool(&args.sqlite_connection_string)?;
    let state = AppState::sqlite(pool.clone());

    let socket = SocketAddr::new(IpAddr::from_str(&args.bind_addr)?, args.port);
    let listener = TcpListener::bind(socket).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, routes::router(state, args.body_limit_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close();
    info!("Server stopped");

    Ok(())
}

/// Removes the database file along with its WAL and shared memory files
fn delete_database(connection_string: &str) -> Result<(), io::Error> {
    for suffix in ["", "-wal", "-shm"] {
        let path = format!("{connection_string}{suffix}");
        match std::fs::remove_file(Path::new(&path)) {
            Ok(()) => warn!("Deleted {path}"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {},
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
