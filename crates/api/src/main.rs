use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bank_api::config::ServerConfig;
use bank_api::grpc::BankService;
use bank_api::router::build_app_router;
use bank_api::state::AppState;
use bank_db::{PgAccountStore, PgSessionStore, PgUserStore};
use bank_worker::{ChannelTaskDistributor, TaskProcessor};

/// Pending tasks buffered per queue before enqueueing waits.
const TASK_QUEUE_CAPACITY: usize = 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bank_api=debug,bank_auth=debug,tower_http=debug".into());
    if config.is_development() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    }
    tracing::info!(
        host = %config.host,
        port = config.port,
        grpc_port = config.grpc_port,
        token = ?config.token,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = bank_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    bank_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    bank_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Background tasks ---
    let users = Arc::new(PgUserStore::new(pool.clone()));
    let (distributor, queues) = ChannelTaskDistributor::channel(TASK_QUEUE_CAPACITY);
    let shutdown = CancellationToken::new();

    let processor = TaskProcessor::new(users.clone());
    let processor_handle = {
        let cancel = shutdown.clone();
        tokio::spawn(async move { processor.run(queues, cancel).await })
    };

    // --- App state ---
    let state = AppState::new(
        pool.clone(),
        config.clone(),
        users,
        Arc::new(PgAccountStore::new(pool.clone())),
        Arc::new(PgSessionStore::new(pool)),
        Arc::new(distributor),
    )?;

    // --- gRPC server ---
    let grpc_addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.grpc_port,
    );
    let grpc_handle = {
        let cancel = shutdown.clone();
        let service = BankService::new(state.clone()).into_server();
        tracing::info!(%grpc_addr, "Starting gRPC server");
        tokio::spawn(async move {
            tonic::transport::Server::builder()
                .layer(TraceLayer::new_for_grpc())
                .add_service(service)
                .serve_with_shutdown(grpc_addr, async move { cancel.cancelled().await })
                .await
        })
    };

    // --- HTTP server ---
    let app = build_app_router(state)?;
    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.port,
    );
    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    let http_cancel = shutdown.clone();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        http_cancel.cancel();
    })
    .await
    .context("HTTP server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("HTTP server stopped accepting connections, cleaning up");
    shutdown.cancel();

    match tokio::time::timeout(Duration::from_secs(5), grpc_handle).await {
        Ok(Ok(Err(e))) => tracing::error!(error = %e, "gRPC server error"),
        Err(_) => tracing::warn!("gRPC server did not stop in time"),
        _ => tracing::info!("gRPC server stopped"),
    }

    if tokio::time::timeout(Duration::from_secs(5), processor_handle)
        .await
        .is_err()
    {
        tracing::warn!("Task processor did not stop in time");
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). If a handler cannot
/// be installed, that signal source is ignored.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
