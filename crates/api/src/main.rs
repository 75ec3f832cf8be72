use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showroom_api::config::ServerConfig;
use showroom_api::router::build_app_router;
use showroom_api::state::AppState;
use showroom_api::storage::ImageStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showroom_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Image store ---
    let images = ImageStore::new(&config.upload_dir);
    if let Err(e) = images.ensure_dir().await {
        tracing::error!(error = %e, dir = %config.upload_dir.display(), "Failed to create upload directory");
        std::process::exit(1);
    }

    // --- Database ---
    let pool = connect_catalog_store(&config).await;

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        images: Arc::new(images),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let ip = match config.host.parse() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!(error = %e, host = %config.host, "Invalid HOST address");
            std::process::exit(1);
        }
    };
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Graceful shutdown complete");
}

/// Build the catalog store pool, verify it and apply migrations.
///
/// Never fatal. An unparseable connection configuration yields `None` and the
/// catalog endpoints answer "Database not connected". An unreachable store is
/// logged; the lazy pool keeps trying on each request.
async fn connect_catalog_store(config: &ServerConfig) -> Option<showroom_db::DbPool> {
    let options = match config.database.connect_options() {
        Ok(options) => options,
        Err(e) => {
            tracing::error!(error = %e, "Invalid database configuration, catalog endpoints disabled");
            return None;
        }
    };

    let pool = showroom_db::create_pool(
        options,
        config.database.max_connections,
        config.database.acquire_timeout,
    );
    tracing::info!(
        max_connections = config.database.max_connections,
        acquire_timeout_secs = config.database.acquire_timeout.as_secs(),
        "Database connection pool created"
    );

    match showroom_db::health_check(&pool).await {
        Ok(()) => {
            tracing::info!("Database health check passed");
            match showroom_db::run_migrations(&pool).await {
                Ok(()) => tracing::info!("Database migrations applied"),
                Err(e) => tracing::error!(error = %e, "Failed to run database migrations"),
            }
        }
        Err(e) => tracing::error!(error = %e, "Database connection failed"),
    }

    Some(pool)
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
