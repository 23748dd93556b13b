//! Reporting server binary
//!
//! Serves the dashboard REST API over a SQLite database.

use tracing_subscriber::EnvFilter;

use reporting::api::{create_router, AppState};
use reporting::config::{ServerConfig, DEFAULT_JWT_SECRET};
use reporting::db::DatabaseConnection;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("{} v{}", reporting::version::PKG_NAME, reporting::version::VERSION);
    let config = ServerConfig::load()?;
    tracing::info!("Server name: {}", config.server.name);
    tracing::info!("Security mode: {:?}", config.security.mode);
    if config.auth.jwt_secret == DEFAULT_JWT_SECRET {
        tracing::warn!("Using the built-in JWT secret; set JWT_SECRET or auth.jwt_secret");
    }

    tracing::info!("Connecting to database: {}", reporting::db::connection::mask_url(&config.database.url));
    let db = DatabaseConnection::with_max_connections(&config.database.url, config.database.max_connections).await?;

    tracing::info!("Running database migrations");
    db.run_migrations().await?;
    db.health_check().await?;

    let addr = config.bind_address();
    let app = create_router(AppState::new(db.clone(), config));

    tracing::info!("Starting reporting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Reporting server shut down gracefully");
    Ok(())
}

/// Signal for graceful shutdown (Ctrl-C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for CTRL-C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL-C signal, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down");
        }
    }
}
