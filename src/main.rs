//! # Audio Enhancer - Service Entry Point
//!
//! HTTP microservice that accepts audio uploads, runs them through the
//! enhancement pipeline and serves the results for download.
//!
//! ## Application Architecture:
//! - **config**: settings from defaults, `config.toml` and the environment
//! - **state**: shared state handed to every request handler
//! - **enhancement**: the processing core (model lifecycle, enhancement pass, statistics)
//! - **handlers**: `/process`, `/download/{filename}`, `/formats`
//! - **health**: `/`, `/health`, `/stats`
//! - **formats** / **storage**: upload allow-list and flat-file storage helpers
//! - **middleware**: request logging
//! - **error**: HTTP error type and JSON error bodies

mod config;
mod enhancement;
mod error;
mod formats;
mod handlers;
mod health;
mod middleware;
mod state;
mod storage;

#[cfg(test)]
mod test_support;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Result;
use crate::config::AppConfig;
use crate::state::AppState;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;
    config.ensure_directories()?;

    info!("Starting {} v{}", crate::config::SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    info!(
        upload_dir = %config.storage.upload_dir.display(),
        output_dir = %config.storage.output_dir.display(),
        max_file_size_mb = config.storage.max_file_size_mb,
        "Storage ready"
    );

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let workers = config.server.workers;
    let app_state = web::Data::new(AppState::new(config));

    info!("Starting HTTP server on {} with {} worker(s)", bind_addr, workers);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(build_cors(app_state.config()))
            .wrap(Logger::default())
            .wrap(middleware::RequestLogging)
            .configure(handlers::configure_routes)
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            match result {
                Ok(Err(e)) => error!("Server error: {}", e),
                Err(e) => error!("Server task error: {}", e),
                Ok(Ok(())) => {}
            }
        }
        _ = wait_for_shutdown() => {
            info!("Shutdown signal received, stopping server...");
            server_handle.stop(true).await;
        }
    }

    info!("Server stopped gracefully");
    Ok(())
}

/// Console logging. `RUST_LOG` takes precedence over the configured level.
fn init_tracing(config: &AppConfig) {
    let default_filter = format!(
        "audio_enhancer={},actix_web=info",
        config.logging.level.to_lowercase()
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// CORS policy from `cors.origins`; `*` opens the service to every origin.
fn build_cors(config: &AppConfig) -> Cors {
    let cors = if config.allows_any_origin() {
        Cors::default().allow_any_origin()
    } else {
        config
            .cors
            .origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .supports_credentials()
    };

    cors.allow_any_method().allow_any_header().max_age(3600)
}

/// Resolve once SIGINT (Ctrl+C) or, on Unix, SIGTERM arrives.
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
