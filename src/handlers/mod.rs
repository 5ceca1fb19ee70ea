//! # HTTP Handlers
//!
//! Route handlers for the file-oriented part of the API. Each submodule owns
//! one endpoint:
//!
//! - **process**: `POST /process`, multipart upload followed by enhancement
//! - **download**: `GET /download/{filename}`, streams enhanced files back
//! - **formats**: `GET /formats`, the accepted extensions
//!
//! The status endpoints (`/`, `/health`, `/stats`) live in [`crate::health`]
//! and are wired up here as well so that the whole route table sits in one
//! place.
//!
//! ## Handler conventions:
//! - Shared state arrives as `web::Data<AppState>`; handlers never build
//!   their own enhancer or config
//! - Failures are returned as `AppError`, which renders the JSON error body,
//!   so handlers just use `?`
//! - Anything written to disk is named by `storage::ProcessingFiles`, never
//!   by the client-supplied filename

pub mod download;
pub mod formats;
pub mod process;

pub use download::*;
pub use formats::*;
pub use process::*;

use crate::health;
use actix_web::web;

/// Register every route of the service.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::service_info))
        .route("/health", web::get().to(health::health_check))
        .route("/stats", web::get().to(health::processing_stats))
        .route("/formats", web::get().to(supported_formats))
        .route("/process", web::post().to(process_upload))
        .route("/download/{filename}", web::get().to(download_file));
}
