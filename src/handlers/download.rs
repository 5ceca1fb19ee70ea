//! # Download Endpoint
//!
//! `GET /download/{filename}` hands enhanced files back to the client.
//!
//! ## Lookup rules:
//! - Only names that are a single plain path component are looked up, and
//!   only inside the configured output directory
//! - Anything else (separators, `..`, NUL bytes, absolute paths) is answered
//!   exactly like a missing file: `404 {"detail": "File not found"}`
//! - Directories are never served, even when their name looks like a file
//!
//! ## Response:
//! The file is streamed from disk in chunks rather than buffered, so the
//! memory cost of a download does not grow with the file size. The body is
//! sent with a known `Content-Length`, a content type chosen by extension
//! (see [`crate::formats::mime_type`]) and an `attachment` disposition so
//! browsers save it under its stored name.

use crate::error::AppError;
use crate::formats::mime_type;
use crate::state::AppState;
use crate::storage;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use std::io;
use tokio_util::io::ReaderStream;
use tracing::debug;

fn not_found() -> AppError {
    AppError::NotFound("File not found".to_string())
}

/// `GET /download/{filename}` - stream a processed file from the output directory.
pub async fn download_file(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let filename = path.into_inner();
    let file_path = storage::resolve_in(state.output_dir(), &filename).ok_or_else(not_found)?;

    let metadata = match tokio::fs::metadata(&file_path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => return Err(not_found()),
    };

    let file = tokio::fs::File::open(&file_path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => not_found(),
        _ => AppError::Internal(format!("Failed to open {}: {}", filename, e)),
    })?;

    debug!(file = %filename, size_bytes = metadata.len(), "Serving processed file");

    Ok(HttpResponse::Ok()
        .content_type(mime_type(&filename))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .no_chunking(metadata.len())
        .streaming(ReaderStream::new(file)))
}
