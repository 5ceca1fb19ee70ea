//! # Audio Processing Endpoint
//!
//! `POST /process` accepts a multipart upload, stores it under a fresh
//! processing id, runs it through the enhancer and answers with where to
//! download the result.
//!
//! ## Response:
//! ```json
//! {
//!   "success": true,
//!   "message": "Audio processing completed successfully",
//!   "input_file": "take_3.wav",
//!   "output_file": "6f1c..._enhanced.wav",
//!   "output_path": "outputs/6f1c..._enhanced.wav",
//!   "processing_id": "6f1c...",
//!   "processing_details": { "status": "success", "processing_time": 1.02, ... },
//!   "download_url": "/download/6f1c..._enhanced.wav"
//! }
//! ```
//!
//! Whenever processing fails the stored upload and any partial output are
//! removed before the error is returned.

use crate::enhancement::process_audio;
use crate::error::AppError;
use crate::formats::{supported_extension, unsupported_format_message};
use crate::state::AppState;
use crate::storage::{self, ProcessingFiles};
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use futures_util::stream::StreamExt;
use serde_json::json;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// An upload that has been written to the upload directory.
struct StoredUpload {
    original_name: String,
    files: ProcessingFiles,
    input_path: PathBuf,
    size_bytes: u64,
}

pub async fn process_upload(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let upload = receive_upload(&state, &mut payload).await?;
    let output_path = state.output_dir().join(&upload.files.output_filename);

    info!(
        processing_id = %upload.files.processing_id,
        input_file = %upload.original_name,
        size_bytes = upload.size_bytes,
        "Received audio upload"
    );

    let processed = match process_audio(state.enhancer(), &upload.input_path, &output_path).await {
        Ok(processed) => processed,
        Err(e) => {
            storage::remove_if_exists(&upload.input_path).await;
            storage::remove_if_exists(&output_path).await;
            return Err(e.into());
        }
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Audio processing completed successfully",
        "input_file": upload.original_name,
        "output_file": upload.files.output_filename,
        "output_path": output_path.display().to_string(),
        "processing_id": upload.files.processing_id,
        "processing_details": processed,
        "download_url": upload.files.download_url()
    })))
}

/// Store the first file part of the form. Other parts are skipped.
async fn receive_upload(state: &AppState, payload: &mut Multipart) -> Result<StoredUpload, AppError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let Some(filename) = filename else {
            drain(&mut field).await?;
            continue;
        };

        if filename.trim().is_empty() {
            return Err(AppError::BadRequest("No file provided".to_string()));
        }

        let extension = supported_extension(&filename)
            .ok_or_else(|| AppError::UnsupportedFormat(unsupported_format_message()))?;

        let files = ProcessingFiles::allocate(&extension);
        let input_path = state.upload_dir().join(&files.input_filename);
        let limit = state.config().max_file_size_bytes();

        let size_bytes = match write_field(&mut field, &input_path, limit).await {
            Ok(size) => size,
            Err(e) => {
                storage::remove_if_exists(&input_path).await;
                return Err(e);
            }
        };

        return Ok(StoredUpload {
            original_name: filename,
            files,
            input_path,
            size_bytes,
        });
    }

    Err(AppError::BadRequest("No file provided".to_string()))
}

/// Stream a field to `path`, refusing to go past `limit` bytes.
async fn write_field(field: &mut Field, path: &Path, limit: u64) -> Result<u64, AppError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;
    let mut written: u64 = 0;

    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::BadRequest(format!("Chunk error: {}", e)))?;
        written += chunk.len() as u64;
        if written > limit {
            warn!(limit, "Upload exceeded the maximum file size");
            return Err(AppError::PayloadTooLarge(format!(
                "File too large (max: {} MB)",
                limit / (1024 * 1024)
            )));
        }
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;
    }

    file.flush()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;
    Ok(written)
}

async fn drain(field: &mut Field) -> Result<(), AppError> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|e| AppError::BadRequest(format!("Chunk error: {}", e)))?;
    }
    Ok(())
}
