//! # Error Handling
//!
//! HTTP-facing error type and its conversion into JSON responses.
//!
//! Every error leaves the server with the same body shape:
//! ```json
//! {
//!   "detail": "Unsupported file format. Supported formats: .wav, .mp3, ...",
//!   "error": {
//!     "type": "unsupported_format",
//!     "message": "Unsupported file format. Supported formats: .wav, .mp3, ...",
//!     "timestamp": "2025-01-01T12:00:00Z"
//!   }
//! }
//! ```
//! `detail` mirrors the message for clients written against earlier releases
//! of the service.

use crate::enhancement::EnhanceError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

/// Error categories surfaced by the HTTP layer.
///
/// - **BadRequest** / **UnsupportedFormat**: the client sent something unusable (400)
/// - **NotFound**: the requested file does not exist (404)
/// - **PayloadTooLarge**: the upload exceeded the configured limit (413)
/// - **Processing**: the enhancement pipeline failed (500)
/// - **Internal**: storage or other server-side problems (500)
#[derive(Debug)]
pub enum AppError {
    Internal(String),
    BadRequest(String),
    UnsupportedFormat(String),
    NotFound(String),
    PayloadTooLarge(String),
    Processing(String),
}

impl AppError {
    fn kind(&self) -> (StatusCode, &'static str, &str) {
        match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.as_str()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.as_str()),
            AppError::UnsupportedFormat(msg) => (StatusCode::BAD_REQUEST, "unsupported_format", msg.as_str()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.as_str()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", msg.as_str()),
            AppError::Processing(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "processing_error", msg.as_str()),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            AppError::Processing(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.kind().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, error_type, message) = self.kind();

        HttpResponse::build(status).json(json!({
            "detail": message,
            "error": {
                "type": error_type,
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        }))
    }
}

/// Pipeline failures are reported as 500s, prefixed the way the service has
/// always phrased them.
impl From<EnhanceError> for AppError {
    fn from(err: EnhanceError) -> Self {
        AppError::Processing(format!("Audio processing failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: AppError) -> serde_json::Value {
        let response = err.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::UnsupportedFormat("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::PayloadTooLarge("x".into()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::Processing("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let body = body_json(AppError::NotFound("File not found".into())).await;
        assert_eq!(body["detail"], "File not found");
        assert_eq!(body["error"]["type"], "not_found");
        assert_eq!(body["error"]["message"], "File not found");
        assert!(body["error"]["timestamp"].is_string());
    }

    #[test]
    fn test_enhance_error_becomes_processing_error() {
        let err: AppError = EnhanceError::Processing("Failed to process audio: boom".into()).into();
        match err {
            AppError::Processing(msg) => {
                assert_eq!(msg, "Audio processing failed: Failed to process audio: boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
