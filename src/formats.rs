//! Accepted upload formats.
//!
//! The allow-list is matched against the filename suffix only; file contents
//! are not sniffed. The same extension table drives the `Content-Type` of
//! downloads.

use crate::config::SUPPORTED_FORMATS;
use std::path::Path;

/// Lower-cased extension of `filename`, including the leading dot.
///
/// Names without an extension (including dot-files such as `.wav`) give `None`.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
}

/// Extension of `filename` if it is on the allow-list.
pub fn supported_extension(filename: &str) -> Option<String> {
    file_extension(filename).filter(|ext| SUPPORTED_FORMATS.contains(&ext.as_str()))
}

/// Message returned for uploads outside the allow-list.
pub fn unsupported_format_message() -> String {
    format!(
        "Unsupported file format. Supported formats: {}",
        SUPPORTED_FORMATS.join(", ")
    )
}

/// Content type used when serving a processed file.
pub fn mime_type(filename: &str) -> &'static str {
    match file_extension(filename).as_deref() {
        Some(".wav") => "audio/wav",
        Some(".mp3") => "audio/mpeg",
        Some(".flac") => "audio/flac",
        Some(".m4a") => "audio/mp4",
        Some(".aac") => "audio/aac",
        Some(".ogg") => "audio/ogg",
        _ => "application/octet-stream",
    }
}
