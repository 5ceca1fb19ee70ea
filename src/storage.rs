//! Flat-file storage for uploads and enhanced outputs.

use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// File names allocated for one `/process` request.
#[derive(Debug, Clone)]
pub struct ProcessingFiles {
    pub processing_id: Uuid,
    pub input_filename: String,
    pub output_filename: String,
}

impl ProcessingFiles {
    /// Fresh collision-free names; `extension` includes the leading dot.
    pub fn allocate(extension: &str) -> Self {
        let processing_id = Uuid::new_v4();
        Self {
            processing_id,
            input_filename: format!("{}_input{}", processing_id, extension),
            output_filename: format!("{}_enhanced{}", processing_id, extension),
        }
    }

    pub fn download_url(&self) -> String {
        format!("/download/{}", self.output_filename)
    }
}

/// Path of `filename` inside `dir`, provided the name is a single plain
/// component. Separators, `..`, absolute paths and NUL bytes are refused.
pub fn resolve_in(dir: &Path, filename: &str) -> Option<PathBuf> {
    if filename.is_empty() || filename.contains(['/', '\\', '\0']) {
        return None;
    }

    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => Some(dir.join(name)),
        _ => None,
    }
}

/// Delete `path`, ignoring files that are already gone.
pub async fn remove_if_exists(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to clean up file"),
    }
}
