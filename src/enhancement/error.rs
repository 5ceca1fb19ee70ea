//! Errors raised by the enhancement core.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnhanceError {
    /// The input file was gone before processing started
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Filesystem failure inside the enhancement pass itself
    #[error("Audio enhancement failed: {0}")]
    Resource(#[from] io::Error),

    /// Filesystem failure while preparing or checking a pass
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The pass reported success but left nothing at the output path
    #[error("Output file was not created: {}", .0.display())]
    MissingOutput(PathBuf),

    /// Any failure once it has crossed the `process_audio` boundary.
    /// Only the message of the original cause survives.
    #[error("{0}")]
    Processing(String),
}

impl EnhanceError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        EnhanceError::Io {
            context: context.into(),
            source,
        }
    }

    /// Collapse any error into the uniform processing failure.
    pub fn into_processing(self) -> Self {
        match self {
            EnhanceError::Processing(_) => self,
            other => EnhanceError::Processing(format!("Failed to process audio: {}", other)),
        }
    }
}
