//! Entry point used by the HTTP layer to run one file through the enhancer.

use crate::enhancement::enhancer::{AudioEnhancer, ProcessingResult};
use crate::enhancement::error::EnhanceError;
use serde::Serialize;
use std::path::Path;
use tracing::{error, info};

/// A finished enhancement pass together with where it read and wrote.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedAudio {
    #[serde(flatten)]
    pub result: ProcessingResult,
    pub input_path: String,
    pub output_path: String,
    pub output_exists: bool,
    pub message: String,
}

/// Enhance `input_path` into `output_path`.
///
/// Checks that the input exists, creates the output's parent directory, runs
/// the enhancer and confirms the output was written. Whatever goes wrong is
/// reported as a single [`EnhanceError::Processing`] carrying the cause's
/// message, so callers only ever see one error shape:
///
/// | cause | message after wrapping |
/// |---|---|
/// | input missing | `Failed to process audio: Input file not found: ...` |
/// | output directory cannot be created | `Failed to process audio: Failed to create output directory ...: ...` |
/// | enhancement pass I/O failure | `Failed to process audio: Audio enhancement failed: ...` |
/// | no output after the pass | `Failed to process audio: Output file was not created: ...` |
pub async fn process_audio(
    enhancer: &AudioEnhancer,
    input_path: &Path,
    output_path: &Path,
) -> Result<ProcessedAudio, EnhanceError> {
    info!(
        input = %input_path.display(),
        output = %output_path.display(),
        "Starting audio processing"
    );

    match run(enhancer, input_path, output_path).await {
        Ok(result) => {
            info!(output = %output_path.display(), "Audio processing completed successfully");
            Ok(ProcessedAudio {
                result,
                input_path: input_path.display().to_string(),
                output_path: output_path.display().to_string(),
                output_exists: true,
                message: "Audio enhancement completed successfully".to_string(),
            })
        }
        Err(e) => {
            let e = e.into_processing();
            error!(error = %e, "Audio processing failed");
            Err(e)
        }
    }
}

async fn run(
    enhancer: &AudioEnhancer,
    input_path: &Path,
    output_path: &Path,
) -> Result<ProcessingResult, EnhanceError> {
    let input_exists = tokio::fs::try_exists(input_path).await.map_err(|e| {
        EnhanceError::io(format!("Unable to access input file {}", input_path.display()), e)
    })?;
    if !input_exists {
        return Err(EnhanceError::NotFound(input_path.to_path_buf()));
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            EnhanceError::io(format!("Failed to create output directory {}", parent.display()), e)
        })?;
    }

    let result = enhancer.enhance(input_path, output_path).await?;

    let output_exists = tokio::fs::try_exists(output_path).await.map_err(|e| {
        EnhanceError::io(format!("Unable to verify output file {}", output_path.display()), e)
    })?;
    if !output_exists {
        return Err(EnhanceError::MissingOutput(output_path.to_path_buf()));
    }

    Ok(result)
}
