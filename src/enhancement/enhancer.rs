//! # Audio Enhancer
//!
//! Owns the model lifecycle and the processing statistics for one running
//! service. A single instance is created at startup and shared between all
//! request handlers through `AppState`.
//!
//! ## Concurrency:
//! - Model loading goes through a `OnceCell`, so concurrent first requests
//!   wait on one load instead of each running their own.
//! - Statistics sit behind a `Mutex` that is only taken for the synchronous
//!   update, never across an `.await`.

use crate::config::ProcessingConfig;
use crate::enhancement::error::EnhanceError;
use crate::enhancement::stats::{ProcessingStats, StatsSnapshot};
use crate::enhancement::{round2, MIB};
use serde::Serialize;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::Instant;
use tracing::{debug, error, info};

const PENDING: &str = "pending_implementation";

/// Outcome of one enhancement pass, as reported to clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProcessingResult {
    pub status: String,
    /// Measured wall-clock seconds, two decimals
    pub processing_time: f64,
    /// Input size in MiB, two decimals
    pub file_size_mb: f64,
    pub enhancement_applied: String,
    pub models_used: Vec<String>,
    pub quality_improvements: QualityImprovements,
}

/// Status of each enhancement stage.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QualityImprovements {
    pub noise_reduction: String,
    pub source_separation: String,
    pub audio_enhancement: String,
}

impl QualityImprovements {
    fn pending() -> Self {
        Self {
            noise_reduction: PENDING.to_string(),
            source_separation: PENDING.to_string(),
            audio_enhancement: PENDING.to_string(),
        }
    }
}

impl ProcessingResult {
    fn placeholder(elapsed_secs: f64, file_size_bytes: u64) -> Self {
        Self {
            status: "success".to_string(),
            processing_time: round2(elapsed_secs),
            file_size_mb: round2(file_size_bytes as f64 / MIB),
            enhancement_applied: "placeholder_processing".to_string(),
            models_used: vec!["placeholder".to_string()],
            quality_improvements: QualityImprovements::pending(),
        }
    }
}

pub struct AudioEnhancer {
    config: ProcessingConfig,
    models: OnceCell<()>,
    stats: Mutex<ProcessingStats>,
}

impl AudioEnhancer {
    pub fn new(config: ProcessingConfig) -> Self {
        Self {
            config,
            models: OnceCell::new(),
            stats: Mutex::new(ProcessingStats::default()),
        }
    }

    /// Load the enhancement models. Only the first call does any work.
    ///
    /// There are no real models yet; loading is a fixed pause standing in for
    /// model initialization.
    pub async fn load_models(&self) {
        self.models
            .get_or_init(|| async {
                info!("Loading AI models for audio enhancement...");
                tokio::time::sleep(self.config.model_load_delay()).await;
                info!("Models loaded successfully");
            })
            .await;
    }

    pub fn models_loaded(&self) -> bool {
        self.models.initialized()
    }

    /// Simulated cost of enhancing `file_size_bytes` of audio:
    /// `min(size_mib * seconds_per_mib, max_simulated_seconds)`.
    pub fn simulated_duration(&self, file_size_bytes: u64) -> Duration {
        let secs = (file_size_bytes as f64 / MIB * self.config.seconds_per_mib)
            .min(self.config.max_simulated_seconds);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
    }

    /// Run one enhancement pass from `input` to `output`.
    ///
    /// The caller is responsible for validating the format and for removing a
    /// partially written `output` if this fails. Statistics are only updated
    /// when the whole pass succeeds.
    pub async fn enhance(&self, input: &Path, output: &Path) -> Result<ProcessingResult, EnhanceError> {
        self.load_models().await;

        let start = Instant::now();
        info!(input = %input.display(), "Processing audio file");

        let file_size = match self.run_pass(input, output).await {
            Ok(size) => size,
            Err(e) => {
                error!(input = %input.display(), error = %e, "Error processing audio");
                return Err(e);
            }
        };

        let elapsed = start.elapsed().as_secs_f64();
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(elapsed);

        Ok(ProcessingResult::placeholder(elapsed, file_size))
    }

    async fn run_pass(&self, input: &Path, output: &Path) -> Result<u64, EnhanceError> {
        let file_size = tokio::fs::metadata(input).await?.len();

        let delay = self.simulated_duration(file_size);
        debug!(file_size, delay_secs = delay.as_secs_f64(), "Simulating enhancement workload");
        tokio::time::sleep(delay).await;

        // Placeholder pipeline: the output is the input, byte for byte
        tokio::fs::copy(input, output).await?;

        Ok(file_size)
    }

    pub fn stats(&self) -> ProcessingStats {
        *self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot::new(self.stats(), self.models_loaded())
    }
}
