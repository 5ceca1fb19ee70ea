//! # Configuration Management
//!
//! Settings are merged from several sources, lowest priority first:
//! 1. Built-in defaults (the `Default` impl)
//! 2. `config.toml` in the working directory (optional)
//! 3. Environment variables with the `APP_` prefix, nested keys joined by `__`
//!    (`APP_SERVER__PORT`, `APP_STORAGE__UPLOAD_DIR`, ...)
//! 4. The plain deployment variables the service has always understood
//!    (`API_HOST`, `API_PORT`, `UPLOAD_DIR`, `CORS_ORIGINS`, ...)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Extensions accepted for upload. Matching is case-insensitive.
pub const SUPPORTED_FORMATS: [&str; 6] = [".wav", ".mp3", ".flac", ".m4a", ".aac", ".ogg"];

pub const SERVICE_NAME: &str = "Audio Enhancement Service";
pub const SERVICE_DESCRIPTION: &str = "AI-powered audio enhancement microservice for musicians";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
    pub models: ModelsConfig,
    pub processing: ProcessingConfig,
    pub audio: AudioConfig,
}

/// Where and how the HTTP server listens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Number of actix worker threads
    pub workers: usize,
}

/// Flat-file storage locations and upload limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    pub models_dir: PathBuf,
    /// Maximum accepted upload size in megabytes
    pub max_file_size_mb: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; a single `*` allows any origin
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Model identifiers for the enhancement pipeline.
///
/// Neither model is loaded yet; the names are reported so that clients can see
/// what the service is going to run once the pipeline lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub demucs_model: String,
    pub spleeter_model: String,
}

/// Tunables for the simulated processing workload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Length of the one-time model loading pause
    pub model_load_delay_ms: u64,
    /// Simulated cost per mebibyte of input
    pub seconds_per_mib: f64,
    /// Upper bound on the simulated cost of a single file
    pub max_simulated_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    pub default_sample_rate: u32,
    pub default_bit_depth: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                workers: 1,
            },
            storage: StorageConfig {
                upload_dir: PathBuf::from("uploads"),
                output_dir: PathBuf::from("outputs"),
                models_dir: PathBuf::from("models"),
                max_file_size_mb: 100,
            },
            cors: CorsConfig {
                origins: vec!["*".to_string()],
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            models: ModelsConfig {
                demucs_model: "htdemucs".to_string(),
                spleeter_model: "spleeter:2stems-16kHz".to_string(),
            },
            processing: ProcessingConfig::default(),
            audio: AudioConfig {
                default_sample_rate: 44100,
                default_bit_depth: 16,
            },
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            model_load_delay_ms: 1000,
            seconds_per_mib: 0.5,
            max_simulated_seconds: 5.0,
        }
    }
}

impl ProcessingConfig {
    /// Settings without any artificial delay.
    #[cfg(test)]
    pub fn instant() -> Self {
        Self {
            model_load_delay_ms: 0,
            seconds_per_mib: 0.0,
            max_simulated_seconds: 0.0,
        }
    }

    pub fn model_load_delay(&self) -> Duration {
        Duration::from_millis(self.model_load_delay_ms)
    }
}

/// Plain environment variables and the config keys they override.
const LEGACY_OVERRIDES: [(&str, &str); 12] = [
    ("HOST", "server.host"),
    ("API_HOST", "server.host"),
    ("PORT", "server.port"),
    ("API_PORT", "server.port"),
    ("WORKER_COUNT", "server.workers"),
    ("UPLOAD_DIR", "storage.upload_dir"),
    ("OUTPUT_DIR", "storage.output_dir"),
    ("MODELS_DIR", "storage.models_dir"),
    ("MAX_FILE_SIZE", "storage.max_file_size_mb"),
    ("LOG_LEVEL", "logging.level"),
    ("DEMUCS_MODEL", "models.demucs_model"),
    ("SPLEETER_MODEL", "models.spleeter_model"),
];

impl AppConfig {
    /// Load configuration from defaults, `config.toml` and the environment.
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        // API_HOST is listed after HOST so it wins when both are set
        for (var, key) in LEGACY_OVERRIDES {
            if let Ok(value) = env::var(var) {
                settings = settings.set_override(key, value)?;
            }
        }

        if let Ok(origins) = env::var("CORS_ORIGINS") {
            settings = settings.set_override("cors.origins", parse_origins(&origins))?;
        }

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        if self.server.workers == 0 {
            return Err(anyhow::anyhow!("Worker count must be greater than 0"));
        }

        if self.storage.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("Max file size must be greater than 0"));
        }

        if self.cors.origins.is_empty() {
            return Err(anyhow::anyhow!("At least one CORS origin must be configured"));
        }

        let processing = &self.processing;
        for (name, value) in [
            ("seconds_per_mib", processing.seconds_per_mib),
            ("max_simulated_seconds", processing.max_simulated_seconds),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow::anyhow!("processing.{} must be a non-negative number", name));
            }
        }

        Ok(())
    }

    /// Create the upload, output and model directories if they are missing.
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [
            &self.storage.upload_dir,
            &self.storage.output_dir,
            &self.storage.models_dir,
        ] {
            std::fs::create_dir_all(dir).map_err(|e| {
                anyhow::anyhow!("Failed to create directory {}: {}", dir.display(), e)
            })?;
        }
        Ok(())
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.storage.max_file_size_mb * 1024 * 1024
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors.origins.iter().any(|origin| origin == "*")
    }
}

/// Split a comma separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
