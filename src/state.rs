//! # Application State
//!
//! State shared by every request handler. actix-web clones `AppState` into
//! each worker, so everything mutable lives behind an `Arc`:
//!
//! - **config**: read-only after startup
//! - **enhancer**: the one `AudioEnhancer` for this service, which guards its
//!   own model gate and statistics
//! - **start_time**: used for uptime reporting
//!
//! ## Key Rust Concepts:
//!
//! ### `Arc` instead of `Arc<RwLock<T>>`
//! - The configuration never changes after startup, so a plain `Arc<AppConfig>`
//!   is enough; readers never contend for a lock
//! - The enhancer is also shared through a plain `Arc`. The pieces of it that
//!   do change keep their own synchronization inside `AudioEnhancer`
//!
//! ### Interior synchronization
//! - `tokio::sync::OnceCell` runs the model load exactly once, even when the
//!   first requests arrive on several worker threads at the same moment
//! - `std::sync::Mutex` protects the statistics. The critical section is a
//!   couple of arithmetic operations and never spans an `.await`, so the
//!   blocking mutex is the right tool here rather than an async one
//!
//! ### `web::Data<AppState>`
//! - actix wraps the state in another `Arc`; cloning `AppState` itself only
//!   bumps reference counts, it never copies the config or the statistics

use crate::config::AppConfig;
use crate::enhancement::AudioEnhancer;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    enhancer: Arc<AudioEnhancer>,
    start_time: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let enhancer = AudioEnhancer::new(config.processing.clone());
        Self {
            config: Arc::new(config),
            enhancer: Arc::new(enhancer),
            start_time: Instant::now(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn enhancer(&self) -> &AudioEnhancer {
        &self.enhancer
    }

    pub fn upload_dir(&self) -> &Path {
        &self.config.storage.upload_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.storage.output_dir
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
