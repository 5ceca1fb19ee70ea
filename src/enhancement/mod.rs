//! # Audio Enhancement
//!
//! The processing core behind `POST /process`.
//!
//! ## Components:
//! - **AudioEnhancer**: one-time model loading, the (placeholder) enhancement
//!   pass and the running statistics it keeps
//! - **process_audio**: input/output checks around a single enhancement call
//! - **ProcessingStats**: incrementally maintained processing-time average
//!
//! ## Current state of the pipeline:
//! No signal processing happens yet. An enhancement pass copies the input
//! verbatim, waits for a time proportional to the input size and reports
//! every quality stage as `pending_implementation`. Noise reduction, source
//! separation (Demucs / Spleeter) and quality enhancement will slot in
//! behind the same contract.

pub mod enhancer;
pub mod error;
pub mod pipeline;
pub mod stats;

pub use enhancer::AudioEnhancer;
pub use error::EnhanceError;
pub use pipeline::process_audio;

/// Bytes per mebibyte, the unit used for sizes and simulated cost.
pub const MIB: f64 = 1024.0 * 1024.0;

/// Round to two decimal places for reporting.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_1), 1.24);
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(0.0), 0.0);
    }
}
