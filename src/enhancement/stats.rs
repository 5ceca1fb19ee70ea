//! Running statistics over successful enhancement passes.

use serde::Serialize;

/// Count and mean processing time of every successful pass since startup.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ProcessingStats {
    pub total_processed: u64,
    /// Mean duration in seconds
    pub average_processing_time: f64,
}

impl ProcessingStats {
    /// Fold one more successful pass into the running mean.
    ///
    /// `new_avg = (old_avg * (n - 1) + duration) / n`, where `n` already
    /// includes this pass.
    pub fn record(&mut self, duration_secs: f64) {
        self.total_processed += 1;
        let n = self.total_processed as f64;
        self.average_processing_time = (self.average_processing_time * (n - 1.0) + duration_secs) / n;
    }
}

/// Monitoring view returned by `GET /stats`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatsSnapshot {
    pub total_files_processed: u64,
    pub average_processing_time: f64,
    pub models_loaded: bool,
    pub service_status: &'static str,
}

impl StatsSnapshot {
    pub fn new(stats: ProcessingStats, models_loaded: bool) -> Self {
        Self {
            total_files_processed: stats.total_processed,
            average_processing_time: stats.average_processing_time,
            models_loaded,
            service_status: "active",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_starts_empty() {
        let stats = ProcessingStats::default();
        assert_eq!(stats.total_processed, 0);
        assert_eq!(stats.average_processing_time, 0.0);
    }

    #[test]
    fn test_single_record() {
        let mut stats = ProcessingStats::default();
        stats.record(1.5);
        assert_eq!(stats.total_processed, 1);
        assert!((stats.average_processing_time - 1.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_incremental_mean_matches_direct_mean() {
        let durations = [0.12, 3.7, 0.0, 5.03, 1.0, 2.25, 0.003, 4.999, 1.1, 0.6];
        let mut stats = ProcessingStats::default();

        for (i, duration) in durations.iter().enumerate() {
            let before = stats;
            stats.record(*duration);

            let n = stats.total_processed as f64;
            let expected_step = (before.average_processing_time * (n - 1.0) + duration) / n;
            assert!((stats.average_processing_time - expected_step).abs() < TOLERANCE);

            let seen = &durations[..=i];
            let direct = seen.iter().sum::<f64>() / seen.len() as f64;
            assert!(
                (stats.average_processing_time - direct).abs() < TOLERANCE,
                "drifted after {} samples: {} vs {}",
                i + 1,
                stats.average_processing_time,
                direct
            );
        }
        assert_eq!(stats.total_processed, durations.len() as u64);
    }

    #[test]
    fn test_long_sequence_does_not_drift() {
        let mut stats = ProcessingStats::default();
        let mut sum = 0.0;
        for i in 0..10_000u64 {
            let duration = (i % 97) as f64 * 0.013;
            sum += duration;
            stats.record(duration);
        }
        let direct = sum / 10_000.0;
        assert!((stats.average_processing_time - direct).abs() < 1e-6);
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut stats = ProcessingStats::default();
        stats.record(2.0);
        let snapshot = StatsSnapshot::new(stats, true);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["total_files_processed"], 1);
        assert_eq!(json["average_processing_time"], 2.0);
        assert_eq!(json["models_loaded"], true);
        assert_eq!(json["service_status"], "active");
    }
}
