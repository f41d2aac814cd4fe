//! Conversion summary and reporting
//!
//! This module defines structures for tracking and reporting batch results.

use super::converter::{ConversionOutcome, RecordFailure};
use std::time::Duration;

/// Summary of a conversion batch
#[derive(Debug, Default)]
pub struct ConversionSummary {
    /// Unique records found under the input root
    pub discovered: usize,

    /// Records converted (encoded, and written unless dry run)
    pub converted: usize,

    /// Records that failed at some stage
    pub failed: usize,

    /// Records never started because the batch was cancelled
    pub not_scheduled: usize,

    /// One entry per failed record
    pub failures: Vec<RecordFailure>,

    /// Nothing was written
    pub dry_run: bool,

    /// A shutdown signal stopped scheduling before every record ran
    pub interrupted: bool,

    /// Wall-clock duration of the batch
    pub duration: Duration,
}

impl ConversionSummary {
    /// Create a new empty summary
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Count one finished record
    pub fn record(&mut self, outcome: ConversionOutcome) {
        match outcome {
            ConversionOutcome::Converted(_) => self.converted += 1,
            ConversionOutcome::Failed(failure) => {
                self.failed += 1;
                self.failures.push(failure);
            }
        }
    }

    /// Records that ran to an outcome
    pub fn processed(&self) -> usize {
        self.converted + self.failed
    }

    /// Every discovered record was converted
    pub fn is_successful(&self) -> bool {
        self.failed == 0 && !self.interrupted
    }

    /// Get success rate as a percentage of processed records
    pub fn success_rate(&self) -> f64 {
        if self.processed() == 0 {
            return 100.0;
        }
        (self.converted as f64 / self.processed() as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            discovered = self.discovered,
            converted = self.converted,
            failed = self.failed,
            not_scheduled = self.not_scheduled,
            dry_run = self.dry_run,
            interrupted = self.interrupted,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Conversion completed"
        );

        for failure in &self.failures {
            tracing::warn!(
                record_id = %failure.record_id,
                stage = %failure.error.stage(),
                error = %failure.error,
                "Could not process record"
            );
        }
    }
}
