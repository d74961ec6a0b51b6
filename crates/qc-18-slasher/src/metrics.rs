//! # Slasher Metrics
//!
//! Implementations of the `SlasherMetrics` sink.
//!
//! ## Usage
//!
//! Enable Prometheus support with the `metrics` feature:
//! ```toml
//! qc-18-slasher = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `slasher_attestations_received_total` - Counter of submitted attestations
//! - `slasher_attestations_rejected_total` - Counter of failed submissions (by stage)
//! - `slasher_stage_reached_total` - Counter of completed stages (by stage)
//! - `slasher_attester_slashings_total` - Counter of slashings found
//! - `slasher_span_update_failures_total` - Counter of failed span updates
//!
//! Metrics are registered into a registry owned by the caller.

use crate::error::PipelineStage;
use crate::ports::outbound::SlasherMetrics;

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopMetrics;

impl SlasherMetrics for NoopMetrics {
    fn attestation_received(&self) {}

    fn attestation_rejected(&self, _stage: PipelineStage) {}

    fn stage_reached(&self, _stage: PipelineStage) {}

    fn slashings_detected(&self, _count: usize) {}

    fn span_update_failed(&self) {}
}

#[cfg(feature = "metrics")]
pub use prom::PrometheusMetrics;

#[cfg(feature = "metrics")]
mod prom {
    use super::*;
    use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

    /// Prometheus-backed sink.
    #[derive(Clone)]
    pub struct PrometheusMetrics {
        received: IntCounter,
        rejected: IntCounterVec,
        stages: IntCounterVec,
        slashings: IntCounter,
        span_failures: IntCounter,
    }

    impl PrometheusMetrics {
        /// Create the collectors and register them in `registry`.
        pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
            let metrics = Self {
                received: IntCounter::new(
                    "slasher_attestations_received_total",
                    "Total number of attestations submitted to the slasher",
                )?,
                rejected: IntCounterVec::new(
                    Opts::new(
                        "slasher_attestations_rejected_total",
                        "Total number of submissions that failed, by stage",
                    ),
                    &["stage"],
                )?,
                stages: IntCounterVec::new(
                    Opts::new(
                        "slasher_stage_reached_total",
                        "Total number of pipeline stages completed, by stage",
                    ),
                    &["stage"],
                )?,
                slashings: IntCounter::new(
                    "slasher_attester_slashings_total",
                    "Total number of attester slashings detected",
                )?,
                span_failures: IntCounter::new(
                    "slasher_span_update_failures_total",
                    "Total number of failed span updates",
                )?,
            };

            registry.register(Box::new(metrics.received.clone()))?;
            registry.register(Box::new(metrics.rejected.clone()))?;
            registry.register(Box::new(metrics.stages.clone()))?;
            registry.register(Box::new(metrics.slashings.clone()))?;
            registry.register(Box::new(metrics.span_failures.clone()))?;

            Ok(metrics)
        }
    }

    impl SlasherMetrics for PrometheusMetrics {
        fn attestation_received(&self) {
            self.received.inc();
        }

        fn attestation_rejected(&self, stage: PipelineStage) {
            self.rejected.with_label_values(&[stage.as_str()]).inc();
        }

        fn stage_reached(&self, stage: PipelineStage) {
            self.stages.with_label_values(&[stage.as_str()]).inc();
        }

        fn slashings_detected(&self, count: usize) {
            self.slashings.inc_by(count as u64);
        }

        fn span_update_failed(&self) {
            self.span_failures.inc();
        }
    }

}
