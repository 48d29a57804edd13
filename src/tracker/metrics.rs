use metrics::{Counter, Gauge};
use metrics_derive::Metrics;

/// Metrics for a [`ConfirmationTracker`](crate::tracker::ConfirmationTracker).
#[derive(Metrics)]
#[metrics(scope = "tracker")]
pub struct TrackerMetrics {
    /// Number of receipt checks performed.
    pub checks: Counter,
    /// Number of transactions that reached finality.
    pub finalized: Counter,
    /// Number of receipt lookups that failed or timed out.
    pub lookup_errors: Counter,
    /// Number of transactions currently awaiting finality, across all chains.
    pub pending: Gauge,
}
