//! Service tracking submitted transactions until finality.

mod metrics;
pub use metrics::TrackerMetrics;

mod pending;
pub use pending::{should_check, PendingTransaction};

mod service;
pub use service::{ConfirmationTracker, TrackerHandle, TrackerMessage};
