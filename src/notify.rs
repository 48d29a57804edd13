//! Notification events emitted on transaction finality.

use crate::types::Receipt;
use alloy::primitives::TxHash;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Fire-and-forget event emitted once when a tracked transaction finalizes.
///
/// Consumed by a collaborator responsible for user-facing display (e.g. a
/// toast). Emission is at-most-once per terminal transition; it is never
/// retried or deduplicated by the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionNotification {
    /// Unique identifier, derived from the transaction hash and the emission
    /// timestamp.
    pub id: String,
    /// Hash of the finalized transaction.
    pub hash: TxHash,
    /// Whether the transaction executed successfully.
    pub succeeded: bool,
    /// Link to the transaction on a block explorer, if one is configured for
    /// the chain.
    pub link: Option<Url>,
}

impl TransactionNotification {
    /// Builds a notification for a freshly attached receipt.
    pub fn new(receipt: &Receipt, explorer: Option<&Url>, emitted_at: DateTime<Utc>) -> Self {
        let hash = receipt.transaction_hash;
        Self {
            id: format!("{hash}-{}", emitted_at.timestamp_millis()),
            hash,
            succeeded: receipt.status,
            link: explorer.and_then(|base| base.join(&format!("tx/{hash}")).ok()),
        }
    }
}
