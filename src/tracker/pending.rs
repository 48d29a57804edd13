//! Pending transactions and the adaptive check cadence.

use crate::{
    constants::{SLOW_AFTER, SLOW_CHECK_BLOCKS, STALE_AFTER, STALE_CHECK_BLOCKS},
    types::Receipt,
};
use alloy::primitives::TxHash;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A submitted transaction awaiting finality.
///
/// Created when a collaborator submits a transaction and mutated only by the
/// tracker: `last_checked_block` advances monotonically per check, `receipt`
/// is set exactly once and is terminal. The tracker never evicts on its own;
/// removal happens only through an explicit untrack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTransaction {
    /// Hash of the transaction.
    pub hash: TxHash,
    /// Wall-clock time at which the transaction was submitted for tracking.
    pub added_time: DateTime<Utc>,
    /// Block number of the most recent receipt check, if any.
    pub last_checked_block: Option<u64>,
    /// The receipt, once observed.
    pub receipt: Option<Receipt>,
}

impl PendingTransaction {
    /// Creates a new pending transaction submitted now.
    pub fn new(hash: TxHash) -> Self {
        Self { hash, added_time: Utc::now(), last_checked_block: None, receipt: None }
    }

    /// Whether the transaction has reached its terminal state.
    pub fn is_finalized(&self) -> bool {
        self.receipt.is_some()
    }
}

/// Decides whether a pending transaction is due for a receipt check.
///
/// Fresh transactions are checked on every new block for responsiveness;
/// transactions pending over five minutes every [`SLOW_CHECK_BLOCKS`] blocks;
/// transactions pending over an hour every [`STALE_CHECK_BLOCKS`] blocks, so
/// likely-dropped transactions do not hammer the node. A finalized
/// transaction is never checked again.
pub fn should_check(current_block: u64, tx: &PendingTransaction, now: DateTime<Utc>) -> bool {
    if tx.receipt.is_some() {
        return false;
    }
    let Some(last_checked) = tx.last_checked_block else {
        return true;
    };
    // No new block since the last check, or the feed went backwards.
    if current_block <= last_checked {
        return false;
    }
    let blocks_since_check = current_block - last_checked;

    // Negative pending durations (clock skew) land in the fresh tier.
    let pending_for = now.signed_duration_since(tx.added_time).to_std().unwrap_or_default();
    if pending_for > STALE_AFTER {
        return blocks_since_check >= STALE_CHECK_BLOCKS;
    }
    if pending_for > SLOW_AFTER {
        return blocks_since_check >= SLOW_CHECK_BLOCKS;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, B256};
    use chrono::Duration;

    fn tx(pending_minutes: i64, last_checked_block: Option<u64>) -> PendingTransaction {
        PendingTransaction {
            hash: B256::repeat_byte(1),
            added_time: Utc::now() - Duration::minutes(pending_minutes),
            last_checked_block,
            receipt: None,
        }
    }

    fn receipt() -> Receipt {
        Receipt {
            block_hash: B256::repeat_byte(2),
            block_number: 90,
            contract_address: None,
            from: Address::repeat_byte(3),
            status: true,
            to: None,
            transaction_hash: B256::repeat_byte(1),
            transaction_index: 1,
        }
    }

    #[test]
    fn finalized_transactions_are_never_checked() {
        let mut tx = tx(2, None);
        tx.receipt = Some(receipt());

        // Terminality is idempotent: no block height makes it eligible again.
        for block in [0, 1, 100, u64::MAX] {
            assert!(!should_check(block, &tx, Utc::now()));
        }
    }

    #[test]
    fn unchecked_transactions_are_checked_immediately() {
        assert!(should_check(100, &tx(0, None), Utc::now()));
        assert!(should_check(100, &tx(120, None), Utc::now()));
    }

    #[test]
    fn no_new_block_means_no_check() {
        let now = Utc::now();
        assert!(!should_check(100, &tx(120, Some(100)), now));
        // Block feed regression must not underflow or trigger a check.
        assert!(!should_check(99, &tx(120, Some(100)), now));
    }

    #[test]
    fn stale_transactions_are_checked_every_ten_blocks() {
        let now = Utc::now();
        assert!(should_check(110, &tx(70, Some(100)), now));
        assert!(!should_check(109, &tx(70, Some(100)), now));
    }

    #[test]
    fn slow_transactions_are_checked_every_three_blocks() {
        let now = Utc::now();
        assert!(should_check(103, &tx(6, Some(100)), now));
        assert!(!should_check(102, &tx(6, Some(100)), now));
    }

    #[test]
    fn fresh_transactions_are_checked_on_every_block() {
        assert!(should_check(101, &tx(2, Some(100)), Utc::now()));
    }

    #[test]
    fn fractional_minutes_count_toward_the_tier_boundary() {
        // 5 minutes 30 seconds pending is "more than 5 minutes".
        let tx = PendingTransaction {
            hash: B256::repeat_byte(1),
            added_time: Utc::now() - Duration::seconds(5 * 60 + 30),
            last_checked_block: Some(100),
            receipt: None,
        };
        assert!(!should_check(102, &tx, Utc::now()));
        assert!(should_check(103, &tx, Utc::now()));
    }

    #[test]
    fn clock_skew_falls_back_to_the_fresh_tier() {
        assert!(should_check(101, &tx(-10, Some(100)), Utc::now()));
    }
}
