//! Callwatch constants.

use alloy::primitives::{address, Address};
use std::time::Duration;

/// Canonical Multicall deployment address, shared across chains.
///
/// See also <https://github.com/mds1/multicall#multicall3-contract-addresses>
pub const MULTICALL_ADDRESS: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

/// Pending duration after which a transaction is considered stale and only
/// checked every [`STALE_CHECK_BLOCKS`] blocks.
pub const STALE_AFTER: Duration = Duration::from_secs(60 * 60);

/// Minimum number of new blocks between receipt checks for stale transactions.
pub const STALE_CHECK_BLOCKS: u64 = 10;

/// Pending duration after which a transaction is checked every
/// [`SLOW_CHECK_BLOCKS`] blocks instead of on every block.
pub const SLOW_AFTER: Duration = Duration::from_secs(5 * 60);

/// Minimum number of new blocks between receipt checks for slow transactions.
pub const SLOW_CHECK_BLOCKS: u64 = 3;

/// Default timeout for a single receipt lookup.
///
/// A stalled lookup must not occupy a concurrency slot across cycles; a
/// timed-out lookup is retried on the next qualifying block.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
