//! Callwatch error types.

use thiserror::Error;

/// Errors returned by [`CallBatcher`](crate::batcher::CallBatcher).
///
/// Batch-level failures always propagate synchronously to the caller that
/// requested the read; there are no silent defaults. Per-transaction tracking
/// failures never surface here, they are one-way logged events inside the
/// tracker.
#[derive(Debug, Error)]
pub enum MulticallError {
    /// The interface description could not be parsed.
    ///
    /// This is a caller error and is never retried.
    #[error("invalid interface description: {0}")]
    InvalidInterface(String),

    /// The interface description has no function with the requested name.
    ///
    /// This is a caller error and is never retried.
    #[error("unknown function {0}")]
    UnknownFunction(String),

    /// An error occurred during ABI encoding/decoding.
    #[error(transparent)]
    Abi(#[from] alloy::dyn_abi::Error),

    /// A sub-call reverted while success was required for the whole batch.
    #[error("sub-call {index} reverted")]
    CallFailed {
        /// Position of the failing call in the submitted batch.
        index: usize,
    },

    /// The aggregator returned a result list that does not line up with the
    /// submitted calls.
    #[error("expected {expected} results, got {actual}")]
    UnexpectedResultCount {
        /// Number of calls submitted.
        expected: usize,
        /// Number of results returned.
        actual: usize,
    },

    /// The aggregate request itself failed: transport error, or the whole
    /// batch reverted on-chain.
    #[error(transparent)]
    Contract(#[from] alloy::contract::Error),
}
