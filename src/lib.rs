//! # Callwatch
//!
//! Batched read access to smart contracts and confirmation tracking for
//! submitted transactions.
//!
//! The two entry points are [`CallBatcher`](batcher::CallBatcher), which folds
//! many independent `eth_call`s into a single aggregator-contract request, and
//! [`ConfirmationTracker`](tracker::ConfirmationTracker), which polls receipts
//! for pending transactions on an adaptive, block-driven cadence.

pub mod batcher;
pub mod config;
pub mod constants;
pub mod error;
pub mod notify;
pub mod serde;
pub mod tracker;
pub mod transport;
pub mod types;
