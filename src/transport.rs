//! Abstract transport seam for receipt lookups.

use crate::types::Receipt;
use alloy::{
    primitives::TxHash,
    providers::Provider,
    transports::TransportResult,
};
use async_trait::async_trait;

/// Queries transaction receipts by hash.
///
/// The concrete protocol behind this (JSON-RPC over HTTP/WS) is a collaborator
/// concern; the tracker only needs this shape. Any [`Provider`] satisfies it.
#[async_trait]
pub trait ReceiptLookup: Send + Sync + 'static {
    /// Returns the receipt for `hash`, or `None` if the transaction has not
    /// been included yet.
    async fn transaction_receipt(&self, hash: TxHash) -> TransportResult<Option<Receipt>>;
}

#[async_trait]
impl<P: Provider + 'static> ReceiptLookup for P {
    async fn transaction_receipt(&self, hash: TxHash) -> TransportResult<Option<Receipt>> {
        Ok(self.get_transaction_receipt(hash).await?.map(Receipt::from))
    }
}
