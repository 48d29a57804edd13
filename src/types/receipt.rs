//! Confirmed transaction receipts.

use alloy::primitives::{Address, TxHash, B256};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of a transaction's on-chain outcome.
///
/// Once attached to a tracked transaction the transaction is terminal and is
/// excluded from all future receipt checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Hash of the block including the transaction.
    pub block_hash: B256,
    /// Number of the block including the transaction.
    pub block_number: u64,
    /// Address of the created contract, if the transaction was a deployment.
    pub contract_address: Option<Address>,
    /// Transaction sender.
    pub from: Address,
    /// Whether the transaction executed successfully.
    pub status: bool,
    /// Transaction recipient, if any.
    pub to: Option<Address>,
    /// Hash of the transaction.
    pub transaction_hash: TxHash,
    /// Index of the transaction within its block.
    pub transaction_index: u64,
}

impl From<alloy::rpc::types::TransactionReceipt> for Receipt {
    fn from(receipt: alloy::rpc::types::TransactionReceipt) -> Self {
        Self {
            block_hash: receipt.block_hash.unwrap_or_default(),
            block_number: receipt.block_number.unwrap_or_default(),
            contract_address: receipt.contract_address,
            from: receipt.from,
            status: receipt.status(),
            to: receipt.to,
            transaction_hash: receipt.transaction_hash,
            transaction_index: receipt.transaction_index.unwrap_or_default(),
        }
    }
}
