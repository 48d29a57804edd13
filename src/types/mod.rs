//! Core types for batched calls and tracked transactions.

mod call;
pub use call::{Call, CallOutcome, ContractInterface};

mod multicall;
pub use multicall::IMulticall;

mod receipt;
pub use receipt::Receipt;
