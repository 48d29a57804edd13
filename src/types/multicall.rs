//! Multicall contract interface for batching multiple calls.

use alloy::sol;

sol! {
    /// On-chain aggregator executing many read calls in one request.
    #[sol(rpc)]
    interface IMulticall {
        /// A single call in an aggregate batch.
        struct Call {
            /// Target contract address.
            address target;
            /// Encoded function call data.
            bytes callData;
        }

        /// Result of a single call in `tryAggregate`.
        struct Result {
            /// Whether the call was successful.
            bool success;
            /// The return data from the call.
            bytes returnData;
        }

        /// Executes all calls, reverting the whole batch if any call reverts.
        function aggregate(Call[] calldata calls)
            external
            payable
            returns (uint256 blockNumber, bytes[] memory returnData);

        /// Executes all calls, returning a per-call (success, data) pair.
        ///
        /// When `requireSuccess` is true the batch reverts on the first
        /// failing call, matching `aggregate`.
        function tryAggregate(bool requireSuccess, Call[] calldata calls)
            external
            payable
            returns (Result[] memory returnData);
    }
}
