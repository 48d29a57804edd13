//! Batching of independent contract reads into a single aggregate request.
//!
//! Bundling N read calls into one request to the aggregator contract amortizes
//! the network round-trip across the whole batch. Best-effort mode exists
//! because in practice a subset of calls routinely fails (querying a pair that
//! does not exist yet) and the caller wants partial data rather than losing
//! the whole batch.

use crate::{
    constants::MULTICALL_ADDRESS,
    error::MulticallError,
    types::{Call, CallOutcome, ContractInterface, IMulticall},
};
use alloy::{
    dyn_abi::{DynSolValue, FunctionExt},
    primitives::{Address, Bytes},
    providers::Provider,
};
use tracing::{debug, instrument, warn};

/// Batches heterogeneous contract calls into one aggregate request.
///
/// Holds no state between invocations; each call to [`aggregate`] or
/// [`try_aggregate`] is a self-contained request/response unit.
///
/// [`aggregate`]: Self::aggregate
/// [`try_aggregate`]: Self::try_aggregate
#[derive(Debug)]
pub struct CallBatcher<P> {
    provider: P,
    address: Address,
}

impl<P> CallBatcher<P> {
    /// Creates a new batcher pointed at the canonical aggregator deployment.
    pub fn new(provider: P) -> Self {
        Self { provider, address: MULTICALL_ADDRESS }
    }

    /// Creates a new batcher with a custom aggregator address.
    pub fn with_address(provider: P, address: Address) -> Self {
        Self { provider, address }
    }
}

impl<P: Provider> CallBatcher<P> {
    /// Executes `calls` in one aggregate request, strict mode.
    ///
    /// The whole batch either fully succeeds, returning one decoded value list
    /// per call index-aligned with the input, or fully fails: a transport
    /// error, a single reverting sub-call (the aggregator reverts the batch),
    /// or a decode mismatch all surface as a batch-level error with no
    /// partial results.
    ///
    /// An empty call list returns an empty result list without touching the
    /// network.
    #[instrument(skip_all, fields(calls = calls.len()))]
    pub async fn aggregate(
        &self,
        interface: &ContractInterface,
        calls: &[Call],
    ) -> Result<Vec<Vec<DynSolValue>>, MulticallError> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }

        let calldata = encode_calls(interface, calls)?;
        debug!(count = calldata.len(), "submitting aggregate batch");

        let response = IMulticall::new(self.address, &self.provider)
            .aggregate(calldata)
            .call()
            .await?;

        decode_return_data(interface, calls, response.returnData)
    }

    /// Executes `calls` in one aggregate request, best-effort mode.
    ///
    /// With `require_success` set this behaves like [`aggregate`]: any failing
    /// sub-call aborts the batch. Without it, a failing sub-call yields
    /// [`CallOutcome::Failed`] at its position while every other position
    /// still decodes normally; only a failure of the transport itself aborts
    /// the whole call.
    ///
    /// [`aggregate`]: Self::aggregate
    #[instrument(skip_all, fields(calls = calls.len(), require_success))]
    pub async fn try_aggregate(
        &self,
        interface: &ContractInterface,
        calls: &[Call],
        require_success: bool,
    ) -> Result<Vec<CallOutcome>, MulticallError> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }

        let calldata = encode_calls(interface, calls)?;
        debug!(count = calldata.len(), "submitting try-aggregate batch");

        let results = IMulticall::new(self.address, &self.provider)
            .tryAggregate(require_success, calldata)
            .call()
            .await?;

        decode_try_results(interface, calls, results, require_success)
    }
}

/// Encodes each planned call into the aggregator's call struct.
fn encode_calls(
    interface: &ContractInterface,
    calls: &[Call],
) -> Result<Vec<IMulticall::Call>, MulticallError> {
    calls
        .iter()
        .map(|call| {
            Ok(IMulticall::Call { target: call.target, callData: call.encode(interface)? })
        })
        .collect()
}

/// Decodes strict-mode return data, one blob per call.
fn decode_return_data(
    interface: &ContractInterface,
    calls: &[Call],
    return_data: Vec<Bytes>,
) -> Result<Vec<Vec<DynSolValue>>, MulticallError> {
    if return_data.len() != calls.len() {
        return Err(MulticallError::UnexpectedResultCount {
            expected: calls.len(),
            actual: return_data.len(),
        });
    }

    calls
        .iter()
        .zip(return_data)
        .map(|(call, data)| {
            let function = interface.function(&call.function)?;
            Ok(function.abi_decode_output(&data)?)
        })
        .collect()
}

/// Decodes best-effort results into positionally aligned outcomes.
///
/// With `require_success` a failing slot is promoted to a batch-level error;
/// otherwise it becomes [`CallOutcome::Failed`] and a decode mismatch on one
/// slot degrades that slot alone instead of aborting the rest.
fn decode_try_results(
    interface: &ContractInterface,
    calls: &[Call],
    results: Vec<IMulticall::Result>,
    require_success: bool,
) -> Result<Vec<CallOutcome>, MulticallError> {
    if results.len() != calls.len() {
        return Err(MulticallError::UnexpectedResultCount {
            expected: calls.len(),
            actual: results.len(),
        });
    }

    calls
        .iter()
        .enumerate()
        .zip(results)
        .map(|((index, call), result)| {
            if !result.success {
                if require_success {
                    return Err(MulticallError::CallFailed { index });
                }
                return Ok(CallOutcome::Failed);
            }

            let function = interface.function(&call.function)?;
            if result.returnData.is_empty() && !function.outputs.is_empty() {
                return Ok(CallOutcome::Empty);
            }

            match function.abi_decode_output(&result.returnData) {
                Ok(values) => Ok(CallOutcome::Decoded(values)),
                Err(err) if !require_success => {
                    warn!(index, function = %call.function, %err, "failed to decode sub-call result");
                    Ok(CallOutcome::Failed)
                }
                Err(err) => Err(err.into()),
            }
        })
        .collect()
}
