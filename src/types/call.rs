//! Planned contract calls and their decoded outcomes.

use crate::error::MulticallError;
use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::{Function, JsonAbi},
    primitives::{Address, Bytes},
};

/// Function interface description for a single contract.
///
/// Supplies enough of the contract's ABI to encode call parameters and decode
/// return values by function name. It is an explicit value passed alongside
/// each batch rather than ambient state, so two batches against the same
/// contract can carry different descriptions if they need to.
#[derive(Debug, Clone)]
pub struct ContractInterface {
    abi: JsonAbi,
}

impl ContractInterface {
    /// Creates an interface description from a parsed ABI.
    pub fn new(abi: JsonAbi) -> Self {
        Self { abi }
    }

    /// Creates an interface description from human-readable signatures, e.g.
    /// `"function balanceOf(address) view returns (uint256)"`.
    pub fn parse<'a, I: IntoIterator<Item = &'a str>>(
        signatures: I,
    ) -> Result<Self, MulticallError> {
        JsonAbi::parse(signatures)
            .map(Self::new)
            .map_err(|err| MulticallError::InvalidInterface(err.to_string()))
    }

    /// Resolves a function by name.
    ///
    /// A missing function is a caller error and fails fast.
    pub fn function(&self, name: &str) -> Result<&Function, MulticallError> {
        self.abi
            .function(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| MulticallError::UnknownFunction(name.to_string()))
    }
}

impl From<JsonAbi> for ContractInterface {
    fn from(abi: JsonAbi) -> Self {
        Self::new(abi)
    }
}

/// A single planned contract invocation.
///
/// Immutable once constructed; consumed by
/// [`CallBatcher`](crate::batcher::CallBatcher). The target is a typed
/// [`Address`], so casing of the textual form it was parsed from never
/// affects encoding.
#[derive(Debug, Clone)]
pub struct Call {
    /// Target contract address.
    pub target: Address,
    /// Function name on the target contract, e.g. `balanceOf`.
    pub function: String,
    /// Ordered function parameters.
    pub params: Vec<DynSolValue>,
}

impl Call {
    /// Creates a new [`Call`].
    pub fn new(
        target: Address,
        function: impl Into<String>,
        params: Vec<DynSolValue>,
    ) -> Self {
        Self { target, function: function.into(), params }
    }

    /// Encodes the call into selector-prefixed calldata.
    pub fn encode(&self, interface: &ContractInterface) -> Result<Bytes, MulticallError> {
        let function = interface.function(&self.function)?;
        Ok(function.abi_encode_input(&self.params)?.into())
    }
}

/// Positionally aligned outcome of a single call within a batch.
///
/// A failed call is distinguishable both from a call that decoded normally and
/// from one that legitimately returned no data.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// The call succeeded and its return data decoded into typed values.
    Decoded(Vec<DynSolValue>),
    /// The call succeeded but returned zero-length data where the function
    /// declares outputs.
    Empty,
    /// The call reverted.
    Failed,
}

impl CallOutcome {
    /// Returns the decoded values, if any.
    pub fn values(&self) -> Option<&[DynSolValue]> {
        match self {
            Self::Decoded(values) => Some(values),
            Self::Empty | Self::Failed => None,
        }
    }

    /// Whether the call reverted.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Whether the call succeeded with zero-length return data.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, U256};

    fn erc20() -> ContractInterface {
        ContractInterface::parse([
            "function balanceOf(address owner) view returns (uint256)",
            "function decimals() view returns (uint8)",
        ])
        .unwrap()
    }

    #[test]
    fn encode_prefixes_selector() {
        let interface = erc20();
        let owner = address!("00000000000000000000000000000000000000aa");
        let call = Call::new(
            address!("0000000000000000000000000000000000000001"),
            "balanceOf",
            vec![DynSolValue::Address(owner)],
        );

        let data = call.encode(&interface).unwrap();
        let selector = interface.function("balanceOf").unwrap().selector();
        assert_eq!(&data[..4], selector.as_slice());
        // 4-byte selector + one word
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(U256::try_from_be_slice(&data[4..]).unwrap(), U256::from_be_slice(owner.as_slice()));
    }

    #[test]
    fn unknown_function_fails_fast() {
        let interface = erc20();
        let call = Call::new(
            address!("0000000000000000000000000000000000000001"),
            "totalSupply",
            vec![],
        );

        let err = call.encode(&interface).unwrap_err();
        assert!(matches!(err, MulticallError::UnknownFunction(name) if name == "totalSupply"));
    }

    #[test]
    fn mismatched_params_are_an_abi_error() {
        let interface = erc20();
        let call = Call::new(
            address!("0000000000000000000000000000000000000001"),
            "balanceOf",
            vec![DynSolValue::Uint(U256::from(1), 256)],
        );

        assert!(matches!(call.encode(&interface), Err(MulticallError::Abi(_))));
    }
}
