//! Contract interfaces in the JSON ABI shape and calldata encoding, on top of
//! the alloy ABI crates.

use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use thiserror::Error;

use crate::domain::Address;

pub use alloy_json_abi::{Function as FunctionDescriptor, Param as AbiParam, StateMutability};

/// A call argument. Dynamic values are checked against the descriptor's
/// input types when encoding.
pub type AbiValue = DynSolValue;

pub fn address_value(address: &Address) -> AbiValue {
    DynSolValue::Address(address.to_alloy())
}

pub fn param(name: &str, ty: &str) -> AbiParam {
    AbiParam {
        ty: ty.to_string(),
        name: name.to_string(),
        components: Vec::new(),
        internal_type: None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("function '{0}' is not part of the contract interface")]
    UnknownFunction(String),
    #[error("cannot encode arguments for {function}: {reason}")]
    Encode { function: String, reason: String },
}

/// Finds `function_name` in a contract interface.
pub fn find_function<'a>(
    interface: &'a [FunctionDescriptor],
    function_name: &str,
) -> Result<&'a FunctionDescriptor, AbiError> {
    interface
        .iter()
        .find(|function| function.name == function_name)
        .ok_or_else(|| AbiError::UnknownFunction(function_name.to_string()))
}

/// Selector followed by the ABI-encoded arguments.
pub fn encode_call(function: &FunctionDescriptor, args: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    function
        .abi_encode_input(args)
        .map_err(|err| AbiError::Encode {
            function: function.signature(),
            reason: err.to_string(),
        })
}
