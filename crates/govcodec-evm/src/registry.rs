//! Selector → function signature lookup table.
//!
//! Registries are built from small curated signature sets. Two different
//! signatures sharing a selector is a configuration bug, so construction
//! fails rather than leaving the ambiguity to lookup time.

use alloy_core::dyn_abi::DynSolValue;
use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, Bytes, U256};
use govcodec_core::{
    error::{DecodeError, RegistryError},
    selector::Selector,
    types::NormalizedValue,
};
use std::collections::HashMap;

use crate::codec;
use crate::normalizer;
use crate::signature::FunctionSignature;

/// Immutable selector table.
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    by_selector: HashMap<Selector, FunctionSignature>,
}

impl SignatureRegistry {
    /// Build from human-readable declarations, e.g. `["perform()"]`.
    pub fn new<I, S>(declarations: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let signatures = declarations
            .into_iter()
            .map(|d| FunctionSignature::parse(d.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_signatures(signatures)
    }

    /// Build from a standard Ethereum JSON ABI; non-function items are ignored.
    pub fn from_abi_json(abi_json: &str) -> Result<Self, RegistryError> {
        let abi: JsonAbi =
            serde_json::from_str(abi_json).map_err(|e| RegistryError::InvalidAbi(e.to_string()))?;
        let signatures = abi
            .functions()
            .map(FunctionSignature::from_function)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_signatures(signatures)
    }

    pub fn from_signatures(
        signatures: impl IntoIterator<Item = FunctionSignature>,
    ) -> Result<Self, RegistryError> {
        let mut by_selector: HashMap<Selector, FunctionSignature> = HashMap::new();
        for sig in signatures {
            match by_selector.get(&sig.selector()) {
                // the same declaration listed twice is harmless
                Some(existing) if existing.signature() == sig.signature() => {}
                Some(existing) => {
                    return Err(RegistryError::SelectorCollision {
                        selector: sig.selector(),
                        first: existing.signature().to_string(),
                        second: sig.signature().to_string(),
                    })
                }
                None => {
                    by_selector.insert(sig.selector(), sig);
                }
            }
        }
        Ok(Self { by_selector })
    }

    pub fn get(&self, selector: Selector) -> Option<&FunctionSignature> {
        self.by_selector.get(&selector)
    }

    /// Signature matching the leading 4 bytes of `calldata`.
    pub fn match_calldata(&self, calldata: &[u8]) -> Result<&FunctionSignature, DecodeError> {
        let selector = Selector::from_calldata(calldata).ok_or_else(|| {
            DecodeError::fault(format!(
                "calldata too short: {} bytes (need at least 4 for selector)",
                calldata.len()
            ))
        })?;
        self.get(selector)
            .ok_or(DecodeError::SelectorNotFound { selector })
    }

    /// Match the selector, then decode the parameters against it.
    pub fn decode<'a>(&'a self, calldata: &[u8]) -> Result<DecodedCall<'a>, DecodeError> {
        let function = self.match_calldata(calldata)?;
        let values = codec::decode_params(&calldata[4..], function.inputs())?;
        Ok(DecodedCall { function, values })
    }

    /// All signatures, ordered by selector.
    pub fn signatures(&self) -> Vec<&FunctionSignature> {
        let mut sigs: Vec<_> = self.by_selector.values().collect();
        sigs.sort_by_key(|s| s.selector());
        sigs
    }

    pub fn len(&self) -> usize {
        self.by_selector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_selector.is_empty()
    }
}

/// Calldata matched against a [`FunctionSignature`].
///
/// `values` has exactly one entry per declared parameter, each of the
/// declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall<'a> {
    function: &'a FunctionSignature,
    values: Vec<DynSolValue>,
}

impl<'a> DecodedCall<'a> {
    pub fn function(&self) -> &'a FunctionSignature {
        self.function
    }

    pub fn values(&self) -> &[DynSolValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<DynSolValue> {
        self.values
    }

    /// `(param name, value)` pairs ready for display.
    pub fn normalized(&self) -> Vec<(String, NormalizedValue)> {
        self.function
            .param_names()
            .iter()
            .cloned()
            .zip(self.values.iter().cloned().map(normalizer::normalize))
            .collect()
    }

    fn value(&self, index: usize) -> Result<&DynSolValue, DecodeError> {
        self.values.get(index).ok_or_else(|| {
            DecodeError::fault(format!(
                "{} has no parameter {index}",
                self.function.signature()
            ))
        })
    }

    fn mismatch(&self, index: usize, expected: &str) -> DecodeError {
        DecodeError::fault(format!(
            "{} parameter {index} is not {expected}",
            self.function.signature()
        ))
    }

    pub fn address(&self, index: usize) -> Result<Address, DecodeError> {
        match self.value(index)? {
            DynSolValue::Address(a) => Ok(*a),
            _ => Err(self.mismatch(index, "an address")),
        }
    }

    pub fn bytes(&self, index: usize) -> Result<Bytes, DecodeError> {
        match self.value(index)? {
            DynSolValue::Bytes(b) => Ok(Bytes::copy_from_slice(b)),
            _ => Err(self.mismatch(index, "bytes")),
        }
    }

    pub fn uint(&self, index: usize) -> Result<U256, DecodeError> {
        match self.value(index)? {
            DynSolValue::Uint(u, _) => Ok(*u),
            _ => Err(self.mismatch(index, "a uint")),
        }
    }

    pub fn address_array(&self, index: usize) -> Result<Vec<Address>, DecodeError> {
        match self.value(index)? {
            DynSolValue::Array(items) => items
                .iter()
                .map(|item| match item {
                    DynSolValue::Address(a) => Ok(*a),
                    _ => Err(self.mismatch(index, "an address[]")),
                })
                .collect(),
            _ => Err(self.mismatch(index, "an address[]")),
        }
    }

    pub fn bytes_array(&self, index: usize) -> Result<Vec<Bytes>, DecodeError> {
        match self.value(index)? {
            DynSolValue::Array(items) => items
                .iter()
                .map(|item| match item {
                    DynSolValue::Bytes(b) => Ok(Bytes::copy_from_slice(b)),
                    _ => Err(self.mismatch(index, "a bytes[]")),
                })
                .collect(),
            _ => Err(self.mismatch(index, "a bytes[]")),
        }
    }

    /// Length of an array parameter.
    pub fn array_len(&self, index: usize) -> Result<usize, DecodeError> {
        match self.value(index)? {
            DynSolValue::Array(items) => Ok(items.len()),
            _ => Err(self.mismatch(index, "an array")),
        }
    }
}
