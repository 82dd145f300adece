//! ABI codec: head/tail encoding of parameter lists.
//!
//! Static values are laid out inline; dynamic values (`bytes`, `string`,
//! `T[]`) are referenced by a 32-byte offset relative to the start of the
//! parameter block. Decoding never returns partial data: a truncated
//! buffer, a bad offset, a value that does not match its declared type, or
//! a block that is not the canonical encoding of what it decodes to (dirty
//! padding in an `address`/`bool`/`uintN` word, for example) is a
//! `DecodeFault`. Bytes past the end of the canonical block are ignored.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use govcodec_core::{error::DecodeError, selector::Selector};

/// Decode a parameter block (no selector) against `types`.
pub fn decode_params(data: &[u8], types: &[DynSolType]) -> Result<Vec<DynSolValue>, DecodeError> {
    if types.is_empty() {
        return Ok(vec![]);
    }

    let decoded = DynSolType::Tuple(types.to_vec())
        .abi_decode_params(data)
        .map_err(|e| DecodeError::fault(format!("parameter decode: {e}")))?;

    let values = match decoded {
        DynSolValue::Tuple(vals) => vals,
        other => vec![other],
    };

    if values.len() != types.len() {
        return Err(DecodeError::fault(format!(
            "expected {} values, decoded {}",
            types.len(),
            values.len()
        )));
    }
    for (i, (ty, val)) in types.iter().zip(&values).enumerate() {
        if !ty.matches(val) {
            return Err(DecodeError::fault(format!(
                "param {i}: value does not match {}",
                ty.sol_type_name()
            )));
        }
    }

    // alloy's params decoder truncates static words without checking their
    // padding; re-encoding exposes any bits it dropped.
    let canonical = DynSolValue::Tuple(values.clone()).abi_encode_params();
    if !data.starts_with(&canonical) {
        return Err(DecodeError::fault(
            "parameter block is not canonically encoded",
        ));
    }
    Ok(values)
}

/// Encode `values` as a parameter block, checking them against `types`.
pub fn encode_params(values: &[DynSolValue], types: &[DynSolType]) -> Result<Vec<u8>, DecodeError> {
    if values.len() != types.len() {
        return Err(DecodeError::fault(format!(
            "argument count mismatch: expected {}, got {}",
            types.len(),
            values.len()
        )));
    }
    for (i, (ty, val)) in types.iter().zip(values).enumerate() {
        if !ty.matches(val) {
            return Err(DecodeError::fault(format!(
                "param {i}: value does not match {}",
                ty.sol_type_name()
            )));
        }
    }
    if values.is_empty() {
        return Ok(vec![]);
    }
    Ok(DynSolValue::Tuple(values.to_vec()).abi_encode_params())
}

/// `selector ++ encode_params(values)`
pub fn encode_call(
    selector: Selector,
    values: &[DynSolValue],
    types: &[DynSolType],
) -> Result<Vec<u8>, DecodeError> {
    let mut calldata = selector.as_bytes().to_vec();
    calldata.extend_from_slice(&encode_params(values, types)?);
    Ok(calldata)
}

/// Parse `0x`-prefixed (or bare) hex calldata, ignoring surrounding whitespace.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, DecodeError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits).map_err(|e| DecodeError::InvalidHex {
        reason: e.to_string(),
    })
}

/// Parse a list of Solidity type strings, e.g. `["address", "bytes[]"]`.
pub fn parse_types(type_strings: &[&str]) -> Result<Vec<DynSolType>, DecodeError> {
    type_strings
        .iter()
        .map(|ty| {
            ty.parse::<DynSolType>()
                .map_err(|e| DecodeError::fault(format!("type parse '{ty}': {e}")))
        })
        .collect()
}
