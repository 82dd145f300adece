//! Argument values in a form fit for rendering.
//!
//! Governance calls carry few kinds of data: addresses, amounts, opaque
//! payloads and the occasional array. [`NormalizedValue`] keeps exactly
//! those distinctions and nothing ABI-specific, so renderers and JSON
//! consumers do not depend on alloy's dynamic value type.

use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum NormalizedValue {
    /// Integer of any width or sign, in decimal.
    Number(String),
    Bool(bool),
    Address(Address),
    /// `bytes`, `bytesN` and function pointers.
    Bytes(Bytes),
    Text(String),
    /// Arrays and tuples, positionally.
    List(Vec<NormalizedValue>),
}

impl NormalizedValue {
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(a) => Some(*a),
            _ => None,
        }
    }

    /// Decimal digits of a numeric value.
    pub fn as_number(&self) -> Option<&str> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) | Self::Text(n) => f.write_str(n),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Address(a) => f.write_str(&a.to_checksum(None)),
            Self::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}
