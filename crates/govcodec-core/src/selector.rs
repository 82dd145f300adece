//! 4-byte function selectors.
//!
//! `selector = keccak256("name(type1,type2,...)")[:4]`

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tiny_keccak::{Hasher, Keccak};

use crate::error::DecodeError;

/// First four bytes of the keccak-256 hash of a canonical signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector([u8; 4]);

impl Selector {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Hash a canonical signature string, e.g. `"perform()"`.
    pub fn of(signature: &str) -> Self {
        let mut hasher = Keccak::v256();
        let mut output = [0u8; 32];
        hasher.update(signature.as_bytes());
        hasher.finalize(&mut output);
        Self([output[0], output[1], output[2], output[3]])
    }

    /// Leading four bytes of calldata, or `None` if it is shorter than that.
    pub fn from_calldata(calldata: &[u8]) -> Option<Self> {
        let head: [u8; 4] = calldata.get(..4)?.try_into().ok()?;
        Some(Self(head))
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// `"0xaabbccdd"`
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 4]> for Selector {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Selector {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| DecodeError::InvalidHex {
            reason: format!("selector '{s}': {e}"),
        })?;
        let bytes: [u8; 4] = bytes.try_into().map_err(|b: Vec<u8>| DecodeError::InvalidHex {
            reason: format!("selector '{s}' is {} bytes, expected 4", b.len()),
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perform_selector() {
        assert_eq!(Selector::of("perform()").to_hex(), "0xb147f40c");
    }

    #[test]
    fn erc20_transfer_selector() {
        assert_eq!(Selector::of("transfer(address,uint256)").to_hex(), "0xa9059cbb");
    }

    #[test]
    fn from_calldata_needs_four_bytes() {
        assert!(Selector::from_calldata(&[0x01, 0x02, 0x03]).is_none());
        let sel = Selector::from_calldata(&[0xb1, 0x47, 0xf4, 0x0c, 0xff]).unwrap();
        assert_eq!(sel, Selector::new([0xb1, 0x47, 0xf4, 0x0c]));
    }

    #[test]
    fn parse_and_serde() {
        let sel: Selector = "0x1cff79cd".parse().unwrap();
        assert_eq!(sel, Selector::of("execute(address,bytes)"));
        assert!("0x1cff79".parse::<Selector>().is_err());
        assert!("zzzzzzzz".parse::<Selector>().is_err());

        let json = serde_json::to_string(&sel).unwrap();
        assert_eq!(json, "\"0x1cff79cd\"");
        let back: Selector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sel);
    }
}
