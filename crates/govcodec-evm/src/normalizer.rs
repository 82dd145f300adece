//! `DynSolValue` → [`NormalizedValue`].

use alloy_core::dyn_abi::DynSolValue;
use alloy_primitives::Bytes;
use govcodec_core::types::NormalizedValue;

pub fn normalize(value: DynSolValue) -> NormalizedValue {
    match value {
        DynSolValue::Bool(b) => NormalizedValue::Bool(b),
        DynSolValue::Int(i, _) => NormalizedValue::Number(i.to_string()),
        DynSolValue::Uint(u, _) => NormalizedValue::Number(u.to_string()),
        DynSolValue::Address(a) => NormalizedValue::Address(a),
        // only the declared width is meaningful, the word is right-padded
        DynSolValue::FixedBytes(word, size) => {
            NormalizedValue::Bytes(Bytes::copy_from_slice(&word[..size]))
        }
        DynSolValue::Bytes(b) => NormalizedValue::Bytes(b.into()),
        DynSolValue::Function(f) => NormalizedValue::Bytes(Bytes::copy_from_slice(f.as_slice())),
        DynSolValue::String(s) => NormalizedValue::Text(s),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) | DynSolValue::Tuple(items) => {
            NormalizedValue::List(items.into_iter().map(normalize).collect())
        }
        #[allow(unreachable_patterns)]
        other => NormalizedValue::Text(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, I256, U256};

    #[test]
    fn integers_of_any_width_are_decimal() {
        assert_eq!(
            normalize(DynSolValue::Uint(U256::from(86_400u64), 256)),
            NormalizedValue::Number("86400".into())
        );
        assert_eq!(
            normalize(DynSolValue::Uint(U256::MAX, 256)).as_number(),
            Some(U256::MAX.to_string().as_str())
        );
        assert_eq!(
            normalize(DynSolValue::Int(I256::MINUS_ONE, 256)),
            NormalizedValue::Number("-1".into())
        );
    }

    #[test]
    fn fixed_bytes_keep_declared_width() {
        let v = normalize(DynSolValue::FixedBytes(B256::repeat_byte(0x01), 4));
        assert_eq!(v, NormalizedValue::Bytes(Bytes::from(vec![0x01; 4])));
    }

    #[test]
    fn batch_arrays_become_lists() {
        let v = normalize(DynSolValue::Array(vec![
            DynSolValue::Address(Address::repeat_byte(0x11)),
            DynSolValue::Address(Address::repeat_byte(0x22)),
        ]));
        match v {
            NormalizedValue::List(items) => {
                assert_eq!(items[1].as_address(), Some(Address::repeat_byte(0x22)));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }
}
