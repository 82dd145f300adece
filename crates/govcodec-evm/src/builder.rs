//! Calldata builders for the governance layers the pipeline unwraps.
//!
//! The inverse of the pipeline: useful for authoring proposals and for
//! fixtures. Every builder produces `selector ++ params` except
//! [`retryable_envelope`], which, like the on-chain router payload, has no
//! selector.

use alloy_core::dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, U256};
use govcodec_core::selector::Selector;

use crate::abis;

fn with_selector(signature: &str, params: Vec<DynSolValue>) -> Vec<u8> {
    let mut calldata = Selector::of(signature).as_bytes().to_vec();
    calldata.extend_from_slice(&DynSolValue::Tuple(params).abi_encode_params());
    calldata
}

fn uint(value: U256) -> DynSolValue {
    DynSolValue::Uint(value, 256)
}

fn word(value: B256) -> DynSolValue {
    DynSolValue::FixedBytes(value, 32)
}

/// `schedule(target, value, data, predecessor, salt, delay)`
pub fn schedule(
    target: Address,
    value: U256,
    data: &[u8],
    predecessor: B256,
    salt: B256,
    delay: U256,
) -> Vec<u8> {
    with_selector(
        abis::SCHEDULE,
        vec![
            DynSolValue::Address(target),
            uint(value),
            DynSolValue::Bytes(data.to_vec()),
            word(predecessor),
            word(salt),
            uint(delay),
        ],
    )
}

/// `scheduleBatch(targets, values, payloads, predecessor, salt, delay)`
pub fn schedule_batch(
    targets: &[Address],
    values: &[U256],
    payloads: &[Vec<u8>],
    predecessor: B256,
    salt: B256,
    delay: U256,
) -> Vec<u8> {
    with_selector(
        abis::SCHEDULE_BATCH,
        vec![
            DynSolValue::Array(targets.iter().copied().map(DynSolValue::Address).collect()),
            DynSolValue::Array(values.iter().copied().map(uint).collect()),
            DynSolValue::Array(payloads.iter().cloned().map(DynSolValue::Bytes).collect()),
            word(predecessor),
            word(salt),
            uint(delay),
        ],
    )
}

/// `execute(actionContract, actionCallData)`
pub fn execute(action_contract: Address, action_call_data: &[u8]) -> Vec<u8> {
    with_selector(
        abis::EXECUTE,
        vec![
            DynSolValue::Address(action_contract),
            DynSolValue::Bytes(action_call_data.to_vec()),
        ],
    )
}

/// `executeCall(target, targetCallData)`
pub fn execute_call(target: Address, target_call_data: &[u8]) -> Vec<u8> {
    with_selector(
        abis::EXECUTE_CALL,
        vec![
            DynSolValue::Address(target),
            DynSolValue::Bytes(target_call_data.to_vec()),
        ],
    )
}

/// `sendTxToL1(destination, data)`
pub fn send_tx_to_l1(destination: Address, data: &[u8]) -> Vec<u8> {
    with_selector(
        abis::SEND_TX_TO_L1,
        vec![
            DynSolValue::Address(destination),
            DynSolValue::Bytes(data.to_vec()),
        ],
    )
}

/// Retryable-ticket envelope; gas parameters are zero.
pub fn retryable_envelope(inbox: Address, l2_target: Address, l2_calldata: &[u8]) -> Vec<u8> {
    DynSolValue::Tuple(vec![
        DynSolValue::Address(inbox),
        DynSolValue::Address(l2_target),
        uint(U256::ZERO),
        uint(U256::ZERO),
        uint(U256::ZERO),
        DynSolValue::Bytes(l2_calldata.to_vec()),
    ])
    .abi_encode_params()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    #[test]
    fn execute_call_layout() {
        let calldata = execute_call(Address::repeat_byte(0xab), &[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(hex::encode(&calldata[..4]), "bca8c7b5");
        // selector + address + offset + length + one data word
        assert_eq!(calldata.len(), 4 + 4 * 32);
    }

    #[test]
    fn envelope_decodes_against_envelope_types() {
        let envelope = retryable_envelope(Address::repeat_byte(1), Address::repeat_byte(2), &[0xb1]);
        let values = codec::decode_params(&envelope, &abis::retryable_envelope_types()).unwrap();
        assert_eq!(values.len(), 6);
        assert_eq!(values[5], DynSolValue::Bytes(vec![0xb1]));
    }
}
