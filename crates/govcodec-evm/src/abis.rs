//! Curated signature sets for the contracts the pipeline unwraps.
//!
//! Each set is the relevant part of the deployed contract's ABI. Entry
//! points the pipeline handles are exported as canonical-signature
//! constants; the remaining declarations exist so that a known-but-unhandled
//! method is reported by name.

use alloy_core::dyn_abi::DynSolType;
use govcodec_core::selector::Selector;

/// `L1ArbitrumTimelock.schedule`
pub const SCHEDULE: &str = "schedule(address,uint256,bytes,bytes32,bytes32,uint256)";
/// `L1ArbitrumTimelock.scheduleBatch`
pub const SCHEDULE_BATCH: &str = "scheduleBatch(address[],uint256[],bytes[],bytes32,bytes32,uint256)";

/// `UpgradeExecutor.execute`: delegate call into an action contract.
pub const EXECUTE: &str = "execute(address,bytes)";
/// `UpgradeExecutor.executeCall`: plain call to a target.
pub const EXECUTE_CALL: &str = "executeCall(address,bytes)";

/// `ArbSys.sendTxToL1`: L2 → L1 message carrying the timelock call.
pub const SEND_TX_TO_L1: &str = "sendTxToL1(address,bytes)";

/// The conventional zero-argument entry point of governance action contracts.
pub const PERFORM: &str = "perform()";
/// `0xb147f40c`
pub const PERFORM_SELECTOR: Selector = Selector::new([0xb1, 0x47, 0xf4, 0x0c]);

pub const TIMELOCK_SIGNATURES: &[&str] = &[
    "schedule(address target, uint256 value, bytes data, bytes32 predecessor, bytes32 salt, uint256 delay)",
    "scheduleBatch(address[] targets, uint256[] values, bytes[] payloads, bytes32 predecessor, bytes32 salt, uint256 delay)",
    "execute(address target, uint256 value, bytes payload, bytes32 predecessor, bytes32 salt)",
    "executeBatch(address[] targets, uint256[] values, bytes[] payloads, bytes32 predecessor, bytes32 salt)",
    "cancel(bytes32 id)",
    "updateDelay(uint256 newDelay)",
    "grantRole(bytes32 role, address account)",
    "revokeRole(bytes32 role, address account)",
];

pub const EXECUTOR_SIGNATURES: &[&str] = &[
    "execute(address upgrade, bytes upgradeCallData)",
    "executeCall(address target, bytes targetCallData)",
    "initialize(address admin, address[] executors)",
    "grantRole(bytes32 role, address account)",
    "revokeRole(bytes32 role, address account)",
];

pub const RELAY_SIGNATURES: &[&str] = &["sendTxToL1(address destination, bytes data)"];

/// Parameter list of the retryable-ticket envelope:
/// `(inbox, l2Target, l2Value, gasLimit, maxFeePerGas, l2Calldata)`.
pub fn retryable_envelope_types() -> Vec<DynSolType> {
    vec![
        DynSolType::Address,
        DynSolType::Address,
        DynSolType::Uint(256),
        DynSolType::Uint(256),
        DynSolType::Uint(256),
        DynSolType::Bytes,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SignatureRegistry;

    #[test]
    fn curated_sets_build_without_collisions() {
        assert_eq!(SignatureRegistry::new(TIMELOCK_SIGNATURES).unwrap().len(), TIMELOCK_SIGNATURES.len());
        assert_eq!(SignatureRegistry::new(EXECUTOR_SIGNATURES).unwrap().len(), EXECUTOR_SIGNATURES.len());
        assert_eq!(SignatureRegistry::new(RELAY_SIGNATURES).unwrap().len(), 1);
    }

    #[test]
    fn handled_entry_points_are_in_their_sets() {
        let timelock = SignatureRegistry::new(TIMELOCK_SIGNATURES).unwrap();
        assert!(timelock.get(Selector::of(SCHEDULE)).is_some());
        assert!(timelock.get(Selector::of(SCHEDULE_BATCH)).is_some());

        let executor = SignatureRegistry::new(EXECUTOR_SIGNATURES).unwrap();
        assert!(executor.get(Selector::of(EXECUTE)).is_some());
        assert!(executor.get(Selector::of(EXECUTE_CALL)).is_some());

        let relay = SignatureRegistry::new(RELAY_SIGNATURES).unwrap();
        assert_eq!(relay.get(Selector::of(SEND_TX_TO_L1)).map(|s| s.signature()), Some(SEND_TX_TO_L1));
    }

    #[test]
    fn known_selector_values() {
        assert_eq!(Selector::of(SCHEDULE).to_hex(), "0x01d5062a");
        assert_eq!(Selector::of(SCHEDULE_BATCH).to_hex(), "0x8f2a0bb0");
        assert_eq!(Selector::of(EXECUTE).to_hex(), "0x1cff79cd");
        assert_eq!(Selector::of(EXECUTE_CALL).to_hex(), "0xbca8c7b5");
        assert_eq!(Selector::of(SEND_TX_TO_L1).to_hex(), "0x928c169a");
        assert_eq!(Selector::of(PERFORM), PERFORM_SELECTOR);
    }
}
