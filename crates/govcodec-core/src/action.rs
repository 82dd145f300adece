//! The terminal output of the decode pipeline.
//!
//! An [`Action`] is one governance call as it will execute on its target
//! chain. Actions are produced only by the pipeline and never mutated; the
//! enrichment step builds a new value with [`Action::with_decoded_call_data`].

use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::selector::Selector;

/// How the upgrade executor invokes the action's address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    /// Plain call to a target contract.
    #[serde(rename = "CALL")]
    Call,
    /// Delegate call into an action contract.
    #[serde(rename = "DELEGATECALL")]
    DelegateCall,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Call => write!(f, "CALL"),
            ActionType::DelegateCall => write!(f, "DELEGATECALL"),
        }
    }
}

/// A decoded governance action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type")]
    action_type: ActionType,
    /// Call target for `CALL`, action contract for `DELEGATECALL`.
    address: Address,
    #[serde(rename = "chainID")]
    chain_id: u64,
    call_data: Bytes,
    /// Human-readable signature, when one is known.
    decoded_call_data: Option<String>,
}

impl Action {
    pub fn call(address: Address, chain_id: u64, call_data: impl Into<Bytes>) -> Self {
        Self {
            action_type: ActionType::Call,
            address,
            chain_id,
            call_data: call_data.into(),
            decoded_call_data: None,
        }
    }

    pub fn delegate_call(
        address: Address,
        chain_id: u64,
        call_data: impl Into<Bytes>,
        decoded_call_data: Option<String>,
    ) -> Self {
        Self {
            action_type: ActionType::DelegateCall,
            address,
            chain_id,
            call_data: call_data.into(),
            decoded_call_data,
        }
    }

    /// Copy of this action carrying a human-readable signature.
    pub fn with_decoded_call_data(self, decoded: impl Into<String>) -> Self {
        Self {
            decoded_call_data: Some(decoded.into()),
            ..self
        }
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn call_data(&self) -> &Bytes {
        &self.call_data
    }

    pub fn decoded_call_data(&self) -> Option<&str> {
        self.decoded_call_data.as_deref()
    }

    /// Selector of the action's call data, if it has one.
    pub fn selector(&self) -> Option<Selector> {
        Selector::from_calldata(&self.call_data)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (chain {}) data=0x{}",
            self.action_type,
            self.address,
            self.chain_id,
            hex::encode(&self.call_data)
        )?;
        if let Some(decoded) = &self.decoded_call_data {
            write!(f, " [{decoded}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn action_type_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&ActionType::Call).unwrap(), "\"CALL\"");
        assert_eq!(
            serde_json::to_string(&ActionType::DelegateCall).unwrap(),
            "\"DELEGATECALL\""
        );
    }

    #[test]
    fn action_json_field_names() {
        let action = Action::call(
            address!("000000000000000000000000000000000000abcd"),
            1,
            vec![0x12, 0x34, 0x56, 0x78],
        );
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "CALL");
        assert_eq!(json["chainID"], 1);
        assert_eq!(json["callData"], "0x12345678");
        assert!(json["decodedCallData"].is_null());

        let back: Action = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn with_decoded_call_data_keeps_other_fields() {
        let action = Action::call(Address::ZERO, 42161, vec![0xb1, 0x47, 0xf4, 0x0c]);
        let enriched = action.clone().with_decoded_call_data("perform()");
        assert_eq!(enriched.decoded_call_data(), Some("perform()"));
        assert_eq!(enriched.address(), action.address());
        assert_eq!(enriched.call_data(), action.call_data());
        assert_eq!(enriched.selector(), Some(Selector::of("perform()")));
    }
}
