//! Chain descriptors for the DAO's satellite chains.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ethereum mainnet, where the L1 timelock and home upgrade executor live.
pub const HOME_CHAIN_ID: u64 = 1;

/// A chain reachable through a retryable-ticket envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    /// Human-readable slug, e.g. "arbitrum-one"
    #[serde(default)]
    pub name: String,
    pub chain_id: u64,
    /// Delayed inbox on L1 that identifies the destination chain.
    pub inbox_address: Address,
    /// Upgrade executor deployed on the destination chain.
    pub upgrade_executor_address: Address,
}

impl ChainDescriptor {
    pub fn new(
        name: impl Into<String>,
        chain_id: u64,
        inbox_address: Address,
        upgrade_executor_address: Address,
    ) -> Self {
        Self {
            name: name.into(),
            chain_id,
            inbox_address,
            upgrade_executor_address,
        }
    }
}

impl fmt::Display for ChainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "chain {}", self.chain_id)
        } else {
            write!(f, "{} ({})", self.name, self.chain_id)
        }
    }
}

/// Well-known satellite chains.
pub mod chains {
    use super::*;

    pub fn arbitrum_one() -> ChainDescriptor {
        ChainDescriptor::new(
            "arbitrum-one",
            42161,
            address!("4Dbd4fc535Ac27206064B68FfCf827b0A60BAB3f"),
            address!("CF57572261c7c2BCF21ffD220ea7d1a27D40A827"),
        )
    }

    pub fn arbitrum_nova() -> ChainDescriptor {
        ChainDescriptor::new(
            "arbitrum-nova",
            42170,
            address!("c4448b71118c9071Bcb9734A0EAc55D18A153949"),
            address!("86a02dD71363c440b21F4c0E5B2Ad01Ffe1A7482"),
        )
    }
}
