//! Target-address classification.
//!
//! The routing table is an exhaustive allow-list: every address the
//! timelock may legitimately target has exactly one role, and anything else
//! classifies as [`Route::Unrecognized`].

use alloy_primitives::Address;
use govcodec_core::{
    chain::ChainDescriptor, config::GovernanceConfig, error::DecodeError,
};
use std::collections::HashMap;
use std::fmt;

/// Semantic role of a routed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Upgrade executor on the home chain.
    UpgradeExecutor,
    /// Retryable-ticket router; the payload is an envelope for another chain.
    RetryableRouter,
    /// Delayed inbox of a satellite chain.
    Inbox { chain_id: u64 },
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::UpgradeExecutor => write!(f, "upgrade-executor"),
            Role::RetryableRouter => write!(f, "retryable-envelope"),
            Role::Inbox { chain_id } => write!(f, "inbox (chain {chain_id})"),
        }
    }
}

/// One row of the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingEntry {
    pub address: Address,
    pub role: Role,
}

/// How the pipeline must treat a timelock target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Executor call on the home chain.
    DirectExecutor { chain_id: u64 },
    /// Retryable-ticket envelope; destination chain comes from its inbox.
    RetryableEnvelope,
    /// Known inbox targeted directly rather than through the router.
    DirectInboxCall { inbox: Address, chain_id: u64 },
    Unrecognized { address: Address },
}

/// Read-only routing table derived from a [`GovernanceConfig`].
#[derive(Debug, Clone)]
pub struct RoutingTable {
    home_chain_id: u64,
    roles: HashMap<Address, Role>,
    chains: Vec<ChainDescriptor>,
}

impl RoutingTable {
    /// Only built from a config that passed [`GovernanceConfig::validate`],
    /// so every address maps to exactly one role.
    pub(crate) fn from_config(config: &GovernanceConfig) -> Self {
        let mut roles = HashMap::new();
        roles.insert(config.upgrade_executor, Role::UpgradeExecutor);
        roles.insert(config.retryable_router, Role::RetryableRouter);
        for chain in &config.chains {
            roles.insert(
                chain.inbox_address,
                Role::Inbox {
                    chain_id: chain.chain_id,
                },
            );
        }
        Self {
            home_chain_id: config.home_chain_id,
            roles,
            chains: config.chains.clone(),
        }
    }

    pub fn classify(&self, target: Address) -> Route {
        match self.roles.get(&target) {
            Some(Role::UpgradeExecutor) => Route::DirectExecutor {
                chain_id: self.home_chain_id,
            },
            Some(Role::RetryableRouter) => Route::RetryableEnvelope,
            Some(Role::Inbox { chain_id }) => Route::DirectInboxCall {
                inbox: target,
                chain_id: *chain_id,
            },
            None => Route::Unrecognized { address: target },
        }
    }

    /// Destination chain of an envelope, by its inbox address.
    pub fn chain_for_inbox(&self, inbox: Address) -> Result<&ChainDescriptor, DecodeError> {
        self.chains
            .iter()
            .find(|c| c.inbox_address == inbox)
            .ok_or(DecodeError::UnrecognizedInbox { inbox })
    }

    pub fn home_chain_id(&self) -> u64 {
        self.home_chain_id
    }

    pub fn chains(&self) -> &[ChainDescriptor] {
        &self.chains
    }

    /// Every routed address, executor and router first, then inboxes by chain id.
    pub fn entries(&self) -> Vec<RoutingEntry> {
        let mut entries: Vec<RoutingEntry> = self
            .roles
            .iter()
            .map(|(address, role)| RoutingEntry {
                address: *address,
                role: *role,
            })
            .collect();
        entries.sort_by_key(|e| match e.role {
            Role::UpgradeExecutor => (0, 0),
            Role::RetryableRouter => (1, 0),
            Role::Inbox { chain_id } => (2, chain_id),
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govcodec_core::chain::chains;

    fn table() -> (GovernanceConfig, RoutingTable) {
        let config = GovernanceConfig::arbitrum_mainnet();
        let table = RoutingTable::from_config(&config);
        (config, table)
    }

    #[test]
    fn executor_routes_to_home_chain() {
        let (config, table) = table();
        assert_eq!(
            table.classify(config.upgrade_executor),
            Route::DirectExecutor { chain_id: 1 }
        );
    }

    #[test]
    fn router_routes_to_envelope() {
        let (config, table) = table();
        assert_eq!(table.classify(config.retryable_router), Route::RetryableEnvelope);
    }

    #[test]
    fn inbox_is_unsupported_direct_call() {
        let (_, table) = table();
        let nova = chains::arbitrum_nova();
        assert_eq!(
            table.classify(nova.inbox_address),
            Route::DirectInboxCall {
                inbox: nova.inbox_address,
                chain_id: 42170
            }
        );
    }

    #[test]
    fn anything_else_is_unrecognized() {
        let (_, table) = table();
        // a satellite executor is only reachable through an envelope
        let l2_executor = chains::arbitrum_one().upgrade_executor_address;
        assert_eq!(
            table.classify(l2_executor),
            Route::Unrecognized { address: l2_executor }
        );
    }

    #[test]
    fn inbox_lookup() {
        let (_, table) = table();
        let one = chains::arbitrum_one();
        assert_eq!(table.chain_for_inbox(one.inbox_address).unwrap().chain_id, 42161);
        assert!(matches!(
            table.chain_for_inbox(Address::repeat_byte(0x42)),
            Err(DecodeError::UnrecognizedInbox { .. })
        ));
    }

    #[test]
    fn entries_cover_every_role() {
        let (_, table) = table();
        let entries = table.entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].role, Role::UpgradeExecutor);
        assert_eq!(entries[1].role, Role::RetryableRouter);
        assert_eq!(entries[2].role, Role::Inbox { chain_id: 42161 });
        assert_eq!(entries[3].role, Role::Inbox { chain_id: 42170 });
    }
}
