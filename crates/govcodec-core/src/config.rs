//! Static routing configuration.
//!
//! The configuration names the three kinds of addresses the pipeline routes
//! on: the home-chain upgrade executor, the retryable-ticket router, and one
//! inbox per satellite chain. It is installed once per process and read-only
//! afterwards.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use crate::chain::{chains, ChainDescriptor, HOME_CHAIN_ID};
use crate::error::ConfigError;

static GLOBAL: OnceLock<GovernanceConfig> = OnceLock::new();

/// Addresses and chains the governance pipeline knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceConfig {
    #[serde(default = "default_home_chain_id")]
    pub home_chain_id: u64,
    /// Upgrade executor on the home chain.
    pub upgrade_executor: Address,
    /// Magic target the timelock treats as "send a retryable ticket".
    pub retryable_router: Address,
    /// Timelock that relay-wrapped proposals are addressed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1_timelock: Option<Address>,
    #[serde(default)]
    pub chains: Vec<ChainDescriptor>,
}

fn default_home_chain_id() -> u64 {
    HOME_CHAIN_ID
}

impl GovernanceConfig {
    /// The Arbitrum DAO's mainnet deployment.
    pub fn arbitrum_mainnet() -> Self {
        Self {
            home_chain_id: HOME_CHAIN_ID,
            upgrade_executor: address!("3ffFbAdAF827559da092217e474760E2b2c3CeDd"),
            retryable_router: address!("a723C008e76E379c55599D2E4d93879BeaFDa79C"),
            l1_timelock: Some(address!("E6841D92B0C345144506576eC13ECf5103aC7f49")),
            chains: vec![chains::arbitrum_one(), chains::arbitrum_nova()],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match extension.as_str() {
            "json" => Self::from_json_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => Err(ConfigError::UnsupportedFormat { extension }),
        }
    }

    /// Reject configurations that would make classification ambiguous.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid { reason });

        if self.upgrade_executor.is_zero() {
            return invalid("upgradeExecutor is the zero address".into());
        }
        if self.retryable_router.is_zero() {
            return invalid("retryableRouter is the zero address".into());
        }

        let mut roles: HashSet<Address> = HashSet::new();
        roles.insert(self.upgrade_executor);
        if !roles.insert(self.retryable_router) {
            return invalid(format!(
                "{} is both upgrade executor and retryable router",
                self.retryable_router
            ));
        }

        let mut chain_ids = HashSet::new();
        for chain in &self.chains {
            if chain.inbox_address.is_zero() {
                return invalid(format!("{chain} has a zero inbox address"));
            }
            if chain.upgrade_executor_address.is_zero() {
                return invalid(format!("{chain} has a zero upgrade executor address"));
            }
            if !chain_ids.insert(chain.chain_id) {
                return invalid(format!("chain id {} listed twice", chain.chain_id));
            }
            if !roles.insert(chain.inbox_address) {
                return invalid(format!(
                    "inbox {} of {chain} is already used by another route",
                    chain.inbox_address
                ));
            }
        }
        Ok(())
    }

    /// Descriptor whose inbox is `inbox`.
    pub fn chain_by_inbox(&self, inbox: Address) -> Option<&ChainDescriptor> {
        self.chains.iter().find(|c| c.inbox_address == inbox)
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self::arbitrum_mainnet()
    }
}

/// Install the process-wide configuration. Must happen before the first
/// call to [`global`]; a second install fails.
pub fn install(config: GovernanceConfig) -> Result<(), ConfigError> {
    config.validate()?;
    GLOBAL.set(config).map_err(|_| ConfigError::AlreadyInstalled)
}

/// The installed configuration, or the mainnet defaults if none was installed.
pub fn global() -> &'static GovernanceConfig {
    GLOBAL.get_or_init(GovernanceConfig::arbitrum_mainnet)
}
