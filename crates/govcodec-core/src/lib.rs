//! # govcodec-core
//!
//! Shared types for GovCodec: the [`Action`] output model, the decode error
//! taxonomy, 4-byte selectors, chain descriptors and the static routing
//! configuration. The decoder itself lives in `govcodec-evm`.

pub mod action;
pub mod chain;
pub mod config;
pub mod error;
pub mod resolver;
pub mod selector;
pub mod types;

pub use action::{Action, ActionType};
pub use chain::{chains, ChainDescriptor, HOME_CHAIN_ID};
pub use config::GovernanceConfig;
pub use error::{BuildError, ConfigError, DecodeError, ErrorKind, RegistryError, ResolverError};
pub use resolver::{SignatureResolver, StaticResolver};
pub use selector::Selector;
pub use types::NormalizedValue;
