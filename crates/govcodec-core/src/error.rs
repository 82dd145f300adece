//! Error types for the GovCodec decode pipeline.
//!
//! Every decode failure is terminal: the pipeline never returns a partial
//! batch. Messages always name the offending selector or address.

use alloy_primitives::Address;
use thiserror::Error;

use crate::selector::Selector;

/// Errors that abort decoding of a governance payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("ABI decode failed: {reason}")]
    DecodeFault { reason: String },

    #[error("No known function signature for selector {selector}")]
    SelectorNotFound { selector: Selector },

    #[error("Unrecognized timelock method {name} ({selector})")]
    UnrecognizedTimelockMethod { selector: Selector, name: String },

    #[error("Unrecognized upgrade executor method {name} ({selector})")]
    UnrecognizedExecutorMethod { selector: Selector, name: String },

    #[error("Unrecognized target address {address}")]
    UnrecognizedTarget { address: Address },

    #[error("Unrecognized inbox address {inbox}")]
    UnrecognizedInbox { inbox: Address },

    #[error("Direct call to inbox {inbox} (chain {chain_id}) is not supported")]
    UnsupportedDirectInboxCall { inbox: Address, chain_id: u64 },

    #[error("Invalid hex input: {reason}")]
    InvalidHex { reason: String },
}

impl DecodeError {
    pub fn fault(reason: impl Into<String>) -> Self {
        DecodeError::DecodeFault {
            reason: reason.into(),
        }
    }

    /// Stable discriminant for matching without comparing messages.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::DecodeFault { .. } => ErrorKind::DecodeFault,
            DecodeError::SelectorNotFound { .. } => ErrorKind::SelectorNotFound,
            DecodeError::UnrecognizedTimelockMethod { .. } => ErrorKind::UnrecognizedTimelockMethod,
            DecodeError::UnrecognizedExecutorMethod { .. } => ErrorKind::UnrecognizedExecutorMethod,
            DecodeError::UnrecognizedTarget { .. } => ErrorKind::UnrecognizedTarget,
            DecodeError::UnrecognizedInbox { .. } => ErrorKind::UnrecognizedInbox,
            DecodeError::UnsupportedDirectInboxCall { .. } => ErrorKind::UnsupportedDirectInboxCall,
            DecodeError::InvalidHex { .. } => ErrorKind::InvalidHex,
        }
    }
}

/// Fieldless mirror of [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DecodeFault,
    SelectorNotFound,
    UnrecognizedTimelockMethod,
    UnrecognizedExecutorMethod,
    UnrecognizedTarget,
    UnrecognizedInbox,
    UnsupportedDirectInboxCall,
    InvalidHex,
}

/// Errors raised while building a signature registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Invalid function signature '{signature}': {reason}")]
    InvalidSignature { signature: String, reason: String },

    #[error("Selector collision on {selector}: '{first}' and '{second}'")]
    SelectorCollision {
        selector: Selector,
        first: String,
        second: String,
    },

    #[error("Invalid ABI JSON: {0}")]
    InvalidAbi(String),
}

/// Errors raised while loading or validating routing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported config format '{extension}' (expected json, yaml or yml)")]
    UnsupportedFormat { extension: String },

    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },

    #[error("Configuration already installed")]
    AlreadyInstalled,
}

/// Errors raised while building a decoder from a configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors from a signature resolver. Never surfaced as a decode failure.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Rate limited by {service}")]
    RateLimited { service: String },

    #[error("Resolver timed out after {ms}ms")]
    Timeout { ms: u64 },

    #[error("Invalid response from {service}: {reason}")]
    InvalidResponse { service: String, reason: String },

    #[error("Invalid resolver configuration: {reason}")]
    InvalidConfig { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let address: Address = "0x00000000000000000000000000000000DeaDBeef".parse().unwrap();
        let err = DecodeError::UnrecognizedTarget { address };
        assert!(err.to_string().contains(&address.to_string()));
        assert_eq!(err.kind(), ErrorKind::UnrecognizedTarget);

        let err = DecodeError::SelectorNotFound {
            selector: Selector::new([0xde, 0xad, 0xbe, 0xef]),
        };
        assert!(err.to_string().contains("0xdeadbeef"));
    }
}
