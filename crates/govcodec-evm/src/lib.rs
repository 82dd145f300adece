//! # govcodec-evm
//!
//! Layered ABI decoder for DAO governance proposals.
//!
//! ## Implementation notes
//! - Uses `alloy-core` dynamic ABI types for head/tail decoding of parameter lists
//! - Function selectors come from curated signature tables, never from the input
//! - Targets are routed through a table built from [`govcodec_core::GovernanceConfig`]
//! - Decoding is synchronous and allocation-light; [`enrich::enrich_actions`]
//!   is the only async step and is optional

pub mod abis;
pub mod batch;
pub mod builder;
pub mod classifier;
pub mod codec;
pub mod enrich;
pub mod normalizer;
pub mod pipeline;
pub mod registry;
pub mod signature;

pub use classifier::{Role, Route, RoutingEntry, RoutingTable};
pub use enrich::enrich_actions;
pub use pipeline::{Envelope, GovernanceDecoder, ScheduledCall};
pub use registry::{DecodedCall, SignatureRegistry};
pub use signature::FunctionSignature;
