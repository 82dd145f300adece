//! Multi-layer decode of governance proposal calldata.
//!
//! A proposal unwraps in a fixed number of steps, each one a plain function
//! call rather than open recursion:
//!
//! 1. relay: `sendTxToL1(timelock, data)` is peeled off when present
//! 2. timelock: `schedule` / `scheduleBatch` yield `(target, payload)` pairs
//! 3. routing: each target is classified against the routing table; the
//!    retryable router's payload is an envelope naming the destination inbox
//! 4. executor: `execute` / `executeCall` become the final [`Action`]
//!
//! Decoding is all-or-nothing: the first fault aborts the whole input.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, Bytes};
use govcodec_core::{
    action::Action,
    config::{self, GovernanceConfig},
    error::{BuildError, DecodeError},
    selector::Selector,
};
use std::borrow::Cow;
use tracing::{debug, trace};

use crate::abis;
use crate::classifier::{Route, RoutingTable};
use crate::codec;
use crate::registry::{DecodedCall, SignatureRegistry};

/// One sub-call queued by the timelock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledCall {
    pub target: Address,
    pub payload: Bytes,
}

/// Contents of a retryable-ticket envelope after its inbox was recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub inbox: Address,
    pub chain_id: u64,
    /// Contract the ticket executes on the destination chain.
    pub target: Address,
    pub payload: Bytes,
}

/// Stateless, thread-safe decoder for one routing configuration.
#[derive(Debug, Clone)]
pub struct GovernanceDecoder {
    routes: RoutingTable,
    l1_timelock: Option<Address>,
    relay: SignatureRegistry,
    timelock: SignatureRegistry,
    executor: SignatureRegistry,
    envelope: Vec<DynSolType>,
}

impl GovernanceDecoder {
    /// Build the signature tables and routing table for `config`.
    ///
    /// The config is validated first: an address that plays two routing
    /// roles would make classification ambiguous.
    pub fn new(config: &GovernanceConfig) -> Result<Self, BuildError> {
        config.validate()?;
        Ok(Self {
            routes: RoutingTable::from_config(config),
            l1_timelock: config.l1_timelock,
            relay: SignatureRegistry::new(abis::RELAY_SIGNATURES)?,
            timelock: SignatureRegistry::new(abis::TIMELOCK_SIGNATURES)?,
            executor: SignatureRegistry::new(abis::EXECUTOR_SIGNATURES)?,
            envelope: abis::retryable_envelope_types(),
        })
    }

    /// Decoder for the process-wide configuration.
    pub fn from_global_config() -> Result<Self, BuildError> {
        Self::new(config::global())
    }

    pub fn routes(&self) -> &RoutingTable {
        &self.routes
    }

    /// The signature tables, labelled by layer.
    pub fn registries(&self) -> [(&'static str, &SignatureRegistry); 3] {
        [
            ("relay", &self.relay),
            ("timelock", &self.timelock),
            ("upgrade-executor", &self.executor),
        ]
    }

    /// Decode hex calldata (optionally `0x`-prefixed).
    pub fn decode_hex(&self, input: &str) -> Result<Vec<Action>, DecodeError> {
        let calldata = codec::parse_hex(input)?;
        self.decode(&calldata)
    }

    /// Decode a relay-wrapped or bare timelock call into its actions, in
    /// scheduling order.
    pub fn decode(&self, calldata: &[u8]) -> Result<Vec<Action>, DecodeError> {
        let timelock_call = self.unwrap_relay(calldata)?;
        let scheduled = self.scheduled_calls(&timelock_call)?;
        trace!(count = scheduled.len(), "timelock layer decoded");
        scheduled
            .iter()
            .map(|call| self.decode_scheduled(call))
            .collect()
    }

    /// Strip a `sendTxToL1` wrapper, or pass the input through unchanged.
    pub fn unwrap_relay<'a>(&self, calldata: &'a [u8]) -> Result<Cow<'a, [u8]>, DecodeError> {
        let Some(selector) = Selector::from_calldata(calldata) else {
            return Ok(Cow::Borrowed(calldata));
        };
        if self.relay.get(selector).is_none() {
            return Ok(Cow::Borrowed(calldata));
        }

        let call = self.relay.decode(calldata)?;
        let destination = call.address(0)?;
        if self.l1_timelock.map_or(false, |timelock| timelock != destination) {
            debug!(%destination, "relay destination is not the configured L1 timelock");
        }
        trace!(%destination, "unwrapped relay layer");
        Ok(Cow::Owned(call.bytes(1)?.to_vec()))
    }

    /// The `(target, payload)` pairs a timelock call schedules.
    pub fn scheduled_calls(&self, calldata: &[u8]) -> Result<Vec<ScheduledCall>, DecodeError> {
        let function = match self.timelock.match_calldata(calldata) {
            Ok(function) => function,
            Err(DecodeError::SelectorNotFound { selector }) => {
                return Err(DecodeError::UnrecognizedTimelockMethod {
                    selector,
                    name: "unknown".into(),
                })
            }
            Err(e) => return Err(e),
        };

        match function.signature() {
            abis::SCHEDULE => {
                let call = self.timelock.decode(calldata)?;
                Ok(vec![ScheduledCall {
                    target: call.address(0)?,
                    payload: call.bytes(2)?,
                }])
            }
            abis::SCHEDULE_BATCH => {
                let call = self.timelock.decode(calldata)?;
                let targets = call.address_array(0)?;
                let value_count = call.array_len(1)?;
                let payloads = call.bytes_array(2)?;
                if targets.len() != payloads.len() || targets.len() != value_count {
                    return Err(DecodeError::fault(format!(
                        "scheduleBatch arrays differ in length: {} targets, {} values, {} payloads",
                        targets.len(),
                        value_count,
                        payloads.len()
                    )));
                }
                Ok(targets
                    .into_iter()
                    .zip(payloads)
                    .map(|(target, payload)| ScheduledCall { target, payload })
                    .collect())
            }
            _ => Err(DecodeError::UnrecognizedTimelockMethod {
                selector: function.selector(),
                name: function.name().to_string(),
            }),
        }
    }

    fn decode_scheduled(&self, call: &ScheduledCall) -> Result<Action, DecodeError> {
        let route = self.routes.classify(call.target);
        trace!(to = %call.target, ?route, "classified timelock target");
        match route {
            Route::DirectExecutor { chain_id } => self.executor_action(&call.payload, chain_id),
            Route::RetryableEnvelope => {
                let envelope = self.open_envelope(&call.payload)?;
                self.executor_action(&envelope.payload, envelope.chain_id)
            }
            Route::DirectInboxCall { inbox, chain_id } => {
                Err(DecodeError::UnsupportedDirectInboxCall { inbox, chain_id })
            }
            Route::Unrecognized { address } => Err(DecodeError::UnrecognizedTarget { address }),
        }
    }

    /// Decode a retryable-ticket envelope and resolve its destination chain.
    pub fn open_envelope(&self, payload: &[u8]) -> Result<Envelope, DecodeError> {
        let values = codec::decode_params(payload, &self.envelope)?;
        let (inbox, target, data) = match values.as_slice() {
            [DynSolValue::Address(inbox), DynSolValue::Address(target), _, _, _, DynSolValue::Bytes(data)] => {
                (*inbox, *target, Bytes::copy_from_slice(data))
            }
            _ => return Err(DecodeError::fault("retryable envelope does not match (address,address,uint256,uint256,uint256,bytes)")),
        };

        let chain = self.routes.chain_for_inbox(inbox)?;
        if target != chain.upgrade_executor_address {
            debug!(l2_target = %target, chain = %chain, "envelope target is not the chain's upgrade executor");
        }
        Ok(Envelope {
            inbox,
            chain_id: chain.chain_id,
            target,
            payload: data,
        })
    }

    fn executor_action(&self, payload: &[u8], chain_id: u64) -> Result<Action, DecodeError> {
        let function = match self.executor.match_calldata(payload) {
            Ok(function) => function,
            Err(DecodeError::SelectorNotFound { selector }) => {
                return Err(DecodeError::UnrecognizedExecutorMethod {
                    selector,
                    name: "unknown".into(),
                })
            }
            Err(e) => return Err(e),
        };

        match function.signature() {
            abis::EXECUTE => {
                let call = self.executor.decode(payload)?;
                let action_contract = call.address(0)?;
                let data = call.bytes(1)?;
                let decoded = known_action_signature(&data);
                Ok(Action::delegate_call(action_contract, chain_id, data, decoded))
            }
            abis::EXECUTE_CALL => {
                let call = self.executor.decode(payload)?;
                Ok(Action::call(call.address(0)?, chain_id, call.bytes(1)?))
            }
            _ => Err(DecodeError::UnrecognizedExecutorMethod {
                selector: function.selector(),
                name: function.name().to_string(),
            }),
        }
    }

    /// Decode a single call against whichever built-in table knows its
    /// selector, without unwrapping further layers.
    pub fn describe<'a>(&'a self, calldata: &[u8]) -> Result<DecodedCall<'a>, DecodeError> {
        let selector = Selector::from_calldata(calldata).ok_or_else(|| {
            DecodeError::fault(format!("calldata too short: {} bytes", calldata.len()))
        })?;
        self.registries()
            .into_iter()
            .find(|(_, registry)| registry.get(selector).is_some())
            .map(|(_, registry)| registry.decode(calldata))
            .unwrap_or(Err(DecodeError::SelectorNotFound { selector }))
    }
}

/// Only `perform()` is named by the core; everything else is left to a resolver.
fn known_action_signature(data: &[u8]) -> Option<String> {
    (Selector::from_calldata(data) == Some(abis::PERFORM_SELECTOR)).then(|| abis::PERFORM.to_string())
}
