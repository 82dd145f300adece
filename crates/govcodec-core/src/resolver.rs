//! The signature-resolver collaborator interface.
//!
//! Resolvers turn a selector into a human-readable signature. They may be
//! slow, may fail, and may be absent entirely; callers treat an error the
//! same as `Ok(None)`.

use alloy_primitives::Address;
use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::ResolverError;
use crate::selector::Selector;

#[async_trait]
pub trait SignatureResolver: Send + Sync {
    /// Look up the signature for `selector` as called on `context` on `chain_id`.
    async fn resolve(
        &self,
        selector: Selector,
        context: Address,
        chain_id: u64,
    ) -> Result<Option<String>, ResolverError>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "resolver"
    }
}

/// Offline resolver backed by a fixed map of signatures.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    by_selector: HashMap<Selector, String>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver pre-loaded with the signatures governance actions commonly use.
    pub fn with_known() -> Self {
        let mut resolver = Self::new();
        resolver.insert("perform()");
        resolver
    }

    /// Register a canonical signature; returns its selector.
    pub fn insert(&mut self, signature: &str) -> Selector {
        let selector = Selector::of(signature);
        self.by_selector.insert(selector, signature.to_string());
        selector
    }

    pub fn len(&self) -> usize {
        self.by_selector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_selector.is_empty()
    }
}

#[async_trait]
impl SignatureResolver for StaticResolver {
    async fn resolve(
        &self,
        selector: Selector,
        _context: Address,
        _chain_id: u64,
    ) -> Result<Option<String>, ResolverError> {
        Ok(self.by_selector.get(&selector).cloned())
    }

    fn name(&self) -> &str {
        "static"
    }
}
