//! Per-lookup deadline for a resolver.

use alloy_primitives::Address;
use async_trait::async_trait;
use govcodec_core::{error::ResolverError, resolver::SignatureResolver, selector::Selector};
use std::time::Duration;

pub struct WithTimeout<R> {
    inner: R,
    timeout: Duration,
}

impl<R> WithTimeout<R> {
    pub fn new(inner: R, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<R: SignatureResolver> SignatureResolver for WithTimeout<R> {
    async fn resolve(
        &self,
        selector: Selector,
        context: Address,
        chain_id: u64,
    ) -> Result<Option<String>, ResolverError> {
        tokio::time::timeout(self.timeout, self.inner.resolve(selector, context, chain_id))
            .await
            .map_err(|_| ResolverError::Timeout {
                ms: self.timeout.as_millis() as u64,
            })?
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
