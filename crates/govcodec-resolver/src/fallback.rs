//! Ordered composition of resolvers.

use alloy_primitives::Address;
use async_trait::async_trait;
use govcodec_core::{error::ResolverError, resolver::SignatureResolver, selector::Selector};
use tracing::debug;

/// Tries each resolver in turn and returns the first signature found.
///
/// A failing resolver does not stop the chain. The last error is returned
/// only when every resolver failed.
#[derive(Default)]
pub struct FallbackResolver {
    resolvers: Vec<Box<dyn SignatureResolver>>,
}

impl FallbackResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, resolver: impl SignatureResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }
}

#[async_trait]
impl SignatureResolver for FallbackResolver {
    async fn resolve(
        &self,
        selector: Selector,
        context: Address,
        chain_id: u64,
    ) -> Result<Option<String>, ResolverError> {
        let mut last_error = None;
        let mut answered = false;
        for resolver in &self.resolvers {
            match resolver.resolve(selector, context, chain_id).await {
                Ok(Some(signature)) => return Ok(Some(signature)),
                Ok(None) => answered = true,
                Err(e) => {
                    debug!(resolver = resolver.name(), error = %e, "resolver failed, trying next");
                    last_error = Some(e);
                }
            }
        }
        match last_error {
            Some(e) if !answered => Err(e),
            _ => Ok(None),
        }
    }

    fn name(&self) -> &str {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govcodec_core::StaticResolver;

    struct Down;

    #[async_trait]
    impl SignatureResolver for Down {
        async fn resolve(
            &self,
            _selector: Selector,
            _context: Address,
            _chain_id: u64,
        ) -> Result<Option<String>, ResolverError> {
            Err(ResolverError::RateLimited {
                service: "down".into(),
            })
        }
    }

    #[tokio::test]
    async fn first_answer_wins() {
        let mut second = StaticResolver::new();
        second.insert("transfer(address,uint256)");
        let chain = FallbackResolver::new()
            .push(Down)
            .push(StaticResolver::with_known())
            .push(second);

        let perform = chain.resolve(Selector::of("perform()"), Address::ZERO, 1).await;
        assert_eq!(perform.unwrap().as_deref(), Some("perform()"));
        let transfer = chain
            .resolve(Selector::of("transfer(address,uint256)"), Address::ZERO, 1)
            .await;
        assert_eq!(transfer.unwrap().as_deref(), Some("transfer(address,uint256)"));
    }

    #[tokio::test]
    async fn miss_beats_error() {
        let chain = FallbackResolver::new().push(Down).push(StaticResolver::new());
        let result = chain.resolve(Selector::of("perform()"), Address::ZERO, 1).await;
        assert_eq!(result.unwrap(), None);
    }

    #[tokio::test]
    async fn all_failing_returns_error() {
        let chain = FallbackResolver::new().push(Down);
        assert!(chain.resolve(Selector::of("perform()"), Address::ZERO, 1).await.is_err());
        assert_eq!(FallbackResolver::new().resolve(Selector::of("perform()"), Address::ZERO, 1).await.unwrap(), None);
    }
}
