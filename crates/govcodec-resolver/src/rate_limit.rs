//! Token bucket rate limiting for remote resolvers.
//!
//! Tokens accrue at `refill_rate` per second up to `capacity`; each lookup
//! costs one. Callers that find the bucket empty wait for the next token
//! instead of failing. The bucket sits behind a `tokio` mutex, which is
//! fair, so waiting callers proceed in the order they arrived.

use alloy_primitives::Address;
use async_trait::async_trait;
use govcodec_core::{error::ResolverError, resolver::SignatureResolver, selector::Selector};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::trace;

/// Rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum tokens in the bucket.
    pub capacity: f64,
    /// Token refill rate (tokens per second).
    pub refill_rate: f64,
}

impl RateLimiterConfig {
    /// A bucket needs room for one token and a positive, finite refill rate.
    pub fn validate(&self) -> Result<(), ResolverError> {
        if !(self.capacity.is_finite() && self.capacity >= 1.0) {
            return Err(ResolverError::InvalidConfig {
                reason: format!("rate limiter capacity must be at least 1, got {}", self.capacity),
            });
        }
        if !(self.refill_rate.is_finite() && self.refill_rate > 0.0) {
            return Err(ResolverError::InvalidConfig {
                reason: format!(
                    "rate limiter refill rate must be positive, got {}",
                    self.refill_rate
                ),
            });
        }
        Ok(())
    }
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            capacity: 5.0,
            refill_rate: 5.0,
        }
    }
}

#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl BucketState {
    fn refill(&mut self, config: &RateLimiterConfig) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * config.refill_rate).min(config.capacity);
        self.last_refill = now;
    }

    /// Time until one token is available.
    fn wait_time(&self, config: &RateLimiterConfig) -> Duration {
        let deficit = 1.0 - self.tokens;
        if deficit <= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(deficit / config.refill_rate).unwrap_or(Duration::MAX)
        }
    }
}

/// Wraps a resolver so that all calls through it share one token bucket.
pub struct RateLimited<R> {
    inner: R,
    config: RateLimiterConfig,
    state: Mutex<BucketState>,
}

impl<R> RateLimited<R> {
    pub fn new(inner: R, config: RateLimiterConfig) -> Result<Self, ResolverError> {
        config.validate()?;
        Ok(Self {
            inner,
            state: Mutex::new(BucketState {
                tokens: config.capacity,
                last_refill: Instant::now(),
            }),
            config,
        })
    }

    /// Wait until a token is available, then take it.
    ///
    /// The lock is held across the sleep so later callers queue behind.
    pub async fn acquire(&self) {
        let mut state = self.state.lock().await;
        state.refill(&self.config);
        let wait = state.wait_time(&self.config);
        if !wait.is_zero() {
            trace!(wait_ms = wait.as_millis() as u64, "rate limit reached, waiting");
            tokio::time::sleep(wait).await;
            state.refill(&self.config);
        }
        state.tokens = (state.tokens - 1.0).max(0.0);
    }

    /// Currently available tokens.
    pub async fn available(&self) -> f64 {
        let mut state = self.state.lock().await;
        state.refill(&self.config);
        state.tokens
    }
}

#[async_trait]
impl<R: SignatureResolver> SignatureResolver for RateLimited<R> {
    async fn resolve(
        &self,
        selector: Selector,
        context: Address,
        chain_id: u64,
    ) -> Result<Option<String>, ResolverError> {
        self.acquire().await;
        self.inner.resolve(selector, context, chain_id).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govcodec_core::StaticResolver;
    use std::sync::Arc;

    fn limiter(capacity: f64, refill_rate: f64) -> RateLimited<StaticResolver> {
        RateLimited::new(
            StaticResolver::with_known(),
            RateLimiterConfig {
                capacity,
                refill_rate,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn burst_up_to_capacity_is_immediate() {
        let limited = limiter(5.0, 5.0);
        let start = Instant::now();
        for _ in 0..5 {
            limited.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
        assert!(limited.available().await < 1.0);
    }

    #[tokio::test]
    async fn excess_calls_wait_for_refill() {
        let limited = limiter(1.0, 20.0);
        let start = Instant::now();
        for _ in 0..3 {
            limited.acquire().await;
        }
        // two refills at 50ms each
        assert!(start.elapsed() >= Duration::from_millis(90));
    }

    #[tokio::test]
    async fn concurrent_callers_all_complete() {
        let limited = Arc::new(limiter(2.0, 50.0));
        let handles: Vec<_> = (0..6)
            .map(|_| {
                let limited = Arc::clone(&limited);
                tokio::spawn(async move {
                    limited
                        .resolve(Selector::of("perform()"), Address::ZERO, 1)
                        .await
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().as_deref(), Some("perform()"));
        }
    }

    #[test]
    fn default_is_five_per_second() {
        let config = RateLimiterConfig::default();
        assert_eq!(config.capacity, 5.0);
        assert_eq!(config.refill_rate, 5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_refill_rate_is_rejected() {
        for refill_rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = RateLimiterConfig {
                capacity: 5.0,
                refill_rate,
            };
            let err = RateLimited::new(StaticResolver::with_known(), config).err().unwrap();
            assert!(matches!(err, ResolverError::InvalidConfig { .. }), "{refill_rate}: {err}");
        }
    }

    #[test]
    fn capacity_below_one_token_is_rejected() {
        for capacity in [0.0, 0.5, -3.0, f64::NAN] {
            let config = RateLimiterConfig {
                capacity,
                refill_rate: 5.0,
            };
            assert!(RateLimited::new(StaticResolver::with_known(), config).is_err());
        }
    }

    #[test]
    fn tiny_refill_rate_waits_instead_of_panicking() {
        let config = RateLimiterConfig {
            capacity: 1.0,
            refill_rate: f64::MIN_POSITIVE,
        };
        let state = BucketState {
            tokens: 0.0,
            last_refill: Instant::now(),
        };
        assert_eq!(state.wait_time(&config), Duration::MAX);
    }
}
