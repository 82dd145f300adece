//! # govcodec-resolver
//!
//! Network-backed [`SignatureResolver`]s used to fill in `decodedCallData`
//! for actions the core decoder leaves unnamed.
//!
//! ## Resolvers
//! - [`FourByteResolver`]: selector lookup on 4byte.directory
//! - [`SourcifyResolver`]: verified ABI of the called contract
//!
//! ## Combinators
//! - [`RateLimited`]: token bucket shared by every caller, FIFO ordered
//! - [`WithTimeout`]: bounds a single lookup
//! - [`FallbackResolver`]: first resolver to answer wins
//!
//! ## Usage
//! ```no_run
//! use govcodec_resolver::default_chain;
//! use std::time::Duration;
//!
//! // let resolver = default_chain(Duration::from_secs(3))?;
//! // let actions = govcodec_evm::enrich_actions(actions, Some(&resolver)).await;
//! ```

pub mod fallback;
pub mod four_byte;
mod http;
pub mod rate_limit;
pub mod sourcify;
pub mod timeout;

pub use fallback::FallbackResolver;
pub use four_byte::FourByteResolver;
pub use rate_limit::{RateLimited, RateLimiterConfig};
pub use sourcify::SourcifyResolver;
pub use timeout::WithTimeout;

use govcodec_core::{error::ResolverError, resolver::SignatureResolver, StaticResolver};
use std::time::Duration;

/// Built-in signatures first, then Sourcify, then 4byte.directory. Each
/// remote lookup is rate limited and bounded by `timeout`.
pub fn default_chain(timeout: Duration) -> Result<FallbackResolver, ResolverError> {
    let limits = RateLimiterConfig::default();
    Ok(FallbackResolver::new()
        .push(StaticResolver::with_known())
        .push(WithTimeout::new(
            RateLimited::new(SourcifyResolver::new()?, limits.clone())?,
            timeout,
        ))
        .push(WithTimeout::new(
            RateLimited::new(FourByteResolver::new()?, limits)?,
            timeout,
        )))
}
