use govcodec_core::error::ResolverError;
use reqwest::Client;
use std::time::Duration;

/// Shared client settings for every remote resolver.
pub(crate) fn client() -> Result<Client, ResolverError> {
    Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent(concat!("govcodec/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ResolverError::Http(e.to_string()))
}

pub(crate) fn request_error(e: reqwest::Error) -> ResolverError {
    ResolverError::Http(e.to_string())
}
