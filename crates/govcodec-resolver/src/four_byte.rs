//! Selector lookup on 4byte.directory.

use alloy_primitives::Address;
use async_trait::async_trait;
use govcodec_core::{error::ResolverError, resolver::SignatureResolver, selector::Selector};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::trace;

use crate::http;

const SERVICE: &str = "4byte.directory";

#[derive(Debug, Deserialize)]
struct FourByteResponse {
    results: Vec<FourByteResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct FourByteResult {
    id: u64,
    text_signature: String,
}

pub struct FourByteResolver {
    client: Client,
    base_url: String,
}

impl FourByteResolver {
    pub fn new() -> Result<Self, ResolverError> {
        Ok(Self {
            client: http::client()?,
            base_url: "https://www.4byte.directory".into(),
        })
    }

    /// Point at a mirror or a local test server.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Oldest registration whose text actually hashes to `selector`.
fn pick_signature(selector: Selector, results: Vec<FourByteResult>) -> Option<String> {
    results
        .into_iter()
        .filter(|r| Selector::of(&r.text_signature) == selector)
        .min_by_key(|r| r.id)
        .map(|r| r.text_signature)
}

#[async_trait]
impl SignatureResolver for FourByteResolver {
    async fn resolve(
        &self,
        selector: Selector,
        _context: Address,
        _chain_id: u64,
    ) -> Result<Option<String>, ResolverError> {
        let url = format!("{}/api/v1/signatures/", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("hex_signature", selector.to_string())])
            .send()
            .await
            .map_err(http::request_error)?;

        match resp.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(ResolverError::RateLimited {
                    service: SERVICE.into(),
                })
            }
            status => {
                return Err(ResolverError::InvalidResponse {
                    service: SERVICE.into(),
                    reason: format!("HTTP {status}"),
                })
            }
        }

        let body: FourByteResponse =
            resp.json().await.map_err(|e| ResolverError::InvalidResponse {
                service: SERVICE.into(),
                reason: e.to_string(),
            })?;
        trace!(%selector, candidates = body.results.len(), "4byte lookup");
        Ok(pick_signature(selector, body.results))
    }

    fn name(&self) -> &str {
        "4byte"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: u64, text: &str) -> FourByteResult {
        FourByteResult {
            id,
            text_signature: text.into(),
        }
    }

    #[test]
    fn oldest_matching_entry_wins() {
        let selector = Selector::of("burn(uint256)");
        let picked = pick_signature(
            selector,
            vec![
                result(900, "collate_propagate_storage(bytes16)"),
                result(12, "burn(uint256)"),
                result(5, "notTheRightHash()"),
            ],
        );
        assert_eq!(picked.as_deref(), Some("burn(uint256)"));
    }

    #[test]
    fn empty_results_resolve_to_none() {
        assert_eq!(pick_signature(Selector::of("perform()"), vec![]), None);
    }

    #[test]
    fn response_shape_parses() {
        let body: FourByteResponse = serde_json::from_str(
            r#"{"count":1,"next":null,"previous":null,"results":[{"id":145,"created_at":"2016-07-09T03:58:28.234977Z","text_signature":"transfer(address,uint256)","hex_signature":"0xa9059cbb"}]}"#,
        )
        .unwrap();
        assert_eq!(body.results[0].id, 145);
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn live_transfer_lookup() {
        let resolver = FourByteResolver::new().unwrap();
        let sig = resolver
            .resolve(Selector::of("transfer(address,uint256)"), Address::ZERO, 1)
            .await
            .unwrap();
        assert_eq!(sig.as_deref(), Some("transfer(address,uint256)"));
    }
}
