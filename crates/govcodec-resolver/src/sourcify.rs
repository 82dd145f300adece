//! Signature lookup through the verified ABI of the called contract.
//!
//! Unlike 4byte.directory this is unambiguous: the answer comes from the
//! contract the action targets. ABIs are cached per `(chain, address)`,
//! including misses.

use alloy_json_abi::JsonAbi;
use alloy_primitives::Address;
use async_trait::async_trait;
use govcodec_core::{error::ResolverError, resolver::SignatureResolver, selector::Selector};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::http;

const SERVICE: &str = "Sourcify";

pub struct SourcifyResolver {
    client: Client,
    base_url: String,
    cache: Mutex<HashMap<(u64, Address), Option<JsonAbi>>>,
}

impl SourcifyResolver {
    pub fn new() -> Result<Self, ResolverError> {
        Ok(Self {
            client: http::client()?,
            base_url: "https://sourcify.dev/server".into(),
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Set a custom Sourcify base URL (self-hosted instances).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn fetch_abi(&self, chain_id: u64, address: Address) -> Result<Option<JsonAbi>, ResolverError> {
        let url = format!(
            "{}/v2/contract/{chain_id}/{}",
            self.base_url,
            address.to_checksum(None)
        );
        let resp = self
            .client
            .get(&url)
            .query(&[("fields", "abi")])
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

        let body: serde_json::Value = resp.json().await.map_err(|e| invalid(e.to_string()))?;
        parse_abi(&body).map(Some)
    }
}

fn invalid(reason: String) -> ResolverError {
    ResolverError::InvalidResponse {
        service: SERVICE.into(),
        reason,
    }
}

fn parse_abi(body: &serde_json::Value) -> Result<JsonAbi, ResolverError> {
    let abi = body
        .get("abi")
        .ok_or_else(|| invalid("response has no `abi` field".into()))?;
    serde_json::from_value(abi.clone()).map_err(|e| invalid(e.to_string()))
}

/// Canonical signature of the function in `abi` with this selector.
fn signature_in_abi(abi: &JsonAbi, selector: Selector) -> Option<String> {
    abi.functions()
        .find(|f| Selector::new(f.selector().0) == selector)
        .map(|f| f.signature())
}

fn signature_in_entry(entry: &Option<JsonAbi>, selector: Selector) -> Option<String> {
    entry.as_ref().and_then(|abi| signature_in_abi(abi, selector))
}

#[async_trait]
impl SignatureResolver for SourcifyResolver {
    async fn resolve(
        &self,
        selector: Selector,
        context: Address,
        chain_id: u64,
    ) -> Result<Option<String>, ResolverError> {
        let key = (chain_id, context);
        if let Some(entry) = self.cache.lock().await.get(&key) {
            let signature = signature_in_entry(entry, selector);
            trace!(%selector, found = signature.is_some(), "sourcify cache hit");
            return Ok(signature);
        }

        // not held across the fetch
        let abi = self.fetch_abi(chain_id, context).await?;
        debug!(%context, chain_id, verified = abi.is_some(), "fetched contract ABI");

        let mut cache = self.cache.lock().await;
        let signature = signature_in_entry(cache.entry(key).or_insert(abi), selector);
        trace!(%selector, found = signature.is_some(), "sourcify lookup");
        Ok(signature)
    }

    fn name(&self) -> &str {
        "sourcify"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const BODY: &str = r#"{
        "matchId": "1",
        "match": "exact_match",
        "abi": [
            {"type":"function","name":"transfer","stateMutability":"nonpayable",
             "inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],
             "outputs":[{"name":"","type":"bool"}]},
            {"type":"event","name":"Transfer","anonymous":false,
             "inputs":[{"name":"from","type":"address","indexed":true},
                       {"name":"to","type":"address","indexed":true},
                       {"name":"value","type":"uint256","indexed":false}]}
        ]
    }"#;

    #[test]
    fn finds_function_by_selector() {
        let abi = parse_abi(&serde_json::from_str(BODY).unwrap()).unwrap();
        assert_eq!(
            signature_in_abi(&abi, Selector::of("transfer(address,uint256)")).as_deref(),
            Some("transfer(address,uint256)")
        );
        assert_eq!(signature_in_abi(&abi, Selector::of("perform()")), None);
    }

    #[test]
    fn body_without_abi_is_invalid() {
        let err = parse_abi(&serde_json::json!({"match": null})).unwrap_err();
        assert!(matches!(err, ResolverError::InvalidResponse { .. }));
    }

    /// Local stand-in for the Sourcify API. Requests naming `slow` are
    /// answered after `delay`; every request is counted.
    async fn serve_abi(slow: Address, delay: Duration) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let slow_path = slow.to_checksum(None);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let counter = Arc::clone(&counter);
                let slow_path = slow_path.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]).into_owned();
                    counter.fetch_add(1, Ordering::SeqCst);
                    if request.contains(&slow_path) {
                        tokio::time::sleep(delay).await;
                    }
                    let response = format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        BODY.len(),
                        BODY
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        });
        (base_url, hits)
    }

    #[tokio::test]
    async fn slow_fetch_does_not_block_other_contracts() {
        let slow = Address::repeat_byte(0x11);
        let fast = Address::repeat_byte(0x22);
        let transfer = Selector::of("transfer(address,uint256)");
        let (base_url, hits) = serve_abi(slow, Duration::from_millis(800)).await;
        let resolver = Arc::new(SourcifyResolver::new().unwrap().with_base_url(base_url));

        let pending = {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { resolver.resolve(transfer, slow, 1).await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        let start = Instant::now();
        let sig = resolver.resolve(transfer, fast, 1).await.unwrap();
        assert_eq!(sig.as_deref(), Some("transfer(address,uint256)"));
        assert!(start.elapsed() < Duration::from_millis(500), "{:?}", start.elapsed());
        assert!(!pending.is_finished());

        let sig = pending.await.unwrap().unwrap();
        assert_eq!(sig.as_deref(), Some("transfer(address,uint256)"));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn repeat_lookups_are_served_from_cache() {
        let (base_url, hits) = serve_abi(Address::ZERO, Duration::ZERO).await;
        let resolver = SourcifyResolver::new().unwrap().with_base_url(base_url);
        let contract = Address::repeat_byte(0x33);

        let first = resolver.resolve(Selector::of("transfer(address,uint256)"), contract, 1).await;
        assert_eq!(first.unwrap().as_deref(), Some("transfer(address,uint256)"));
        let missing = resolver.resolve(Selector::of("perform()"), contract, 1).await;
        assert_eq!(missing.unwrap(), None);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        // same address on another chain is a separate entry
        resolver.resolve(Selector::of("perform()"), contract, 10).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn live_upgrade_executor_lookup() {
        let resolver = SourcifyResolver::new().unwrap();
        let executor: Address = "0x3ffFbAdAF827559da092217e474760E2b2c3CeDd".parse().unwrap();
        let sig = resolver
            .resolve(Selector::of("executeCall(address,bytes)"), executor, 1)
            .await
            .unwrap();
        assert_eq!(sig.as_deref(), Some("executeCall(address,bytes)"));
    }
}
