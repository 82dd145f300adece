//! Rayon-powered batch decode over many proposals.
//!
//! Each input is decoded independently; one bad proposal never affects the
//! others. Results keep input order.

use govcodec_core::{action::Action, error::DecodeError};
use rayon::prelude::*;
use tracing::debug;

use crate::pipeline::GovernanceDecoder;

/// Decode every input in parallel.
pub fn parallel_decode<T>(
    decoder: &GovernanceDecoder,
    inputs: &[T],
) -> Vec<Result<Vec<Action>, DecodeError>>
where
    T: AsRef<[u8]> + Sync,
{
    let results: Vec<_> = inputs
        .par_iter()
        .map(|calldata| decoder.decode(calldata.as_ref()))
        .collect();
    debug!(
        total = results.len(),
        failed = results.iter().filter(|r| r.is_err()).count(),
        "batch decode complete"
    );
    results
}

/// Like [`parallel_decode`] for hex inputs; bad hex fails only its own entry.
pub fn parallel_decode_hex<S>(
    decoder: &GovernanceDecoder,
    inputs: &[S],
) -> Vec<Result<Vec<Action>, DecodeError>>
where
    S: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|hex| decoder.decode_hex(hex.as_ref()))
        .collect()
}

/// Split batch results into `(index, actions)` and `(index, error)` lists.
pub fn partition(
    results: Vec<Result<Vec<Action>, DecodeError>>,
) -> (Vec<(usize, Vec<Action>)>, Vec<(usize, DecodeError)>) {
    let mut decoded = Vec::new();
    let mut errors = Vec::new();
    for (idx, r) in results.into_iter().enumerate() {
        match r {
            Ok(actions) => decoded.push((idx, actions)),
            Err(e) => errors.push((idx, e)),
        }
    }
    (decoded, errors)
}
