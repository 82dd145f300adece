//! Optional signature enrichment of decoded actions.
//!
//! Runs after decoding and never fails it: a resolver error leaves the
//! action as it was and is logged.

use govcodec_core::{action::Action, resolver::SignatureResolver};
use tracing::{debug, warn};

/// Fill `decodedCallData` for actions that lack it.
///
/// Actions that already carry a signature, or whose call data has no
/// selector, are passed through untouched. Without a resolver this is the
/// identity.
pub async fn enrich_actions(
    actions: Vec<Action>,
    resolver: Option<&dyn SignatureResolver>,
) -> Vec<Action> {
    let Some(resolver) = resolver else {
        return actions;
    };

    let mut out = Vec::with_capacity(actions.len());
    for action in actions {
        out.push(enrich_one(action, resolver).await);
    }
    out
}

async fn enrich_one(action: Action, resolver: &dyn SignatureResolver) -> Action {
    if action.decoded_call_data().is_some() {
        return action;
    }
    let Some(selector) = action.selector() else {
        return action;
    };

    match resolver
        .resolve(selector, action.address(), action.chain_id())
        .await
    {
        Ok(Some(signature)) if !signature.is_empty() => {
            debug!(%selector, %signature, resolver = resolver.name(), "resolved call signature");
            action.with_decoded_call_data(signature)
        }
        Ok(_) => action,
        Err(e) => {
            warn!(%selector, resolver = resolver.name(), error = %e, "signature lookup failed");
            action
        }
    }
}
