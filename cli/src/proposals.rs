//! Proposal-id lookup backed by a static JSON dataset.
//!
//! The dataset is a flat object mapping decimal proposal ids to calldata:
//! `{"<id>": "0x<calldata>", ...}`.

use anyhow::{anyhow, bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default)]
pub struct ProposalSet {
    by_id: BTreeMap<String, String>,
}

impl ProposalSet {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read proposal dataset {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("invalid proposal dataset {}", path.display()))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let by_id: BTreeMap<String, String> = serde_json::from_str(json)?;
        if let Some(bad) = by_id.keys().find(|id| !is_proposal_id(id)) {
            bail!("proposal id '{bad}' is not a decimal number");
        }
        Ok(Self { by_id })
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// `(id, calldata hex)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_id.iter().map(|(id, hex)| (id.as_str(), hex.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }
}

/// A non-empty run of ASCII digits. Digit-only calldata must keep its `0x`
/// prefix to be read as hex.
pub fn is_proposal_id(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}

/// Turn the `decode` argument into calldata hex: ids are looked up in the
/// dataset, everything else is taken as hex.
pub fn resolve_input<'a>(input: &'a str, proposals: Option<&'a ProposalSet>) -> Result<&'a str> {
    let input = input.trim();
    if !is_proposal_id(input) {
        return Ok(input);
    }
    let proposals =
        proposals.ok_or_else(|| anyhow!("'{input}' looks like a proposal id; pass --proposals <file>"))?;
    proposals
        .get(input)
        .ok_or_else(|| anyhow!("proposal {input} is not in the dataset"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"{"42": "0x01d5062a", "1000000000000000000000000000000": "0xdeadbeef"}"#;

    #[test]
    fn ids_resolve_through_the_dataset() {
        let set = ProposalSet::from_json_str(DATASET).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(resolve_input("42", Some(&set)).unwrap(), "0x01d5062a");
        assert_eq!(resolve_input(" 1000000000000000000000000000000 ", Some(&set)).unwrap(), "0xdeadbeef");
        assert!(resolve_input("7", Some(&set)).is_err());
        assert!(resolve_input("42", None).is_err());
    }

    #[test]
    fn hex_passes_through() {
        assert_eq!(resolve_input("0x1234", None).unwrap(), "0x1234");
        assert_eq!(resolve_input("abcd", None).unwrap(), "abcd");
    }

    #[test]
    fn non_numeric_ids_are_rejected() {
        assert!(ProposalSet::from_json_str(r#"{"prop-1": "0x00"}"#).is_err());
    }
}
