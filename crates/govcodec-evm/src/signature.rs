//! Parsed function signatures.

use alloy_core::dyn_abi::DynSolType;
use alloy_dyn_abi::Specifier;
use alloy_json_abi::Function;
use govcodec_core::{error::RegistryError, selector::Selector};
use std::fmt;

/// A function declaration resolved into typed parameters.
///
/// Built once per signature set; the selector is derived from the
/// canonical form (`name(type1,type2,...)`, no parameter names or spaces).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    name: String,
    signature: String,
    selector: Selector,
    param_names: Vec<String>,
    inputs: Vec<DynSolType>,
}

impl FunctionSignature {
    /// Parse a human-readable declaration such as
    /// `"execute(address upgrade, bytes upgradeCallData)"` or `"perform()"`.
    pub fn parse(text: &str) -> Result<Self, RegistryError> {
        let trimmed = text.trim();
        let declaration = if trimmed.starts_with("function ") {
            trimmed.to_string()
        } else {
            format!("function {trimmed}")
        };
        let func = Function::parse(&declaration).map_err(|e| RegistryError::InvalidSignature {
            signature: text.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_function(&func)
    }

    /// Build from a JSON-ABI function entry.
    pub fn from_function(func: &Function) -> Result<Self, RegistryError> {
        let signature = func.signature();
        let mut inputs = Vec::with_capacity(func.inputs.len());
        let mut param_names = Vec::with_capacity(func.inputs.len());
        for (i, param) in func.inputs.iter().enumerate() {
            let ty = param.resolve().map_err(|e| RegistryError::InvalidSignature {
                signature: signature.clone(),
                reason: format!("param {i}: {e}"),
            })?;
            inputs.push(ty);
            param_names.push(if param.name.is_empty() {
                format!("arg{i}")
            } else {
                param.name.clone()
            });
        }
        Ok(Self {
            name: func.name.clone(),
            selector: Selector::of(&signature),
            signature,
            param_names,
            inputs,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical signature, e.g. `"execute(address,bytes)"`.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }

    pub fn inputs(&self) -> &[DynSolType] {
        &self.inputs
    }

    /// Declared parameter names; unnamed parameters read `argN`.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature)
    }
}
