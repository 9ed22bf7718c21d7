//! Operator serialization types and registry
//!
//! An operator's serialized identity is its name, wires, inversion flag,
//! typed configuration (as JSON) and serialized children. The
//! [`OperatorRegistry`] maps names back to constructors, so a round trip
//! re-runs the same construction-time validation as building the operator
//! directly.

use crate::{Adjoint, IntoOp, Op, OperatorError, Result, Wires};
use ahash::AHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::trace;

/// Serialized representation of an operator
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedOperator {
    pub name: String,
    pub wires: Wires,
    #[serde(default)]
    pub inverse: bool,
    #[serde(default)]
    pub hyperparameters: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SerializedOperator>,
}

impl SerializedOperator {
    /// Decode the typed configuration
    pub fn config<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.hyperparameters.clone())?)
    }

    /// Compact JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Require exactly `expected` children
    pub fn expect_children(&self, expected: usize) -> Result<()> {
        if self.children.len() != expected {
            return Err(OperatorError::Serialization(format!(
                "'{}' expects {} children, found {}",
                self.name,
                expected,
                self.children.len()
            )));
        }
        Ok(())
    }
}

/// Constructor from a serialized representation
pub type OperatorFactory = fn(&SerializedOperator, &OperatorRegistry) -> Result<Op>;

/// Name-based registry of operator constructors
///
/// A fresh registry knows only `Adjoint`; gate and template crates register
/// their own operators.
#[derive(Clone)]
pub struct OperatorRegistry {
    factories: AHashMap<String, OperatorFactory>,
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.names();
        names.sort_unstable();
        f.debug_struct("OperatorRegistry")
            .field("operators", &names)
            .finish()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OperatorRegistry {
    /// Create a registry that knows the adjoint wrapper
    pub fn new() -> Self {
        let mut registry = Self {
            factories: AHashMap::new(),
        };
        registry.register("Adjoint", adjoint_factory);
        registry
    }

    /// Register a constructor; replaces an existing one with the same name
    pub fn register(&mut self, name: impl Into<String>, factory: OperatorFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Check if a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    /// Number of registered constructors
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Rebuild an operator
    pub fn deserialize(&self, serialized: &SerializedOperator) -> Result<Op> {
        let factory = self
            .factories
            .get(&serialized.name)
            .ok_or_else(|| OperatorError::UnknownOperator(serialized.name.clone()))?;
        trace!(operator = %serialized.name, wires = %serialized.wires, "deserializing");
        factory(serialized, self)
    }

    /// Rebuild every child, in order
    pub fn deserialize_children(&self, serialized: &SerializedOperator) -> Result<Vec<Op>> {
        serialized
            .children
            .iter()
            .map(|child| self.deserialize(child))
            .collect()
    }

    /// Rebuild an operator from JSON
    pub fn from_json(&self, json: &str) -> Result<Op> {
        self.deserialize(&SerializedOperator::from_json(json)?)
    }
}

fn adjoint_factory(serialized: &SerializedOperator, registry: &OperatorRegistry) -> Result<Op> {
    serialized.expect_children(1)?;
    let base = registry.deserialize(&serialized.children[0])?;
    Ok(Adjoint::new(base).into_op())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_operator_json() {
        let op = SerializedOperator {
            name: "TShift".to_string(),
            wires: Wires::indices([2]).unwrap(),
            inverse: true,
            hyperparameters: Value::Null,
            children: Vec::new(),
        };
        let json = op.to_json().unwrap();
        assert!(!json.contains("children"));
        let back = SerializedOperator::from_json(&json).unwrap();
        assert_eq!(op, back);
    }

    #[test]
    fn test_missing_fields_default() {
        let back = SerializedOperator::from_json(r#"{"name":"TClock","wires":[0]}"#).unwrap();
        assert!(!back.inverse);
        assert_eq!(back.hyperparameters, Value::Null);
    }

    #[test]
    fn test_unknown_operator() {
        let registry = OperatorRegistry::new();
        assert!(registry.contains("Adjoint"));
        let result = registry.from_json(r#"{"name":"Nope","wires":[0]}"#);
        assert!(matches!(result, Err(OperatorError::UnknownOperator(_))));
    }

    #[test]
    fn test_adjoint_requires_child() {
        let registry = OperatorRegistry::new();
        let result = registry.from_json(r#"{"name":"Adjoint","wires":[0]}"#);
        assert!(matches!(result, Err(OperatorError::Serialization(_))));
    }
}
