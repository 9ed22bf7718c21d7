//! Registry covering every gate and template

use crate::multiplier::{Multiplier, MultiplierConfig};
use crate::prepselprep::{PrepSelPrep, PrepSelPrepParams};
use qop_core::{IntoOp, Op, OperatorRegistry, Result, SerializedOperator};
use qop_gates::{register_gates, LinearCombination, LinearCombinationConfig};

/// Registry that can rebuild any operator of `qop-gates` and this crate
///
/// # Example
/// ```
/// use qop_core::{IntoOp, Operator, Wires};
/// use qop_templates::{standard_registry, Multiplier};
///
/// let op = Multiplier::new(3, Wires::indices([0, 1]).unwrap(), None, Wires::indices([2, 3]).unwrap())
///     .unwrap()
///     .into_op();
/// let json = op.serialize().to_json().unwrap();
/// let back = standard_registry().from_json(&json).unwrap();
/// assert!(*back == *op);
/// ```
pub fn standard_registry() -> OperatorRegistry {
    let mut registry = OperatorRegistry::new();
    register_gates(&mut registry);
    registry.register("Multiplier", multiplier);
    registry.register("PrepSelPrep", prepselprep);
    registry
}

fn multiplier(s: &SerializedOperator, _: &OperatorRegistry) -> Result<Op> {
    let config: MultiplierConfig = s.config()?;
    Ok(Multiplier::from_config(config)?.into_op())
}

fn prepselprep(s: &SerializedOperator, registry: &OperatorRegistry) -> Result<Op> {
    s.expect_children(1)?;
    let params: PrepSelPrepParams = s.config()?;
    let child = &s.children[0];
    let coeffs: LinearCombinationConfig = child.config()?;
    let lcu = LinearCombination::new(coeffs.coeffs, registry.deserialize_children(child)?)?;
    Ok(PrepSelPrep::with_config(lcu, params.control, params.config)?.into_op())
}
