//! Control-register constructions
//!
//! [`ControlledSequence`] applies powers of a base operator selected by the
//! value of a control register; [`Select`] applies one operator from a list.
//! Both place the control register first (most significant) in their wires.

use qop_core::expand::operator_matrix;
use qop_core::{Matrix, Op, Operator, OperatorError, Result, WireMap, Wires};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

/// Control registers are qubits, so every controlled operator must be too
fn check_qubit(op: &dyn Operator) -> Result<()> {
    if op.wire_dim() != 2 {
        return Err(OperatorError::DimensionMismatch {
            expected: 2,
            actual: op.wire_dim(),
        });
    }
    Ok(())
}

fn check_control_disjoint(control: &Wires, targets: &Wires) -> Result<()> {
    match control.first_shared(targets) {
        Some(wire) => Err(OperatorError::ControlOverlap(wire.clone())),
        None => Ok(()),
    }
}

/// Serialized configuration shared by the control-register operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Control register
    pub control: Wires,
}

impl ControlConfig {
    fn of(control: &Wires) -> Value {
        let config = ControlConfig {
            control: control.clone(),
        };
        serde_json::to_value(config).unwrap_or(Value::Null)
    }
}

/// Write `block` at diagonal offset `offset` of `target`
fn place_block(target: &mut Matrix, block: &Matrix, offset: usize) {
    for i in 0..block.dim() {
        for j in 0..block.dim() {
            target.set(offset + i, offset + j, block.get(i, j));
        }
    }
}

/// Sequence of powers of a base operator controlled by a register
///
/// Σ_c |c⟩⟨c| ⊗ Bᶜ, where c is the big-endian value of the control register.
#[derive(Debug, Clone)]
pub struct ControlledSequence {
    base: Op,
    control: Wires,
    wires: Wires,
}

impl ControlledSequence {
    /// Control `base` on `control`
    ///
    /// # Errors
    /// Returns error if the control register is empty, shares a wire with
    /// the base operator, or the base operator is not a qubit operator
    pub fn new(base: Op, control: Wires) -> Result<Self> {
        if control.is_empty() {
            return Err(OperatorError::invalid_wire_count("ControlledSequence", 1, 0));
        }
        check_qubit(base.as_ref())?;
        check_control_disjoint(&control, base.wires())?;
        let wires = control.concat(base.wires())?;
        Ok(Self {
            base,
            control,
            wires,
        })
    }

    /// Operator whose powers are applied
    pub fn base(&self) -> &Op {
        &self.base
    }

    /// Control register
    pub fn control(&self) -> &Wires {
        &self.control
    }
}

impl Operator for ControlledSequence {
    fn name(&self) -> &str {
        "ControlledSequence"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn control_wires(&self) -> Wires {
        self.control.clone()
    }

    fn hyperparameters(&self) -> Value {
        ControlConfig::of(&self.control)
    }

    fn children(&self) -> Vec<Op> {
        vec![self.base.clone()]
    }

    fn matrix(&self) -> Result<Matrix> {
        let base = self.base.matrix()?;
        let block = base.dim();
        let count = 1usize << self.control.len();
        trace!(controls = self.control.len(), block, "building controlled sequence");

        let mut result = Matrix::zeros(count * block);
        let mut power = Matrix::identity(block);
        for c in 0..count {
            place_block(&mut result, &power, c * block);
            power = base.matmul(&power)?;
        }
        Ok(result)
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        Ok(Arc::new(Self::new(
            self.base.map_wires(map)?,
            self.control.map(map)?,
        )?))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}

/// Multiplexer applying `ops[i]` when the control register holds `i`
///
/// Control values without an operator act as the identity.
#[derive(Debug, Clone)]
pub struct Select {
    ops: Vec<Op>,
    control: Wires,
    target: Wires,
    wires: Wires,
}

impl Select {
    /// Multiplex `ops` on `control`
    ///
    /// # Errors
    /// - `ControlOverlap` if a control wire is also a target wire
    /// - `InsufficientControlWires` if 2^|control| < ops.len()
    /// - `DimensionMismatch` if an operator is not a qubit operator
    pub fn new(ops: Vec<Op>, control: Wires) -> Result<Self> {
        for op in &ops {
            check_qubit(op.as_ref())?;
        }
        let target = Wires::union(ops.iter().map(|op| op.wires()));
        check_control_disjoint(&control, &target)?;
        let required = required_control_wires(ops.len());
        if control.len() < required {
            return Err(OperatorError::InsufficientControlWires {
                terms: ops.len(),
                required,
                actual: control.len(),
            });
        }
        let wires = control.concat(&target)?;
        Ok(Self {
            ops,
            control,
            target,
            wires,
        })
    }

    /// Selected operators
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Control register
    pub fn control(&self) -> &Wires {
        &self.control
    }

    /// Union of the operator wires
    pub fn target_wires(&self) -> &Wires {
        &self.target
    }
}

/// Smallest register width able to index `terms` entries
pub fn required_control_wires(terms: usize) -> usize {
    let mut width = 0;
    while (1usize << width) < terms {
        width += 1;
    }
    width
}

impl Operator for Select {
    fn name(&self) -> &str {
        "Select"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn control_wires(&self) -> Wires {
        self.control.clone()
    }

    fn hyperparameters(&self) -> Value {
        ControlConfig::of(&self.control)
    }

    fn children(&self) -> Vec<Op> {
        self.ops.clone()
    }

    fn matrix(&self) -> Result<Matrix> {
        let block = 1usize << self.target.len();
        let count = 1usize << self.control.len();
        let mut result = Matrix::identity(count * block);
        for (i, op) in self.ops.iter().enumerate() {
            let local = operator_matrix(op.as_ref(), &self.target)?;
            place_block(&mut result, &local, i * block);
        }
        Ok(result)
    }

    fn adjoint(&self) -> Op {
        Arc::new(Self {
            ops: self.ops.iter().map(|op| op.adjoint()).collect(),
            ..self.clone()
        })
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        let ops = self
            .ops
            .iter()
            .map(|op| op.map_wires(map))
            .collect::<Result<Vec<_>>>()?;
        Ok(Arc::new(Self::new(ops, self.control.map(map)?)?))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qutrit::{TAdd, TShift};
    use crate::standard::{PauliX, PauliZ};
    use num_complex::Complex64;
    use qop_core::expand::{apply_operator, basis_state, dominant_basis_index};
    use qop_core::IntoOp;

    fn w(indices: &[usize]) -> Wires {
        Wires::indices(indices.iter().copied()).unwrap()
    }

    #[test]
    fn test_controlled_sequence_applies_powers() {
        let x = PauliX::new(w(&[2])).unwrap().into_op();
        let seq = ControlledSequence::new(x, w(&[0, 1])).unwrap();
        assert_eq!(seq.wires(), &w(&[0, 1, 2]));
        // control value 3 applies X³ = X
        let out = apply_operator(&basis_state(&[1, 1, 0], 2), &seq, seq.wires(), 2).unwrap();
        assert_eq!(dominant_basis_index(&out, 1e-12), Some(7));
        // control value 2 applies X² = I
        let out = apply_operator(&basis_state(&[1, 0, 0], 2), &seq, seq.wires(), 2).unwrap();
        assert_eq!(dominant_basis_index(&out, 1e-12), Some(4));
    }

    #[test]
    fn test_controlled_sequence_overlap() {
        let x = PauliX::new(w(&[1])).unwrap().into_op();
        assert!(matches!(
            ControlledSequence::new(x, w(&[0, 1])),
            Err(OperatorError::ControlOverlap(_))
        ));
    }

    #[test]
    fn test_qutrit_operands_rejected() {
        let shift = TShift::new(w(&[1])).unwrap().into_op();
        assert!(matches!(
            ControlledSequence::new(shift.clone(), w(&[0])),
            Err(OperatorError::DimensionMismatch { expected: 2, actual: 3 })
        ));
        assert!(matches!(
            Select::new(vec![shift], w(&[0])),
            Err(OperatorError::DimensionMismatch { expected: 2, actual: 3 })
        ));

        let mixed = vec![
            PauliX::new(w(&[2])).unwrap().into_op(),
            TAdd::new(w(&[2, 3])).unwrap().into_op(),
        ];
        assert!(matches!(
            Select::new(mixed, w(&[0])),
            Err(OperatorError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_select_blocks_and_padding() {
        let ops = vec![
            PauliX::new(w(&[2])).unwrap().into_op(),
            PauliZ::new(w(&[2])).unwrap().into_op(),
            PauliX::new(w(&[2])).unwrap().into_op(),
        ];
        let select = Select::new(ops, w(&[0, 1])).unwrap();
        let m = select.matrix().unwrap();
        assert!(m.is_unitary(1e-12));
        // block 1 is Z
        assert_eq!(m.get(3, 3), Complex64::new(-1.0, 0.0));
        // block 3 is padding
        assert_eq!(m.get(6, 6), Complex64::new(1.0, 0.0));
        assert_eq!(m.get(7, 7), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_select_validation() {
        let ops = vec![
            PauliX::new(w(&[1])).unwrap().into_op(),
            PauliZ::new(w(&[1])).unwrap().into_op(),
            PauliX::new(w(&[1])).unwrap().into_op(),
        ];
        assert!(matches!(
            Select::new(ops.clone(), w(&[0])),
            Err(OperatorError::InsufficientControlWires { required: 2, .. })
        ));
        assert!(matches!(
            Select::new(ops, w(&[0, 1])),
            Err(OperatorError::ControlOverlap(_))
        ));
    }

    #[test]
    fn test_required_control_wires() {
        assert_eq!(required_control_wires(1), 0);
        assert_eq!(required_control_wires(2), 1);
        assert_eq!(required_control_wires(5), 3);
    }
}
