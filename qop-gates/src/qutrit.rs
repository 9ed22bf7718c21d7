//! Parameter-free qutrit primitives
//!
//! The generalized Pauli shift and clock, the qutrit controlled-add and the
//! qutrit swap. Each gate carries an inversion flag; an inverted gate reports
//! the conjugate transpose of its matrix and conjugated eigenvalues.

use crate::matrices::{self, OMEGA, OMEGA_SQ};
use num_complex::Complex64;
use qop_core::{Matrix, Op, Operator, Result, WireMap, Wires};
use std::sync::Arc;

/// Local dimension of a qutrit
pub const QUTRIT_DIM: usize = 3;

const ONE: Complex64 = Complex64::new(1.0, 0.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

/// Helper macro for the shared shape of the qutrit primitives
macro_rules! qutrit_gate {
    ($(#[$doc:meta])* $gate:ident, $name:expr, $arity:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $gate {
            wires: Wires,
            inverse: bool,
        }

        impl $gate {
            /// Number of wires the gate acts on
            pub const NUM_WIRES: usize = $arity;

            /// Create the gate on `wires`
            ///
            /// # Errors
            /// Returns error if `wires` has the wrong length
            pub fn new(wires: Wires) -> Result<Self> {
                wires.expect_len($name, $arity)?;
                Ok(Self {
                    wires,
                    inverse: false,
                })
            }

            /// Set or clear the inversion flag
            pub fn set_inverse(&mut self, inverse: bool) {
                self.inverse = inverse;
            }

            /// Builder form of [`set_inverse`](Self::set_inverse)
            pub fn with_inverse(mut self, inverse: bool) -> Self {
                self.inverse = inverse;
                self
            }

            fn oriented(&self, matrix: Matrix) -> Matrix {
                if self.inverse {
                    matrix.dagger()
                } else {
                    matrix
                }
            }
        }
    };
}

fn oriented_eigenvalues(inverse: bool, values: &[Complex64]) -> Vec<Complex64> {
    if inverse {
        values.iter().map(|v| v.conj()).collect()
    } else {
        values.to_vec()
    }
}

qutrit_gate!(
    /// Qutrit shift gate
    ///
    /// Cyclic increment: TShift|j⟩ = |j+1 mod 3⟩
    TShift,
    "TShift",
    1
);

qutrit_gate!(
    /// Qutrit clock gate
    ///
    /// Phase by level: TClock|j⟩ = ω^j|j⟩
    TClock,
    "TClock",
    1
);

qutrit_gate!(
    /// Qutrit controlled-add gate
    ///
    /// TAdd|i, j⟩ = |i, i+j mod 3⟩; the first wire is the control.
    TAdd,
    "TAdd",
    2
);

qutrit_gate!(
    /// Qutrit swap gate
    ///
    /// TSwap|i, j⟩ = |j, i⟩. Self-inverse.
    TSwap,
    "TSwap",
    2
);

impl Operator for TShift {
    fn name(&self) -> &str {
        "TShift"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn wire_dim(&self) -> usize {
        QUTRIT_DIM
    }

    fn is_inverted(&self) -> bool {
        self.inverse
    }

    fn cyclic_order(&self) -> Option<u32> {
        Some(3)
    }

    fn matrix(&self) -> Result<Matrix> {
        Ok(self.oriented(Matrix::from_array(&matrices::TSHIFT)))
    }

    fn eigenvalues(&self) -> Result<Vec<Complex64>> {
        Ok(oriented_eigenvalues(self.inverse, &[OMEGA, OMEGA_SQ, ONE]))
    }

    fn adjoint(&self) -> Op {
        Arc::new(self.clone().with_inverse(!self.inverse))
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        Ok(Arc::new(Self {
            wires: self.wires.map(map)?,
            inverse: self.inverse,
        }))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}

impl Operator for TClock {
    fn name(&self) -> &str {
        "TClock"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn wire_dim(&self) -> usize {
        QUTRIT_DIM
    }

    fn is_inverted(&self) -> bool {
        self.inverse
    }

    fn cyclic_order(&self) -> Option<u32> {
        Some(3)
    }

    fn matrix(&self) -> Result<Matrix> {
        Ok(self.oriented(Matrix::from_array(&matrices::TCLOCK)))
    }

    fn eigenvalues(&self) -> Result<Vec<Complex64>> {
        Ok(oriented_eigenvalues(self.inverse, &[ONE, OMEGA, OMEGA_SQ]))
    }

    fn adjoint(&self) -> Op {
        Arc::new(self.clone().with_inverse(!self.inverse))
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        Ok(Arc::new(Self {
            wires: self.wires.map(map)?,
            inverse: self.inverse,
        }))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}

impl Operator for TAdd {
    fn name(&self) -> &str {
        "TAdd"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn wire_dim(&self) -> usize {
        QUTRIT_DIM
    }

    fn is_inverted(&self) -> bool {
        self.inverse
    }

    fn control_wires(&self) -> Wires {
        self.wires.slice(0..1)
    }

    fn cyclic_order(&self) -> Option<u32> {
        Some(3)
    }

    fn matrix(&self) -> Result<Matrix> {
        Ok(self.oriented(Matrix::from_array(&matrices::TADD)))
    }

    fn eigenvalues(&self) -> Result<Vec<Complex64>> {
        Ok(oriented_eigenvalues(
            self.inverse,
            &[OMEGA, OMEGA_SQ, ONE, OMEGA, OMEGA_SQ, ONE, ONE, ONE, ONE],
        ))
    }

    fn adjoint(&self) -> Op {
        Arc::new(self.clone().with_inverse(!self.inverse))
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        Ok(Arc::new(Self {
            wires: self.wires.map(map)?,
            inverse: self.inverse,
        }))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}

impl Operator for TSwap {
    fn name(&self) -> &str {
        "TSwap"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn wire_dim(&self) -> usize {
        QUTRIT_DIM
    }

    fn is_inverted(&self) -> bool {
        self.inverse
    }

    fn cyclic_order(&self) -> Option<u32> {
        Some(2)
    }

    fn matrix(&self) -> Result<Matrix> {
        Ok(self.oriented(Matrix::from_array(&matrices::TSWAP)))
    }

    fn eigenvalues(&self) -> Result<Vec<Complex64>> {
        // real spectrum, conjugation is a no-op
        Ok(vec![ONE, NEG_ONE, ONE, NEG_ONE, ONE, NEG_ONE, ONE, ONE, ONE])
    }

    fn adjoint(&self) -> Op {
        Arc::new(Self {
            wires: self.wires.clone(),
            inverse: false,
        })
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        Ok(Arc::new(Self {
            wires: self.wires.map(map)?,
            inverse: self.inverse,
        }))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qop_core::{wire_map, IntoOp, OperatorError};

    const EPSILON: f64 = 1e-10;

    fn wires(indices: &[usize]) -> Wires {
        Wires::indices(indices.iter().copied()).unwrap()
    }

    fn assert_values_eq(actual: &[Complex64], expected: &[Complex64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_relative_eq!(a.re, e.re, epsilon = EPSILON);
            assert_relative_eq!(a.im, e.im, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_tshift_maps_levels_cyclically() {
        let m = TShift::new(wires(&[0])).unwrap().matrix().unwrap();
        assert_eq!(m.get(1, 0), ONE);
        assert_eq!(m.get(2, 1), ONE);
        assert_eq!(m.get(0, 2), ONE);
    }

    #[test]
    fn test_tshift_eigenvalues_and_inverse() {
        let mut op = TShift::new(wires(&[0])).unwrap();
        assert_values_eq(&op.eigenvalues().unwrap(), &[OMEGA, OMEGA_SQ, ONE]);
        op.set_inverse(true);
        assert_values_eq(&op.eigenvalues().unwrap(), &[OMEGA_SQ, OMEGA, ONE]);
        let m = op.matrix().unwrap();
        assert!(m
            .matmul(&TShift::new(wires(&[0])).unwrap().matrix().unwrap())
            .unwrap()
            .approx_eq(&Matrix::identity(3), EPSILON));
    }

    #[test]
    fn test_cloned_gate_has_independent_flag() {
        let original = TShift::new(wires(&[0])).unwrap();
        let before = original.matrix().unwrap();
        let mut copy = original.clone();
        copy.set_inverse(true);
        assert!(copy.is_inverted());
        assert!(!original.is_inverted());
        assert!(original.matrix().unwrap().approx_eq(&before, EPSILON));
        assert!(copy.matrix().unwrap().approx_eq(&before.dagger(), EPSILON));
    }

    #[test]
    fn test_tclock_is_diagonal() {
        let op = TClock::new(wires(&[4])).unwrap();
        let m = op.matrix().unwrap();
        assert!(m.is_diagonal());
        assert_values_eq(&m.diag(), &op.eigenvalues().unwrap());
    }

    #[test]
    fn test_tadd_action_and_control() {
        let op = TAdd::new(wires(&[0, 1])).unwrap();
        let m = op.matrix().unwrap();
        let zero = Complex64::new(0.0, 0.0);
        for i in 0..3 {
            for j in 0..3 {
                // |i, j> -> |i, i + j mod 3>
                let column = 3 * i + j;
                let target = 3 * i + (i + j) % 3;
                for row in 0..9 {
                    let expected = if row == target { ONE } else { zero };
                    assert_eq!(m.get(row, column), expected, "|{}, {}> row {}", i, j, row);
                }
            }
        }
        assert_eq!(op.control_wires(), wires(&[0]));
        assert!(m.pow(3).approx_eq(&Matrix::identity(9), EPSILON));
    }

    #[test]
    fn test_tswap_adjoint_is_plain() {
        let op = TSwap::new(wires(&[0, 1])).unwrap().with_inverse(true);
        let adj = op.adjoint();
        assert_eq!(adj.name(), "TSwap");
        assert!(!adj.is_inverted());
        assert!(op.matrix().unwrap().approx_eq(&adj.matrix().unwrap(), EPSILON));
    }

    #[test]
    fn test_arity_errors() {
        assert!(matches!(
            TShift::new(wires(&[0, 1])),
            Err(OperatorError::InvalidWireCount { expected: 1, .. })
        ));
        assert!(matches!(
            TAdd::new(wires(&[0])),
            Err(OperatorError::InvalidWireCount { expected: 2, .. })
        ));
        assert!(matches!(
            Wires::indices([3, 3]),
            Err(OperatorError::DuplicateWire(_))
        ));
    }

    #[test]
    fn test_pow_reduction() {
        let op = TShift::new(wires(&[0])).unwrap().into_op();
        assert!(op.pow(0).unwrap().is_empty());
        assert!(op.pow(3).unwrap().is_empty());
        assert!(*op.pow(1).unwrap()[0] == *op);
        let squared = op.pow(2).unwrap();
        assert_eq!(squared.len(), 1);
        assert!(squared[0].is_inverted());
        assert!(*op.pow(-1).unwrap()[0] == *squared[0]);

        let swap = TSwap::new(wires(&[0, 1])).unwrap().into_op();
        assert!(swap.pow(4).unwrap().is_empty());
        assert!(*swap.pow(-1).unwrap()[0] == *swap);
    }

    #[test]
    fn test_adjoint_round_trip_and_map_wires() {
        let op = TAdd::new(wires(&[0, 1])).unwrap().into_op();
        assert!(*op.adjoint().adjoint() == *op);
        let mapped = op.map_wires(&wire_map([(0usize, 7usize)])).unwrap();
        assert_eq!(mapped.wires(), &wires(&[7, 1]));
        assert!(op.wires() == &wires(&[0, 1]));
    }
}
