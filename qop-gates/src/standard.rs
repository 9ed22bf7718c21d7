//! Standard qubit gates with pre-computed matrices
//!
//! Fixed self-inverse gates (Identity, Hadamard, Paulis, SWAP), the global
//! phase and an arbitrary validated unitary.

use crate::matrices;
use num_complex::Complex64;
use qop_core::{
    IntoOp, Matrix, Op, Operator, OperatorError, Result, WireMap, Wires, DEFAULT_TOLERANCE,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const ONE: Complex64 = Complex64::new(1.0, 0.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

/// Helper macro for fixed, self-inverse qubit gates
///
/// These gates have a constant matrix, are their own adjoint, and carry no
/// configuration besides their wires.
macro_rules! self_inverse_gate {
    (
        $(#[$doc:meta])*
        $gate:ident, $name:expr, $arity:expr, $matrix:expr, $size:expr,
        order = $order:expr, eigenvalues = [$($eig:expr),* $(,)?]
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $gate {
            wires: Wires,
        }

        impl $gate {
            /// Create the gate on `wires`
            pub fn new(wires: Wires) -> Result<Self> {
                wires.expect_len($name, $arity)?;
                Ok(Self { wires })
            }

            /// Returns the pre-computed gate matrix
            #[inline]
            pub const fn const_matrix() -> &'static [[Complex64; $size]; $size] {
                $matrix
            }
        }

        impl Operator for $gate {
            fn name(&self) -> &str {
                $name
            }

            fn wires(&self) -> &Wires {
                &self.wires
            }

            fn cyclic_order(&self) -> Option<u32> {
                $order
            }

            fn matrix(&self) -> Result<Matrix> {
                Ok(Matrix::from_array(Self::const_matrix()))
            }

            fn eigenvalues(&self) -> Result<Vec<Complex64>> {
                Ok(vec![$($eig),*])
            }

            fn adjoint(&self) -> Op {
                self.to_op()
            }

            fn map_wires(&self, map: &WireMap) -> Result<Op> {
                Ok(Arc::new(Self {
                    wires: self.wires.map(map)?,
                }))
            }

            fn to_op(&self) -> Op {
                Arc::new(self.clone())
            }
        }
    };
}

// ============================================================================
// Single-Qubit Gates
// ============================================================================

self_inverse_gate!(
    /// Identity gate
    Identity, "Identity", 1, &matrices::IDENTITY, 2,
    order = None, eigenvalues = [ONE, ONE]
);

self_inverse_gate!(
    /// Hadamard gate
    ///
    /// Creates superposition: H|0⟩ = (|0⟩ + |1⟩)/√2
    Hadamard, "Hadamard", 1, &matrices::HADAMARD, 2,
    order = Some(2), eigenvalues = [ONE, NEG_ONE]
);

self_inverse_gate!(
    /// Pauli-X gate (NOT gate)
    ///
    /// Bit flip: X|0⟩ = |1⟩, X|1⟩ = |0⟩
    PauliX, "PauliX", 1, &matrices::PAULI_X, 2,
    order = Some(2), eigenvalues = [ONE, NEG_ONE]
);

self_inverse_gate!(
    /// Pauli-Y gate
    PauliY, "PauliY", 1, &matrices::PAULI_Y, 2,
    order = Some(2), eigenvalues = [ONE, NEG_ONE]
);

self_inverse_gate!(
    /// Pauli-Z gate
    ///
    /// Phase flip: Z|0⟩ = |0⟩, Z|1⟩ = -|1⟩
    PauliZ, "PauliZ", 1, &matrices::PAULI_Z, 2,
    order = Some(2), eigenvalues = [ONE, NEG_ONE]
);

// ============================================================================
// Two-Qubit Gates
// ============================================================================

self_inverse_gate!(
    /// SWAP gate
    ///
    /// Exchanges two qubits: SWAP|a,b⟩ = |b,a⟩
    Swap, "SWAP", 2, &matrices::SWAP, 4,
    order = Some(2), eigenvalues = [ONE, ONE, ONE, NEG_ONE]
);

// ============================================================================
// Global phase
// ============================================================================

/// Serialized configuration of a [`GlobalPhase`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalPhaseConfig {
    /// Phase angle
    pub phi: f64,
}

/// Global phase e^(-iφ) on any number of wires
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalPhase {
    phi: f64,
    wires: Wires,
}

impl GlobalPhase {
    /// Phase `phi` acting on `wires` (possibly none)
    pub fn new(phi: f64, wires: Wires) -> Self {
        Self { phi, wires }
    }

    /// The phase angle
    pub fn phi(&self) -> f64 {
        self.phi
    }

    fn factor(&self) -> Complex64 {
        Complex64::from_polar(1.0, -self.phi)
    }
}

impl Operator for GlobalPhase {
    fn name(&self) -> &str {
        "GlobalPhase"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn num_params(&self) -> usize {
        1
    }

    fn hyperparameters(&self) -> Value {
        serde_json::to_value(GlobalPhaseConfig { phi: self.phi }).unwrap_or(Value::Null)
    }

    fn matrix(&self) -> Result<Matrix> {
        Ok(Matrix::identity(1 << self.wires.len()).scale(self.factor()))
    }

    fn eigenvalues(&self) -> Result<Vec<Complex64>> {
        Ok(vec![self.factor(); 1 << self.wires.len()])
    }

    fn adjoint(&self) -> Op {
        GlobalPhase::new(-self.phi, self.wires.clone()).into_op()
    }

    fn pow(&self, z: i64) -> Result<Vec<Op>> {
        if z == 0 {
            return Ok(Vec::new());
        }
        Ok(vec![GlobalPhase::new(self.phi * z as f64, self.wires.clone()).into_op()])
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        Ok(Arc::new(Self {
            phi: self.phi,
            wires: self.wires.map(map)?,
        }))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}

// ============================================================================
// Arbitrary unitary
// ============================================================================

/// Serialized configuration of a [`QubitUnitary`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QubitUnitaryConfig {
    /// Row-major matrix entries
    pub matrix: Vec<Complex64>,
}

/// Arbitrary unitary acting on qubits
#[derive(Debug, Clone, PartialEq)]
pub struct QubitUnitary {
    matrix: Matrix,
    wires: Wires,
}

impl QubitUnitary {
    /// Wrap `matrix` acting on `wires`
    ///
    /// # Errors
    /// Returns error if the matrix is not `2^n × 2^n` for `n = wires.len()`
    /// or is not unitary within [`DEFAULT_TOLERANCE`] (scaled by dimension)
    pub fn new(matrix: Matrix, wires: Wires) -> Result<Self> {
        let expected = 1usize << wires.len();
        if matrix.dim() != expected {
            return Err(OperatorError::DimensionMismatch {
                expected,
                actual: matrix.dim(),
            });
        }
        let deviation = matrix.unitarity_deviation();
        if deviation > DEFAULT_TOLERANCE * expected as f64 {
            return Err(OperatorError::NotUnitary {
                max_deviation: deviation,
            });
        }
        Ok(Self { matrix, wires })
    }

    /// Rebuild from serialized configuration
    pub fn from_config(config: QubitUnitaryConfig, wires: Wires) -> Result<Self> {
        Self::new(Matrix::from_vec(config.matrix)?, wires)
    }
}

impl Operator for QubitUnitary {
    fn name(&self) -> &str {
        "QubitUnitary"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn num_params(&self) -> usize {
        1
    }

    fn hyperparameters(&self) -> Value {
        let config = QubitUnitaryConfig {
            matrix: self.matrix.as_slice().to_vec(),
        };
        serde_json::to_value(config).unwrap_or(Value::Null)
    }

    fn matrix(&self) -> Result<Matrix> {
        Ok(self.matrix.clone())
    }

    fn adjoint(&self) -> Op {
        Arc::new(Self {
            matrix: self.matrix.dagger(),
            wires: self.wires.clone(),
        })
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        Ok(Arc::new(Self {
            matrix: self.matrix.clone(),
            wires: self.wires.map(map)?,
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
    use qop_core::{equal, wire_map};
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-10;

    fn w(indices: &[usize]) -> Wires {
        Wires::indices(indices.iter().copied()).unwrap()
    }

    #[test]
    fn test_pauli_squares_are_identity() {
        for op in [
            PauliX::new(w(&[0])).unwrap().into_op(),
            PauliY::new(w(&[0])).unwrap().into_op(),
            PauliZ::new(w(&[0])).unwrap().into_op(),
            Hadamard::new(w(&[0])).unwrap().into_op(),
        ] {
            let m = op.matrix().unwrap();
            assert!(m.pow(2).approx_eq(&Matrix::identity(2), EPSILON));
            assert!(op.pow(2).unwrap().is_empty());
            assert!(equal(op.adjoint().as_ref(), op.as_ref()));
        }
    }

    #[test]
    fn test_swap_arity() {
        assert!(Swap::new(w(&[0])).is_err());
        let swap = Swap::new(w(&[0, 1])).unwrap();
        assert_eq!(swap.matrix().unwrap().get(1, 2), ONE);
        assert_eq!(swap.name(), "SWAP");
    }

    #[test]
    fn test_global_phase() {
        let phase = GlobalPhase::new(PI / 2.0, w(&[0]));
        let m = phase.matrix().unwrap();
        assert_relative_eq!(m.get(0, 0).im, -1.0, epsilon = EPSILON);
        assert_relative_eq!(m.get(1, 1).im, -1.0, epsilon = EPSILON);

        let adj = phase.adjoint();
        assert!(m
            .matmul(&adj.matrix().unwrap())
            .unwrap()
            .approx_eq(&Matrix::identity(2), EPSILON));

        let cubed = phase.pow(3).unwrap();
        assert_eq!(cubed.len(), 1);
        let phi = cubed[0].hyperparameters()["phi"].as_f64().unwrap();
        assert_relative_eq!(phi, 3.0 * PI / 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_global_phase_without_wires() {
        let phase = GlobalPhase::new(PI, Wires::empty());
        assert_eq!(phase.matrix().unwrap().dim(), 1);
    }

    #[test]
    fn test_qubit_unitary_validation() {
        let x = Matrix::from_array(&matrices::PAULI_X);
        assert!(QubitUnitary::new(x.clone(), w(&[0])).is_ok());
        assert!(matches!(
            QubitUnitary::new(x, w(&[0, 1])),
            Err(OperatorError::DimensionMismatch { .. })
        ));
        let not_unitary = Matrix::diagonal(&[ONE, Complex64::new(2.0, 0.0)]);
        assert!(matches!(
            QubitUnitary::new(not_unitary, w(&[0])),
            Err(OperatorError::NotUnitary { .. })
        ));
    }

    #[test]
    fn test_qubit_unitary_adjoint_and_mapping() {
        let s = Matrix::diagonal(&[ONE, Complex64::new(0.0, 1.0)]);
        let op = QubitUnitary::new(s.clone(), w(&[2])).unwrap();
        let adj = op.adjoint();
        assert!(adj.matrix().unwrap().approx_eq(&s.dagger(), EPSILON));
        let mapped = op.map_wires(&wire_map([(2usize, 0usize)])).unwrap();
        assert_eq!(mapped.wires(), &w(&[0]));
    }
}
