//! Quantum Fourier transform

use crate::matrices;
use qop_core::{Matrix, Op, Operator, OperatorError, Result, WireMap, Wires};
use std::sync::Arc;

/// Quantum Fourier transform over a qubit register
///
/// F|j⟩ = 1/√N Σ_k e^(2πi·jk/N)|k⟩ with N = 2^n and the first wire as the
/// most significant bit. F⁴ = I.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qft {
    wires: Wires,
    inverse: bool,
}

impl Qft {
    /// Fourier transform on `wires`
    ///
    /// # Errors
    /// Returns error if `wires` is empty
    pub fn new(wires: Wires) -> Result<Self> {
        if wires.is_empty() {
            return Err(OperatorError::invalid_wire_count("QFT", 1, 0));
        }
        Ok(Self {
            wires,
            inverse: false,
        })
    }

    /// Builder for the inverse transform
    pub fn with_inverse(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }
}

impl Operator for Qft {
    fn name(&self) -> &str {
        "QFT"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn is_inverted(&self) -> bool {
        self.inverse
    }

    fn cyclic_order(&self) -> Option<u32> {
        Some(4)
    }

    fn matrix(&self) -> Result<Matrix> {
        let forward = Matrix::from_vec(matrices::fourier(self.wires.len()))?;
        Ok(if self.inverse {
            forward.dagger()
        } else {
            forward
        })
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
