//! State preparation from an amplitude vector

use num_complex::Complex64;
use qop_core::{Matrix, Op, Operator, OperatorError, Result, WireMap, Wires, DEFAULT_TOLERANCE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Configuration of a [`StatePrep`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatePrepConfig {
    /// Normalized amplitudes, zero-padded to 2^n
    pub amplitudes: Vec<Complex64>,
}

/// Unitary preparing a target state from |0…0⟩
///
/// The amplitudes are normalized and zero-padded to the register size. The
/// matrix is a phased Householder reflection whose first column is the
/// prepared state.
#[derive(Debug, Clone, PartialEq)]
pub struct StatePrep {
    amplitudes: Vec<Complex64>,
    wires: Wires,
}

impl StatePrep {
    /// Prepare `amplitudes` on `wires`
    ///
    /// # Errors
    /// Returns `InvalidAmplitudes` if the vector is empty, longer than
    /// 2^|wires|, or has zero norm
    pub fn new(amplitudes: &[Complex64], wires: Wires) -> Result<Self> {
        let size = 1usize << wires.len();
        if amplitudes.is_empty() {
            return Err(OperatorError::InvalidAmplitudes("no amplitudes".into()));
        }
        if amplitudes.len() > size {
            return Err(OperatorError::InvalidAmplitudes(format!(
                "{} amplitudes do not fit on {} wires",
                amplitudes.len(),
                wires.len()
            )));
        }
        let norm = amplitudes.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
        if norm <= DEFAULT_TOLERANCE {
            return Err(OperatorError::InvalidAmplitudes("zero vector".into()));
        }

        // unit-norm input is stored unchanged
        let norm = if (norm - 1.0).abs() <= DEFAULT_TOLERANCE { 1.0 } else { norm };
        let mut padded: Vec<Complex64> = amplitudes.iter().map(|a| a / norm).collect();
        padded.resize(size, ZERO);
        Ok(Self {
            amplitudes: padded,
            wires,
        })
    }

    /// Prepare real amplitudes
    pub fn from_real(amplitudes: &[f64], wires: Wires) -> Result<Self> {
        let amplitudes: Vec<Complex64> =
            amplitudes.iter().map(|&a| Complex64::new(a, 0.0)).collect();
        Self::new(&amplitudes, wires)
    }

    /// Normalized, padded amplitudes
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Configuration
    pub fn config(&self) -> StatePrepConfig {
        StatePrepConfig {
            amplitudes: self.amplitudes.clone(),
        }
    }
}

impl Operator for StatePrep {
    fn name(&self) -> &str {
        "StatePrep"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn num_params(&self) -> usize {
        1
    }

    fn hyperparameters(&self) -> Value {
        serde_json::to_value(self.config()).unwrap_or(Value::Null)
    }

    fn matrix(&self) -> Result<Matrix> {
        let psi = &self.amplitudes;
        let n = psi.len();
        // e^{iα} with α = arg ψ₀, so that ⟨e^{iα}e₀, ψ⟩ is real
        let phase = if psi[0].norm() > DEFAULT_TOLERANCE {
            psi[0] / psi[0].norm()
        } else {
            ONE
        };

        let mut w: Vec<Complex64> = psi.iter().map(|a| -a).collect();
        w[0] += phase;
        let w_norm_sqr: f64 = w.iter().map(|x| x.norm_sqr()).sum();

        let mut result = Matrix::identity(n).scale(phase);
        if w_norm_sqr <= DEFAULT_TOLERANCE * DEFAULT_TOLERANCE {
            return Ok(result);
        }
        let factor = phase * (2.0 / w_norm_sqr);
        for i in 0..n {
            for j in 0..n {
                let value = result.get(i, j) - factor * w[i] * w[j].conj();
                result.set(i, j, value);
            }
        }
        Ok(result)
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        Ok(Arc::new(Self {
            amplitudes: self.amplitudes.clone(),
            wires: self.wires.map(map)?,
        }))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}
