//! Linear combinations of operators

use num_complex::Complex64;
use qop_core::expand::operator_matrix;
use qop_core::{Matrix, Op, Operator, OperatorError, Result, WireMap, Wires};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Configuration of a [`LinearCombination`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearCombinationConfig {
    /// One coefficient per child operator
    pub coeffs: Vec<Complex64>,
}

/// Weighted sum Σ cᵢ Uᵢ of operators
///
/// Generally not unitary. Nested sums are kept as given and flattened by
/// [`terms`](Operator::terms).
#[derive(Debug, Clone)]
pub struct LinearCombination {
    coeffs: Vec<Complex64>,
    ops: Vec<Op>,
    wires: Wires,
}

impl LinearCombination {
    /// Sum of `coeffs[i] * ops[i]`
    ///
    /// # Errors
    /// Returns error if the lists differ in length, are empty, or the
    /// operators mix wire dimensions
    pub fn new(coeffs: Vec<Complex64>, ops: Vec<Op>) -> Result<Self> {
        if coeffs.len() != ops.len() {
            return Err(OperatorError::DimensionMismatch {
                expected: ops.len(),
                actual: coeffs.len(),
            });
        }
        let first = ops
            .first()
            .ok_or_else(|| OperatorError::invalid_wire_count("LinearCombination", 1, 0))?;
        let dim = first.wire_dim();
        if let Some(other) = ops.iter().find(|op| op.wire_dim() != dim) {
            return Err(OperatorError::DimensionMismatch {
                expected: dim,
                actual: other.wire_dim(),
            });
        }
        let wires = Wires::union(ops.iter().map(|op| op.wires()));
        Ok(Self { coeffs, ops, wires })
    }

    /// Sum with real coefficients
    pub fn from_real(coeffs: &[f64], ops: Vec<Op>) -> Result<Self> {
        Self::new(coeffs.iter().map(|&c| Complex64::new(c, 0.0)).collect(), ops)
    }

    /// Coefficients as given
    pub fn coeffs(&self) -> &[Complex64] {
        &self.coeffs
    }

    /// Operators as given
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }
}

impl Operator for LinearCombination {
    fn name(&self) -> &str {
        "LinearCombination"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn wire_dim(&self) -> usize {
        self.ops[0].wire_dim()
    }

    fn num_params(&self) -> usize {
        self.coeffs.len()
    }

    fn hyperparameters(&self) -> Value {
        let config = LinearCombinationConfig {
            coeffs: self.coeffs.clone(),
        };
        serde_json::to_value(config).unwrap_or(Value::Null)
    }

    fn children(&self) -> Vec<Op> {
        self.ops.clone()
    }

    fn terms(&self) -> Option<Vec<(Complex64, Op)>> {
        let mut flat = Vec::with_capacity(self.ops.len());
        for (&c, op) in self.coeffs.iter().zip(&self.ops) {
            match op.terms() {
                Some(inner) => flat.extend(inner.into_iter().map(|(d, sub)| (c * d, sub))),
                None => flat.push((c, op.clone())),
            }
        }
        Some(flat)
    }

    fn matrix(&self) -> Result<Matrix> {
        let dim = self.wire_dim().pow(self.wires.len() as u32);
        let mut sum = Matrix::zeros(dim);
        for (&c, op) in self.coeffs.iter().zip(&self.ops) {
            sum = sum.add(&operator_matrix(op.as_ref(), &self.wires)?.scale(c))?;
        }
        Ok(sum)
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        let ops = self
            .ops
            .iter()
            .map(|op| op.map_wires(map))
            .collect::<Result<Vec<_>>>()?;
        Ok(Arc::new(Self::new(self.coeffs.clone(), ops)?))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}
