//! Operator products

use qop_core::{Op, Operator, OperatorError, Result, WireMap, Wires};
use std::sync::Arc;

/// Product of operators, written left to right as in `a @ b`
///
/// The rightmost factor is applied first, so the decomposition lists the
/// factors in reverse.
#[derive(Debug, Clone)]
pub struct Prod {
    factors: Vec<Op>,
    wires: Wires,
}

impl Prod {
    /// Product of `factors`
    ///
    /// # Errors
    /// Returns error if there are no factors or the factors mix wire dimensions
    pub fn new(factors: Vec<Op>) -> Result<Self> {
        let first = factors
            .first()
            .ok_or_else(|| OperatorError::invalid_wire_count("Prod", 1, 0))?;
        let dim = first.wire_dim();
        if let Some(other) = factors.iter().find(|f| f.wire_dim() != dim) {
            return Err(OperatorError::DimensionMismatch {
                expected: dim,
                actual: other.wire_dim(),
            });
        }
        let wires = Wires::union(factors.iter().map(|f| f.wires()));
        Ok(Self { factors, wires })
    }

    /// `left @ right`
    pub fn pair(left: Op, right: Op) -> Result<Self> {
        Self::new(vec![left, right])
    }

    /// Factors in written order
    pub fn factors(&self) -> &[Op] {
        &self.factors
    }
}

impl Operator for Prod {
    fn name(&self) -> &str {
        "Prod"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn wire_dim(&self) -> usize {
        self.factors[0].wire_dim()
    }

    fn num_params(&self) -> usize {
        self.factors.iter().map(|f| f.num_params()).sum()
    }

    fn children(&self) -> Vec<Op> {
        self.factors.clone()
    }

    fn decomposition(&self) -> Result<Vec<Op>> {
        Ok(self.factors.iter().rev().cloned().collect())
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        let factors = self
            .factors
            .iter()
            .map(|f| f.map_wires(map))
            .collect::<Result<Vec<_>>>()?;
        Ok(Arc::new(Self::new(factors)?))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qutrit::TShift;
    use crate::standard::{Hadamard, PauliX, PauliZ};
    use num_complex::Complex64;
    use qop_core::expand::operator_matrix;
    use qop_core::IntoOp;

    fn w(indices: &[usize]) -> Wires {
        Wires::indices(indices.iter().copied()).unwrap()
    }

    #[test]
    fn test_right_factor_applied_first() {
        let x = PauliX::new(w(&[0])).unwrap().into_op();
        let z = PauliZ::new(w(&[0])).unwrap().into_op();
        let prod = Prod::pair(x.clone(), z.clone()).unwrap();
        let expected = x.matrix().unwrap().matmul(&z.matrix().unwrap()).unwrap();
        assert!(prod.matrix().unwrap().approx_eq(&expected, 1e-12));
        // XZ|1> = -X|1> = -|0>
        assert_eq!(prod.matrix().unwrap().get(0, 1), Complex64::new(-1.0, 0.0));
    }

    #[test]
    fn test_wires_union_and_adjoint() {
        let h = Hadamard::new(w(&[1])).unwrap().into_op();
        let z = PauliZ::new(w(&[0])).unwrap().into_op();
        let prod = Prod::pair(h, z).unwrap().into_op();
        assert_eq!(prod.wires(), &w(&[1, 0]));
        let m = prod.matrix().unwrap();
        let adj = operator_matrix(prod.adjoint().as_ref(), prod.wires()).unwrap();
        assert!(m.matmul(&adj).unwrap().is_unitary(1e-12));
        assert!(m.matmul(&adj).unwrap().approx_eq(&qop_core::Matrix::identity(4), 1e-12));
    }

    #[test]
    fn test_rejects_mixed_dimensions() {
        let shift = TShift::new(w(&[0])).unwrap().into_op();
        let x = PauliX::new(w(&[1])).unwrap().into_op();
        assert!(matches!(
            Prod::pair(shift, x),
            Err(OperatorError::DimensionMismatch { .. })
        ));
        assert!(Prod::new(Vec::new()).is_err());
    }
}
