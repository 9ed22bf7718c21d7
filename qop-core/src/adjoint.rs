//! Generic adjoint wrapper
//!
//! Operators that have no cheaper adjoint rule are wrapped in [`Adjoint`].
//! The wrapper conjugate-transposes the base matrix and reverses the base
//! decomposition, adjointing each element, so `Adjoint(A·B) = B†·A†`.

use crate::{algebra, Matrix, Op, Operator, Result, WireMap, Wires};
use num_complex::Complex64;
use std::sync::Arc;

/// Hermitian conjugate of a base operator
#[derive(Clone, Debug)]
pub struct Adjoint {
    base: Op,
}

impl Adjoint {
    /// Wrap `base`
    pub fn new(base: Op) -> Self {
        Self { base }
    }

    /// The wrapped operator
    pub fn base(&self) -> &Op {
        &self.base
    }
}

impl Operator for Adjoint {
    fn name(&self) -> &str {
        "Adjoint"
    }

    fn wires(&self) -> &Wires {
        self.base.wires()
    }

    fn num_params(&self) -> usize {
        self.base.num_params()
    }

    fn wire_dim(&self) -> usize {
        self.base.wire_dim()
    }

    fn control_wires(&self) -> Wires {
        self.base.control_wires()
    }

    fn cyclic_order(&self) -> Option<u32> {
        self.base.cyclic_order()
    }

    fn children(&self) -> Vec<Op> {
        vec![self.base.clone()]
    }

    fn matrix(&self) -> Result<Matrix> {
        Ok(self.base.matrix()?.dagger())
    }

    fn eigenvalues(&self) -> Result<Vec<Complex64>> {
        Ok(self.base.eigenvalues()?.iter().map(|v| v.conj()).collect())
    }

    fn decomposition(&self) -> Result<Vec<Op>> {
        Ok(self
            .base
            .decomposition()?
            .iter()
            .rev()
            .map(|op| op.adjoint())
            .collect())
    }

    fn adjoint(&self) -> Op {
        self.base.clone()
    }

    fn pow(&self, z: i64) -> Result<Vec<Op>> {
        match z.checked_neg() {
            Some(negated) => self.base.pow(negated),
            None => algebra::integer_pow(&self.to_op(), z, self.cyclic_order()),
        }
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        Ok(Arc::new(Adjoint::new(self.base.map_wires(map)?)))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}
