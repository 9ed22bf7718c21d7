//! Operator capability interface

use crate::algebra;
use crate::expand;
use crate::recording::Recorder;
use crate::serialization::SerializedOperator;
use crate::{Adjoint, Matrix, OperatorError, Result, WireMap, Wires};
use num_complex::Complex64;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an operator
pub type Op = Arc<dyn Operator>;

/// Trait for quantum operators
///
/// Every primitive gate and composite template implements this trait.
/// Operators are immutable values; `adjoint` and `pow` return fresh
/// operators instead of modifying `self`.
///
/// Only `name`, `wires`, `map_wires` and `to_op` are required. The other
/// capabilities have defaults built on top of `decomposition`:
/// - `matrix` composes the decomposition over the operator's own wires
/// - `eigenvalues` reads the diagonal of a diagonal matrix
/// - `adjoint` wraps the operator in [`Adjoint`]
/// - `pow` follows [`cyclic_order`](Operator::cyclic_order)
///
/// # Example
/// ```ignore
/// #[derive(Clone, Debug)]
/// struct Flip { wires: Wires }
///
/// impl Operator for Flip {
///     fn name(&self) -> &str { "Flip" }
///     fn wires(&self) -> &Wires { &self.wires }
///     fn cyclic_order(&self) -> Option<u32> { Some(2) }
///     fn matrix(&self) -> Result<Matrix> { Ok(Matrix::permutation(&[1, 0])) }
///     fn map_wires(&self, map: &WireMap) -> Result<Op> {
///         Ok(Arc::new(Flip { wires: self.wires.map(map)? }))
///     }
///     fn to_op(&self) -> Op { Arc::new(self.clone()) }
/// }
/// ```
pub trait Operator: Send + Sync + fmt::Debug {
    /// The name of the operator (e.g., "TShift", "Multiplier")
    fn name(&self) -> &str;

    /// Wires the operator acts on, in matrix order
    fn wires(&self) -> &Wires;

    /// Relabel wires, producing a new operator
    fn map_wires(&self, map: &WireMap) -> Result<Op>;

    /// Clone into a shared handle
    fn to_op(&self) -> Op;

    /// Number of wires this operator acts on
    fn num_wires(&self) -> usize {
        self.wires().len()
    }

    /// Number of continuous parameters
    fn num_params(&self) -> usize {
        0
    }

    /// Local dimension of each wire (2 for qubits, 3 for qutrits)
    fn wire_dim(&self) -> usize {
        2
    }

    /// Whether the inversion flag is set
    fn is_inverted(&self) -> bool {
        false
    }

    /// Wires acting as controls
    fn control_wires(&self) -> Wires {
        Wires::empty()
    }

    /// Smallest n > 0 with op^n = I, when known
    fn cyclic_order(&self) -> Option<u32> {
        None
    }

    /// Typed configuration as a JSON value, used for equality and serialization
    fn hyperparameters(&self) -> Value {
        Value::Null
    }

    /// Operators nested inside this one
    fn children(&self) -> Vec<Op> {
        Vec::new()
    }

    /// Flattened linear-combination terms, for sum-like operators
    fn terms(&self) -> Option<Vec<(Complex64, Op)>> {
        None
    }

    /// Matrix in the computational basis of [`wires`](Operator::wires)
    fn matrix(&self) -> Result<Matrix> {
        let ops = self.decomposition()?;
        expand::sequence_matrix(&ops, self.wires(), self.wire_dim())
    }

    /// Eigenvalues of the operator
    fn eigenvalues(&self) -> Result<Vec<Complex64>> {
        let matrix = self.matrix()?;
        if matrix.is_diagonal() {
            Ok(matrix.diag())
        } else {
            Err(OperatorError::EigenvaluesUndefined(self.name().to_string()))
        }
    }

    /// Ordered sequence of simpler operators with the same action
    ///
    /// The first element is applied first.
    fn decomposition(&self) -> Result<Vec<Op>> {
        Err(OperatorError::DecompositionUndefined(self.name().to_string()))
    }

    /// Hermitian conjugate
    fn adjoint(&self) -> Op {
        Arc::new(Adjoint::new(self.to_op()))
    }

    /// Integer power as a sequence of operators
    fn pow(&self, z: i64) -> Result<Vec<Op>> {
        algebra::integer_pow(&self.to_op(), z, self.cyclic_order())
    }

    /// Route the decomposition into a recording sink
    fn decompose_into(&self, sink: &mut dyn Recorder) -> Result<()> {
        for op in self.decomposition()? {
            sink.record(op);
        }
        Ok(())
    }

    /// Human-readable form behind `Display`
    ///
    /// Defaults to `Name(wires=[..])`, with `†` after the name when inverted.
    /// Configured operators override this to show their configuration.
    fn fmt_label(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dagger = if self.is_inverted() { "†" } else { "" };
        write!(f, "{}{}(wires={})", self.name(), dagger, self.wires())
    }

    /// Serialized identity: name, wires, flag, configuration, children
    fn serialize(&self) -> SerializedOperator {
        SerializedOperator {
            name: self.name().to_string(),
            wires: self.wires().clone(),
            inverse: self.is_inverted(),
            hyperparameters: self.hyperparameters(),
            children: self.children().iter().map(|c| c.serialize()).collect(),
        }
    }
}

/// Conversion of concrete operators into shared handles
pub trait IntoOp {
    /// Wrap in an [`Op`]
    fn into_op(self) -> Op;
}

impl<T: Operator + 'static> IntoOp for T {
    fn into_op(self) -> Op {
        Arc::new(self)
    }
}

/// Structural equality: name, wires, inversion flag, configuration, children
pub fn equal(a: &dyn Operator, b: &dyn Operator) -> bool {
    a.serialize() == b.serialize()
}

impl PartialEq for dyn Operator {
    fn eq(&self, other: &Self) -> bool {
        equal(self, other)
    }
}

impl fmt::Display for dyn Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_label(f)
    }
}
