//! Error types for qop

use crate::Wire;
use thiserror::Error;

/// Errors raised while constructing or querying operators
///
/// Construction-time variants (arity and configuration errors) are raised
/// eagerly; an operator that was built successfully never produces them later.
#[derive(Debug, Error)]
pub enum OperatorError {
    /// Operator applied to the wrong number of wires
    #[error("Operator '{operator}' requires {expected} wires, but {actual} were provided")]
    InvalidWireCount {
        operator: String,
        expected: usize,
        actual: usize,
    },

    /// Same wire listed twice in one wire list
    #[error("Duplicate wire {0} in operator wires")]
    DuplicateWire(Wire),

    /// Wire is not part of the wire order used for matrix building
    #[error("Wire {0} is not part of the wire order")]
    WireNotFound(Wire),

    /// A wire used in two roles that must stay disjoint
    #[error("None of the wires in {second} should be included in {first} (wire {wire})")]
    WireOverlap {
        first: &'static str,
        second: &'static str,
        wire: Wire,
    },

    /// Work register too small for the requested arithmetic
    #[error("{operator} needs at least {required} work wires, but {actual} were provided")]
    InsufficientWorkWires {
        operator: String,
        required: usize,
        actual: usize,
    },

    /// Register cannot hold every residue of the modulus
    #[error("{operator} must have enough wires to represent mod: {modulus} > 2^{width}")]
    RegisterTooSmall {
        operator: String,
        modulus: u64,
        width: usize,
    },

    /// Modulus of zero
    #[error("Modulus must be a positive integer")]
    ZeroModulus,

    /// Multiplier has no inverse modulo the modulus
    #[error("The operator cannot be built because k = {k} has no inverse modulo {modulus}")]
    NonInvertibleMultiplier { k: u64, modulus: u64 },

    /// Control register shares wires with the target operators
    #[error("Control wires should be different from operation wires (wire {0})")]
    ControlOverlap(Wire),

    /// Control register cannot index every term
    #[error("Not enough control wires ({actual}) for {terms} terms, need {required}")]
    InsufficientControlWires {
        terms: usize,
        required: usize,
        actual: usize,
    },

    /// Static-shape block encoding requires a power-of-two term count
    #[error("Number of terms must be a power of 2, got {0}")]
    TermCountNotPowerOfTwo(usize),

    /// Static-shape block encoding requires non-negative real coefficients
    #[error("Coefficients must be positive real numbers (coefficient {index} is {value})")]
    NonPositiveCoefficients { index: usize, value: String },

    /// Static-shape block encoding requires L2-normalized coefficients
    #[error("Coefficients must have norm 1, got {0}")]
    CoefficientsNotNormalized(f64),

    /// Amplitude vector empty, too long, or zero
    #[error("Invalid amplitudes: {0}")]
    InvalidAmplitudes(String),

    /// Matrix supplied for a unitary is not unitary
    #[error("Matrix is not unitary: max deviation {max_deviation:.2e}")]
    NotUnitary { max_deviation: f64 },

    /// Matrix dimensions do not fit the wires they act on
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Integer power would expand into too many operators
    #[error("Power {exponent} exceeds the limit of {limit} repeated operators")]
    PowerTooLarge { exponent: i64, limit: u64 },

    /// Operator has no decomposition into simpler operators
    #[error("Operator '{0}' has no decomposition")]
    DecompositionUndefined(String),

    /// Operator has no closed-form eigenvalues
    #[error("Operator '{0}' has no eigenvalue representation")]
    EigenvaluesUndefined(String),

    /// Registry has no factory for this operator name
    #[error("Unknown operator type: {0}")]
    UnknownOperator(String),

    /// Serialized form could not be converted
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl OperatorError {
    /// Create an invalid wire count error
    pub fn invalid_wire_count(operator: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InvalidWireCount {
            operator: operator.into(),
            expected,
            actual,
        }
    }

    /// Create an insufficient work wires error
    pub fn insufficient_work_wires(
        operator: impl Into<String>,
        required: usize,
        actual: usize,
    ) -> Self {
        Self::InsufficientWorkWires {
            operator: operator.into(),
            required,
            actual,
        }
    }

    /// Create a register-too-small error
    pub fn register_too_small(operator: impl Into<String>, modulus: u64, width: usize) -> Self {
        Self::RegisterTooSmall {
            operator: operator.into(),
            modulus,
            width,
        }
    }

    /// Whether this error was raised by construction-time validation
    pub fn is_configuration_error(&self) -> bool {
        !matches!(
            self,
            Self::DecompositionUndefined(_)
                | Self::EigenvaluesUndefined(_)
                | Self::PowerTooLarge { .. }
                | Self::WireNotFound(_)
                | Self::DimensionMismatch { .. }
                | Self::UnknownOperator(_)
                | Self::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for OperatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
