//! Core types and traits for the qop operator library
//!
//! This crate provides the fundamental types for describing quantum operators:
//! - [`Wire`] / [`Wires`]: subsystem addressing
//! - [`Operator`]: capability interface (matrix, eigenvalues, decomposition,
//!   adjoint, integer powers)
//! - [`Matrix`]: dense complex matrices in the computational basis
//! - [`Tape`]: explicit recording sink for emitted operators
//! - [`OperatorRegistry`]: reconstruction of operators from their serialized identity
//!
//! # Example
//! ```
//! use qop_core::{Wire, Wires};
//!
//! let wires = Wires::new([Wire::from(0), Wire::from("ancilla")]).unwrap();
//! assert_eq!(wires.len(), 2);
//! ```

pub mod adjoint;
pub mod algebra;
pub mod error;
pub mod expand;
pub mod matrix;
pub mod operator;
pub mod recording;
pub mod serialization;
pub mod wire;

// Re-exports for convenience
pub use adjoint::Adjoint;
pub use error::OperatorError;
pub use matrix::Matrix;
pub use num_complex::Complex64;
pub use operator::{equal, IntoOp, Op, Operator};
pub use recording::{Recorder, Tape};
pub use serialization::{OperatorFactory, OperatorRegistry, SerializedOperator};
pub use wire::{wire_map, Wire, WireMap, Wires};

/// Type alias for results in qop
pub type Result<T> = std::result::Result<T, OperatorError>;

/// Default numerical tolerance for matrix and coefficient checks
pub const DEFAULT_TOLERANCE: f64 = 1e-10;
