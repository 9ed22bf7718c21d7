//! Operator library for qop
//!
//! This crate provides the concrete operators that templates decompose into:
//!
//! - **Qutrit primitives**: [`TShift`], [`TClock`], [`TAdd`], [`TSwap`]
//! - **Qubit gates**: [`Identity`], [`Hadamard`], [`PauliX`], [`PauliY`],
//!   [`PauliZ`], [`Swap`], [`GlobalPhase`], [`QubitUnitary`]
//! - **Building blocks**: [`Qft`], [`PhaseAdder`], [`ControlledSequence`],
//!   [`Select`], [`StatePrep`]
//! - **Operator arithmetic**: [`Prod`], [`LinearCombination`]
//!
//! Fixed matrices live in [`matrices`] as compile-time constants.
//!
//! # Example
//!
//! ```
//! use qop_core::{Operator, Wires};
//! use qop_gates::TShift;
//!
//! let shift = TShift::new(Wires::indices([0]).unwrap()).unwrap();
//! let m = shift.matrix().unwrap();
//! assert_eq!(m.dim(), 3);
//! // TShift³ = I, so the square is the adjoint
//! assert!(shift.pow(2).unwrap()[0].is_inverted());
//! ```

pub mod arithmetic;
pub mod controlled;
pub mod fourier;
pub mod linear_combination;
pub mod matrices;
pub mod prod;
pub mod qutrit;
pub mod registry;
pub mod standard;
pub mod state_prep;

pub use arithmetic::{PhaseAdder, PhaseAdderConfig};
pub use controlled::{required_control_wires, ControlConfig, ControlledSequence, Select};
pub use fourier::Qft;
pub use linear_combination::{LinearCombination, LinearCombinationConfig};
pub use prod::Prod;
pub use qutrit::{TAdd, TClock, TShift, TSwap, QUTRIT_DIM};
pub use registry::register_gates;
pub use standard::{
    GlobalPhase, GlobalPhaseConfig, Hadamard, Identity, PauliX, PauliY, PauliZ, QubitUnitary,
    QubitUnitaryConfig, Swap,
};
pub use state_prep::{StatePrep, StatePrepConfig};
