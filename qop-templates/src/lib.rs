//! Composite operator templates for qop
//!
//! Templates are operators defined by their decomposition into the gates of
//! `qop-gates`:
//! - [`Multiplier`]: in-place modular multiplication by a constant
//! - [`PrepSelPrep`]: block encoding of a linear combination of unitaries
//!
//! [`standard_registry`] rebuilds any gate or template from its serialized
//! form.

pub mod modular;
pub mod multiplier;
pub mod prepselprep;
pub mod registry;

pub use multiplier::{Multiplier, MultiplierConfig};
pub use prepselprep::{normalization_factor, preprocess_lcu, PrepSelPrep, PrepSelPrepConfig};
pub use registry::standard_registry;
