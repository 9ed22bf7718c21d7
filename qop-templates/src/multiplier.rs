//! In-place modular multiplication
//!
//! `Multiplier(k, m)|x⟩ = |x·k mod m⟩` for `x < m`, built from Fourier-basis
//! phase additions (arXiv:2311.08555). The product is accumulated into an
//! auxiliary register, swapped into place, and the auxiliary register is
//! cleaned up by subtracting `x·k⁻¹`.

use crate::modular::{gcd, mod_inverse};
use qop_core::{IntoOp, Op, Operator, OperatorError, Result, Wire, WireMap, Wires};
use qop_gates::arithmetic::{is_full_register, register_capacity};
use qop_gates::{ControlledSequence, PhaseAdder, Qft, Swap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Validated configuration of a [`Multiplier`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplierConfig {
    /// Multiplier, reduced modulo `modulus`
    pub k: u64,
    /// Modulus of the multiplication
    pub modulus: u64,
    /// Register holding x
    pub x_wires: Wires,
    /// Auxiliary register
    pub work_wires: Wires,
}

/// Roles of the work wires inside the decomposition
#[derive(Debug, Clone)]
struct Registers {
    /// Extra wire for the modular phase adder, only when m ≠ 2^n
    work_aux: Option<Wire>,
    /// Register the product is accumulated into
    aux: Wires,
    /// Part of `aux` swapped with the x register
    swap: Wires,
}

/// Modular multiplication by a constant
///
/// # Example
///
/// ```
/// use qop_core::expand::{apply_sequence, basis_state, dominant_basis_index};
/// use qop_core::{Operator, Wires};
/// use qop_templates::Multiplier;
///
/// // 3·5 mod 8 = 7
/// let x = Wires::indices([0, 1, 2]).unwrap();
/// let work = Wires::indices([3, 4, 5]).unwrap();
/// let op = Multiplier::new(5, x, None, work).unwrap();
///
/// let state = basis_state(&[0, 1, 1, 0, 0, 0], 2);
/// let out = apply_sequence(&state, &op.decomposition().unwrap(), op.wires(), 2).unwrap();
/// assert_eq!(dominant_basis_index(&out, 1e-8), Some(0b111_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multiplier {
    config: MultiplierConfig,
    wires: Wires,
}

impl Multiplier {
    /// Build the multiplier
    ///
    /// `modulus` defaults to 2^|x_wires|. Checks run in this order:
    /// 1. `x_wires` and `work_wires` are disjoint
    /// 2. a modulus other than 2^n needs n + 2 work wires
    /// 3. at least n work wires
    /// 4. 2^n ≥ modulus
    /// 5. `k` is invertible modulo `modulus`
    ///
    /// # Errors
    /// Returns the first violated check
    pub fn new(k: u64, x_wires: Wires, modulus: Option<u64>, work_wires: Wires) -> Result<Self> {
        let n = x_wires.len();
        if n == 0 {
            return Err(OperatorError::invalid_wire_count("Multiplier", 1, 0));
        }
        if let Some(wire) = work_wires.first_shared(&x_wires) {
            return Err(OperatorError::WireOverlap {
                first: "x_wires",
                second: "work_wires",
                wire: wire.clone(),
            });
        }

        let modulus = match modulus {
            Some(0) => return Err(OperatorError::ZeroModulus),
            Some(m) => m,
            None => register_capacity(n)
                .ok_or_else(|| OperatorError::register_too_small("Multiplier", u64::MAX, n))?,
        };
        if !is_full_register(modulus, n) && work_wires.len() < n + 2 {
            return Err(OperatorError::insufficient_work_wires(
                "Multiplier",
                n + 2,
                work_wires.len(),
            ));
        }
        if work_wires.len() < n {
            return Err(OperatorError::insufficient_work_wires(
                "Multiplier",
                n,
                work_wires.len(),
            ));
        }
        if register_capacity(n).map_or(false, |capacity| modulus > capacity) {
            return Err(OperatorError::register_too_small("Multiplier", modulus, n));
        }

        let k = k % modulus;
        if gcd(k, modulus) != 1 {
            return Err(OperatorError::NonInvertibleMultiplier { k, modulus });
        }

        let wires = x_wires.concat(&work_wires)?;
        Ok(Self {
            config: MultiplierConfig {
                k,
                modulus,
                x_wires,
                work_wires,
            },
            wires,
        })
    }

    /// Rebuild from a configuration, re-running validation
    pub fn from_config(config: MultiplierConfig) -> Result<Self> {
        Self::new(
            config.k,
            config.x_wires,
            Some(config.modulus),
            config.work_wires,
        )
    }

    /// Reduced multiplier
    pub fn k(&self) -> u64 {
        self.config.k
    }

    /// Modulus
    pub fn modulus(&self) -> u64 {
        self.config.modulus
    }

    /// Register holding x
    pub fn x_wires(&self) -> &Wires {
        &self.config.x_wires
    }

    /// Auxiliary register
    pub fn work_wires(&self) -> &Wires {
        &self.config.work_wires
    }

    /// Validated configuration
    pub fn config(&self) -> &MultiplierConfig {
        &self.config
    }

    fn registers(&self) -> Registers {
        let n = self.config.x_wires.len();
        let work = &self.config.work_wires;
        if is_full_register(self.config.modulus, n) {
            let aux = work.slice(0..n);
            Registers {
                work_aux: None,
                swap: aux.clone(),
                aux,
            }
        } else {
            // one extra aux wire absorbs the overflow of x·k before reduction
            let aux = work.slice(1..n + 2);
            Registers {
                work_aux: Some(work[0].clone()),
                swap: aux.slice(1..n + 1),
                aux,
            }
        }
    }

    /// `|x⟩|0⟩ → |x⟩|x·k mod m⟩` on the auxiliary register
    fn multiply_out(&self, k: u64, registers: &Registers) -> Result<Vec<Op>> {
        let qft = Qft::new(registers.aux.clone())?;
        let adder = PhaseAdder::new(
            k,
            registers.aux.clone(),
            Some(self.config.modulus),
            registers.work_aux.clone(),
        )?;
        Ok(vec![
            qft.clone().into_op(),
            ControlledSequence::new(adder.into_op(), self.config.x_wires.clone())?.into_op(),
            qft.with_inverse(true).into_op(),
        ])
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(k = self.config.k, modulus = self.config.modulus, width = self.config.x_wires.len())
    )]
    fn build_decomposition(&self) -> Result<Vec<Op>> {
        let registers = self.registers();
        let mut ops = self.multiply_out(self.config.k, &registers)?;

        for (x, aux) in self.config.x_wires.iter().zip(&registers.swap) {
            ops.push(Swap::new(Wires::new([x.clone(), aux.clone()])?)?.into_op());
        }

        let inverse = mod_inverse(self.config.k, self.config.modulus).ok_or(
            OperatorError::NonInvertibleMultiplier {
                k: self.config.k,
                modulus: self.config.modulus,
            },
        )?;
        let uncompute = self.multiply_out(inverse, &registers)?;
        ops.extend(uncompute.iter().rev().map(|op| op.adjoint()));

        debug!(operations = ops.len(), inverse, "decomposed multiplier");
        Ok(ops)
    }
}

impl Operator for Multiplier {
    fn name(&self) -> &str {
        "Multiplier"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn hyperparameters(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or(Value::Null)
    }

    fn fmt_label(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Multiplier(k={}, mod={}, x_wires={}, work_wires={})",
            self.config.k, self.config.modulus, self.config.x_wires, self.config.work_wires
        )
    }

    fn decomposition(&self) -> Result<Vec<Op>> {
        self.build_decomposition()
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        Ok(Arc::new(Self::from_config(MultiplierConfig {
            x_wires: self.config.x_wires.map(map)?,
            work_wires: self.config.work_wires.map(map)?,
            ..self.config.clone()
        })?))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_label(f)
    }
}
