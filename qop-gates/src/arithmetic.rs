//! Modular addition in the Fourier basis

use crate::matrices;
use qop_core::{Matrix, Op, Operator, OperatorError, Result, Wire, WireMap, Wires};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Number of basis states of a `width`-qubit register, `None` past `u64`
pub fn register_capacity(width: usize) -> Option<u64> {
    u32::try_from(width)
        .ok()
        .and_then(|w| 1u64.checked_shl(w))
}

/// Whether a register of `width` qubits holds exactly `modulus` states
pub fn is_full_register(modulus: u64, width: usize) -> bool {
    register_capacity(width) == Some(modulus)
}

/// Configuration of a [`PhaseAdder`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseAdderConfig {
    /// Addend, reduced modulo `modulus`
    pub k: u64,
    /// Modulus of the addition
    pub modulus: u64,
    /// Auxiliary wire for moduli other than 2^n
    #[serde(default)]
    pub work_wire: Option<Wire>,
}

/// Adds `k` modulo `m` to a register held in the Fourier basis
///
/// With F the Fourier transform over `x_wires`, the action is F·P_k·F† where
/// P_k maps x → (x + k) mod m for x < m and leaves larger values unchanged.
/// The work wire, when present, is the last wire and is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseAdder {
    config: PhaseAdderConfig,
    x_wires: Wires,
    wires: Wires,
}

impl PhaseAdder {
    /// Build the adder
    ///
    /// `modulus` defaults to 2^|x_wires|.
    ///
    /// # Errors
    /// - `InsufficientWorkWires` when the modulus is not 2^|x_wires| and no
    ///   work wire is given
    /// - `WireOverlap` when the work wire is one of `x_wires`
    /// - `RegisterTooSmall` when 2^|x_wires| < modulus
    pub fn new(
        k: u64,
        x_wires: Wires,
        modulus: Option<u64>,
        work_wire: Option<Wire>,
    ) -> Result<Self> {
        let width = x_wires.len();
        let modulus = match modulus {
            Some(m) => m,
            None => register_capacity(width)
                .ok_or_else(|| OperatorError::register_too_small("PhaseAdder", u64::MAX, width))?,
        };
        if modulus == 0 {
            return Err(OperatorError::ZeroModulus);
        }
        if !is_full_register(modulus, width) && work_wire.is_none() {
            return Err(OperatorError::insufficient_work_wires("PhaseAdder", 1, 0));
        }
        if let Some(work) = &work_wire {
            if x_wires.contains(work) {
                return Err(OperatorError::WireOverlap {
                    first: "x_wires",
                    second: "work_wire",
                    wire: work.clone(),
                });
            }
        }
        if register_capacity(width).map_or(false, |capacity| modulus > capacity) {
            return Err(OperatorError::register_too_small("PhaseAdder", modulus, width));
        }

        let wires = match &work_wire {
            Some(work) => x_wires.concat(&Wires::unchecked([work.clone()]))?,
            None => x_wires.clone(),
        };
        Ok(Self {
            config: PhaseAdderConfig {
                k: k % modulus,
                modulus,
                work_wire,
            },
            x_wires,
            wires,
        })
    }

    /// Rebuild from a serialized configuration and the full wire list
    pub fn from_config(config: PhaseAdderConfig, wires: &Wires) -> Result<Self> {
        let x_wires = Wires::unchecked(
            wires
                .iter()
                .filter(|w| Some(*w) != config.work_wire.as_ref())
                .cloned(),
        );
        Self::new(config.k, x_wires, Some(config.modulus), config.work_wire)
    }

    /// Reduced addend
    pub fn k(&self) -> u64 {
        self.config.k
    }

    /// Modulus
    pub fn modulus(&self) -> u64 {
        self.config.modulus
    }

    /// Target register
    pub fn x_wires(&self) -> &Wires {
        &self.x_wires
    }

    /// Auxiliary wire, if any
    pub fn work_wire(&self) -> Option<&Wire> {
        self.config.work_wire.as_ref()
    }

    /// Configuration
    pub fn config(&self) -> &PhaseAdderConfig {
        &self.config
    }
}

impl Operator for PhaseAdder {
    fn name(&self) -> &str {
        "PhaseAdder"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn hyperparameters(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or(Value::Null)
    }

    fn matrix(&self) -> Result<Matrix> {
        let width = self.x_wires.len();
        let size = 1usize << width;
        let fourier = Matrix::from_vec(matrices::fourier(width))?;
        let shift = Matrix::permutation(&matrices::modular_shift(
            size,
            self.config.k,
            self.config.modulus,
        ));
        let core = fourier.matmul(&shift)?.matmul(&fourier.dagger())?;
        Ok(if self.config.work_wire.is_some() {
            core.kron(&Matrix::identity(2))
        } else {
            core
        })
    }

    fn adjoint(&self) -> Op {
        let m = self.config.modulus;
        Arc::new(Self {
            config: PhaseAdderConfig {
                k: (m - self.config.k) % m,
                ..self.config.clone()
            },
            ..self.clone()
        })
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        let work_wire = self
            .config
            .work_wire
            .as_ref()
            .map(|w| map.get(w).cloned().unwrap_or_else(|| w.clone()));
        Ok(Arc::new(Self::new(
            self.config.k,
            self.x_wires.map(map)?,
            Some(self.config.modulus),
            work_wire,
        )?))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}
