//! Block encoding of a linear combination of unitaries
//!
//! `PrepSelPrep` encodes `A = Σ cᵢ Uᵢ` as the top-left block of the unitary
//! `Prep† · Select · Prep`, where `Prep` loads the coefficient weights into
//! a control register and `Select` applies `Uᵢ` conditioned on `|i⟩`. The
//! encoded block is `A / Σ|cᵢ|`.

use num_complex::Complex64;
use qop_core::{IntoOp, Op, Operator, OperatorError, Result, WireMap, Wires};
use qop_gates::{required_control_wires, GlobalPhase, LinearCombination, Prod, Select, StatePrep};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Construction options for [`PrepSelPrep`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrepSelPrepConfig {
    /// Use the coefficients directly as state amplitudes
    ///
    /// No phase absorption or renormalization happens, so the number of terms
    /// must be a power of two and the coefficients must already be real,
    /// non-negative and of unit L2 norm.
    pub static_shape: bool,

    /// Tolerance for the coefficient checks of the static-shape path
    pub tolerance: f64,
}

impl Default for PrepSelPrepConfig {
    fn default() -> Self {
        Self {
            static_shape: false,
            tolerance: 1e-8,
        }
    }
}

/// Serialized hyperparameters of a [`PrepSelPrep`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PrepSelPrepParams {
    pub control: Wires,
    pub config: PrepSelPrepConfig,
}

/// Flatten `lcu` and absorb each coefficient phase into its operator
///
/// Returns the state-preparation amplitudes `√|cᵢ| / ‖√|c|‖` and the operators
/// `Uᵢ · GlobalPhase(-arg cᵢ)`, which equal `e^{i arg cᵢ} Uᵢ`.
///
/// # Errors
/// Returns error if the coefficients are all zero or an operator cannot be
/// combined with a qubit phase
pub fn preprocess_lcu(lcu: &dyn Operator) -> Result<(Vec<f64>, Vec<Op>)> {
    let terms = flat_terms(lcu);
    let roots: Vec<f64> = terms.iter().map(|(c, _)| c.norm().sqrt()).collect();
    let norm = roots.iter().map(|r| r * r).sum::<f64>().sqrt();
    if norm == 0.0 {
        return Err(OperatorError::InvalidAmplitudes(
            "all coefficients are zero".into(),
        ));
    }

    let amplitudes = roots.iter().map(|r| r / norm).collect();
    let ops = terms
        .iter()
        .map(|(c, op)| -> Result<Op> {
            let phase = GlobalPhase::new(-c.arg(), op.wires().clone());
            Ok(Prod::pair(op.clone(), phase.into_op())?.into_op())
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((amplitudes, ops))
}

/// Block-encoding normalization `Σ |cᵢ|` of the flattened terms
pub fn normalization_factor(lcu: &dyn Operator) -> f64 {
    flat_terms(lcu).iter().map(|(c, _)| c.norm()).sum()
}

fn flat_terms(lcu: &dyn Operator) -> Vec<(Complex64, Op)> {
    lcu.terms()
        .unwrap_or_else(|| vec![(Complex64::new(1.0, 0.0), lcu.to_op())])
}

/// Prepare-select-prepare block encoding
///
/// Wires are the control register followed by the LCU wires, so the encoded
/// operator sits in the top-left block of the matrix.
///
/// # Example
///
/// ```
/// use qop_core::{IntoOp, Operator, Wires};
/// use qop_gates::{LinearCombination, PauliX, PauliZ};
/// use qop_templates::PrepSelPrep;
///
/// let lcu = LinearCombination::from_real(
///     &[0.25, 0.75],
///     vec![
///         PauliZ::new(Wires::indices([1]).unwrap()).unwrap().into_op(),
///         PauliX::new(Wires::indices([1]).unwrap()).unwrap().into_op(),
///     ],
/// )
/// .unwrap();
/// let op = PrepSelPrep::new(lcu, Wires::indices([0]).unwrap()).unwrap();
///
/// let names: Vec<_> = op.decomposition().unwrap().iter().map(|o| o.name().to_string()).collect();
/// assert_eq!(names, ["StatePrep", "Select", "Adjoint"]);
/// ```
#[derive(Debug, Clone)]
pub struct PrepSelPrep {
    lcu: LinearCombination,
    control: Wires,
    config: PrepSelPrepConfig,
    coeffs: Vec<Complex64>,
    ops: Vec<Op>,
    target: Wires,
    wires: Wires,
    prep: StatePrep,
    select: Select,
}

impl PrepSelPrep {
    /// Block-encode `lcu` using `control` as the selection register
    pub fn new(lcu: LinearCombination, control: Wires) -> Result<Self> {
        Self::with_config(lcu, control, PrepSelPrepConfig::default())
    }

    /// Block-encode with explicit options
    ///
    /// # Errors
    /// - `ControlOverlap` if a control wire is used by the LCU
    /// - `TermCountNotPowerOfTwo`, `NonPositiveCoefficients`,
    ///   `CoefficientsNotNormalized` for invalid static-shape input
    /// - `InsufficientControlWires` if the control register cannot index
    ///   every term
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(controls = control.len(), static_shape = config.static_shape)
    )]
    pub fn with_config(
        lcu: LinearCombination,
        control: Wires,
        config: PrepSelPrepConfig,
    ) -> Result<Self> {
        let target = lcu.wires().clone();
        if let Some(wire) = control.first_shared(&target) {
            return Err(OperatorError::ControlOverlap(wire.clone()));
        }

        let terms = flat_terms(&lcu);
        let (coeffs, ops): (Vec<Complex64>, Vec<Op>) = terms.into_iter().unzip();

        let (amplitudes, select_ops) = if config.static_shape {
            check_static_coefficients(&coeffs, config.tolerance)?;
            (coeffs.iter().map(|c| c.re).collect(), ops.clone())
        } else {
            preprocess_lcu(&lcu)?
        };

        let required = required_control_wires(select_ops.len());
        if control.len() < required {
            return Err(OperatorError::InsufficientControlWires {
                terms: select_ops.len(),
                required,
                actual: control.len(),
            });
        }

        let prep = StatePrep::from_real(&amplitudes, control.clone())?;
        let select = Select::new(select_ops, control.clone())?;
        let wires = control.concat(&target)?;
        debug!(terms = coeffs.len(), "built block encoding");

        Ok(Self {
            lcu,
            control,
            config,
            coeffs,
            ops,
            target,
            wires,
            prep,
            select,
        })
    }

    /// Encoded linear combination
    pub fn lcu(&self) -> &LinearCombination {
        &self.lcu
    }

    /// Flattened coefficients
    pub fn coeffs(&self) -> &[Complex64] {
        &self.coeffs
    }

    /// Flattened operators
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Selection register
    pub fn control(&self) -> &Wires {
        &self.control
    }

    /// Wires of the encoded operator
    pub fn target_wires(&self) -> &Wires {
        &self.target
    }

    /// Construction options
    pub fn config(&self) -> &PrepSelPrepConfig {
        &self.config
    }
}

fn check_static_coefficients(coeffs: &[Complex64], tolerance: f64) -> Result<()> {
    if !coeffs.len().is_power_of_two() {
        return Err(OperatorError::TermCountNotPowerOfTwo(coeffs.len()));
    }
    if let Some((index, c)) = coeffs
        .iter()
        .enumerate()
        .find(|(_, c)| c.im.abs() > tolerance || c.re < -tolerance)
    {
        return Err(OperatorError::NonPositiveCoefficients {
            index,
            value: c.to_string(),
        });
    }
    let norm_sqr: f64 = coeffs.iter().map(|c| c.re * c.re).sum();
    if (norm_sqr - 1.0).abs() > tolerance {
        return Err(OperatorError::CoefficientsNotNormalized(norm_sqr.sqrt()));
    }
    Ok(())
}

impl Operator for PrepSelPrep {
    fn name(&self) -> &str {
        "PrepSelPrep"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn control_wires(&self) -> Wires {
        self.control.clone()
    }

    fn hyperparameters(&self) -> Value {
        let params = PrepSelPrepParams {
            control: self.control.clone(),
            config: self.config,
        };
        serde_json::to_value(params).unwrap_or(Value::Null)
    }

    fn children(&self) -> Vec<Op> {
        vec![self.lcu.to_op()]
    }

    fn fmt_label(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrepSelPrep(coeffs=(")?;
        for (i, c) in self.coeffs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if c.im == 0.0 {
                write!(f, "{}", c.re)?;
            } else {
                write!(f, "{}", c)?;
            }
        }
        write!(f, "), ops=(")?;
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", op)?;
        }
        write!(f, "), control={})", self.control)
    }

    fn decomposition(&self) -> Result<Vec<Op>> {
        Ok(vec![
            self.prep.to_op(),
            self.select.to_op(),
            self.prep.adjoint(),
        ])
    }

    fn map_wires(&self, map: &WireMap) -> Result<Op> {
        let ops = self
            .lcu
            .ops()
            .iter()
            .map(|op| op.map_wires(map))
            .collect::<Result<Vec<_>>>()?;
        let lcu = LinearCombination::new(self.lcu.coeffs().to_vec(), ops)?;
        Ok(Arc::new(Self::with_config(
            lcu,
            self.control.map(map)?,
            self.config,
        )?))
    }

    fn to_op(&self) -> Op {
        Arc::new(self.clone())
    }
}

impl fmt::Display for PrepSelPrep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_label(f)
    }
}
