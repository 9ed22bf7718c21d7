//! Registration of gate constructors for deserialization

use crate::arithmetic::{PhaseAdder, PhaseAdderConfig};
use crate::controlled::{ControlConfig, ControlledSequence, Select};
use crate::fourier::Qft;
use crate::linear_combination::{LinearCombination, LinearCombinationConfig};
use crate::prod::Prod;
use crate::qutrit::{TAdd, TClock, TShift, TSwap};
use crate::standard::{
    GlobalPhase, GlobalPhaseConfig, Hadamard, Identity, PauliX, PauliY, PauliZ, QubitUnitary,
    QubitUnitaryConfig, Swap,
};
use crate::state_prep::{StatePrep, StatePrepConfig};
use qop_core::{IntoOp, Op, OperatorRegistry, Result, SerializedOperator};

/// Register every operator defined in this crate
///
/// # Example
/// ```
/// use qop_core::OperatorRegistry;
///
/// let mut registry = OperatorRegistry::new();
/// qop_gates::register_gates(&mut registry);
/// assert!(registry.contains("TShift"));
/// ```
pub fn register_gates(registry: &mut OperatorRegistry) {
    registry.register("TShift", |s, _| {
        Ok(TShift::new(s.wires.clone())?.with_inverse(s.inverse).into_op())
    });
    registry.register("TClock", |s, _| {
        Ok(TClock::new(s.wires.clone())?.with_inverse(s.inverse).into_op())
    });
    registry.register("TAdd", |s, _| {
        Ok(TAdd::new(s.wires.clone())?.with_inverse(s.inverse).into_op())
    });
    registry.register("TSwap", |s, _| {
        Ok(TSwap::new(s.wires.clone())?.with_inverse(s.inverse).into_op())
    });

    registry.register("Identity", |s, _| Ok(Identity::new(s.wires.clone())?.into_op()));
    registry.register("Hadamard", |s, _| Ok(Hadamard::new(s.wires.clone())?.into_op()));
    registry.register("PauliX", |s, _| Ok(PauliX::new(s.wires.clone())?.into_op()));
    registry.register("PauliY", |s, _| Ok(PauliY::new(s.wires.clone())?.into_op()));
    registry.register("PauliZ", |s, _| Ok(PauliZ::new(s.wires.clone())?.into_op()));
    registry.register("SWAP", |s, _| Ok(Swap::new(s.wires.clone())?.into_op()));

    registry.register("GlobalPhase", global_phase);
    registry.register("QubitUnitary", qubit_unitary);
    registry.register("QFT", |s, _| {
        Ok(Qft::new(s.wires.clone())?.with_inverse(s.inverse).into_op())
    });
    registry.register("PhaseAdder", phase_adder);
    registry.register("ControlledSequence", controlled_sequence);
    registry.register("Select", select);
    registry.register("StatePrep", state_prep);
    registry.register("Prod", prod);
    registry.register("LinearCombination", linear_combination);
}

fn global_phase(s: &SerializedOperator, _: &OperatorRegistry) -> Result<Op> {
    let config: GlobalPhaseConfig = s.config()?;
    Ok(GlobalPhase::new(config.phi, s.wires.clone()).into_op())
}

fn qubit_unitary(s: &SerializedOperator, _: &OperatorRegistry) -> Result<Op> {
    let config: QubitUnitaryConfig = s.config()?;
    Ok(QubitUnitary::from_config(config, s.wires.clone())?.into_op())
}

fn phase_adder(s: &SerializedOperator, _: &OperatorRegistry) -> Result<Op> {
    let config: PhaseAdderConfig = s.config()?;
    Ok(PhaseAdder::from_config(config, &s.wires)?.into_op())
}

fn controlled_sequence(s: &SerializedOperator, registry: &OperatorRegistry) -> Result<Op> {
    s.expect_children(1)?;
    let config: ControlConfig = s.config()?;
    let base = registry.deserialize(&s.children[0])?;
    Ok(ControlledSequence::new(base, config.control)?.into_op())
}

fn select(s: &SerializedOperator, registry: &OperatorRegistry) -> Result<Op> {
    let config: ControlConfig = s.config()?;
    let ops = registry.deserialize_children(s)?;
    Ok(Select::new(ops, config.control)?.into_op())
}

fn state_prep(s: &SerializedOperator, _: &OperatorRegistry) -> Result<Op> {
    let config: StatePrepConfig = s.config()?;
    Ok(StatePrep::new(&config.amplitudes, s.wires.clone())?.into_op())
}

fn prod(s: &SerializedOperator, registry: &OperatorRegistry) -> Result<Op> {
    Ok(Prod::new(registry.deserialize_children(s)?)?.into_op())
}

fn linear_combination(s: &SerializedOperator, registry: &OperatorRegistry) -> Result<Op> {
    let config: LinearCombinationConfig = s.config()?;
    let ops = registry.deserialize_children(s)?;
    Ok(LinearCombination::new(config.coeffs, ops)?.into_op())
}
