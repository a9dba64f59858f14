// src/simulation/mod.rs

//! Executes `pumpq::circuits::Circuit` values.
//!
//! Two execution paths are provided:
//! - [`evaluate`] runs the gates on a classical [`Register`]. This is the
//!   reference evaluator: pure, total and cheap.
//! - [`Simulator`] runs the gates on a `2^N` amplitude vector and samples
//!   shot counts, mirroring how a state-vector backend would report results.
//!   With the flip-only gate set the counts always collapse to one outcome.

mod results;
pub(crate) mod engine;

pub use results::SimulationResult;

use crate::circuits::Circuit;
use crate::core::{PumpqError, Register};
use crate::validation::{check_normalization, validate_circuit};
use engine::StateVectorEngine;
use tracing::{debug, trace};

/// Runs every gate of `circuit` on a fresh zeroed register after writing the
/// encoded inputs, and returns the final register.
///
/// # Panics
/// Panics if the circuit refers to bits outside its width. Circuits from
/// `CircuitBuilder::build` and the pump constructors never do.
pub fn evaluate_register(circuit: &Circuit) -> Register {
    let mut register = Register::zeroed(circuit.width());
    for (bit, value) in circuit.encoding() {
        register.set(*bit, *value);
    }
    for gate in circuit.gates() {
        gate.apply(&mut register);
        trace!(%gate, register = %register, "applied gate");
    }
    register
}

/// Evaluates `circuit` and reads back every declared output, in order.
pub fn evaluate_outputs(circuit: &Circuit) -> Vec<bool> {
    let register = evaluate_register(circuit);
    circuit.outputs().iter().map(|bit| register.get(*bit)).collect()
}

/// Evaluates a two-output circuit and returns `(first, second)`; for the pump
/// circuit that is `(A1, A5)`.
///
/// Deterministic and side-effect free: the register lives only for the call.
///
/// # Panics
/// Panics if the circuit declares fewer than two outputs. Use
/// [`try_evaluate`] for circuits of unknown shape.
pub fn evaluate(circuit: &Circuit) -> (bool, bool) {
    let outputs = evaluate_outputs(circuit);
    debug!(outputs = ?outputs, gates = circuit.len(), "evaluated circuit");
    match outputs.as_slice() {
        [first, second, ..] => (*first, *second),
        _ => panic!("evaluate requires two outputs, circuit declares {}", outputs.len()),
    }
}

/// Checked form of [`evaluate`].
///
/// # Errors
/// * Any error from `validate_circuit`.
/// * `PumpqError::InvalidOperation` if the circuit does not declare exactly two outputs.
pub fn try_evaluate(circuit: &Circuit) -> Result<(bool, bool), PumpqError> {
    validate_circuit(circuit)?;
    if circuit.outputs().len() != 2 {
        return Err(PumpqError::InvalidOperation {
            message: format!("expected exactly two outputs, circuit declares {}", circuit.outputs().len()),
        });
    }
    Ok(evaluate(circuit))
}

/// Settings for the state-vector [`Simulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Number of measurement samples per run.
    pub shots: usize,
    /// Seed for the sampling PRNG.
    pub seed: u64,
    /// Largest register width accepted (the state vector holds `2^width` amplitudes).
    pub max_width: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self { shots: 1024, seed: 0x5eed, max_width: 20 }
    }
}

/// Shot-based state-vector simulator.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator with explicit settings.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Settings this simulator runs with.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Runs `circuit` and samples its outputs.
    ///
    /// The encoded inputs select the initial basis state; every gate permutes
    /// the amplitudes; the outputs are then sampled `shots` times.
    ///
    /// # Errors
    /// * Any error from `validate_circuit`.
    /// * `PumpqError::RegisterTooLarge` if the width exceeds `max_width`, or
    ///   exceeds what a `usize` basis index can address whatever `max_width` is.
    /// * `PumpqError::InvalidOperation` if `shots` is zero or the circuit has no outputs.
    /// * `PumpqError::Incoherence` if the amplitudes lose normalization.
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult, PumpqError> {
        validate_circuit(circuit)?;
        if circuit.width() > self.config.max_width {
            return Err(PumpqError::RegisterTooLarge { width: circuit.width(), limit: self.config.max_width });
        }
        if self.config.shots == 0 {
            return Err(PumpqError::InvalidOperation { message: "shots must be at least 1".to_string() });
        }
        if circuit.outputs().is_empty() {
            return Err(PumpqError::InvalidOperation { message: "circuit declares no outputs to measure".to_string() });
        }

        // 2^width amplitudes must be addressable by a usize index
        let addressable = usize::BITS as usize - 1;
        if circuit.width() > addressable {
            return Err(PumpqError::RegisterTooLarge { width: circuit.width(), limit: addressable });
        }
        let initial_index = circuit
            .initial_basis_index()
            .ok_or(PumpqError::RegisterTooLarge { width: circuit.width(), limit: addressable })?;

        let mut engine = StateVectorEngine::init(circuit.width(), initial_index)?;
        for gate in circuit.gates() {
            engine.apply_gate(gate)?;
        }
        check_normalization(engine.state(), None)?;

        let result = engine.sample(circuit.outputs(), self.config.shots, self.config.seed)?;
        debug!(
            width = circuit.width(),
            gates = circuit.len(),
            shots = self.config.shots,
            outcomes = result.counts().len(),
            "state-vector run finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::core::BitId;

    fn qid(i: usize) -> BitId {
        BitId(i)
    }

    fn toffoli_circuit(a: bool, b: bool) -> Circuit {
        CircuitBuilder::new(3)
            .encode(qid(0), a)
            .encode(qid(1), b)
            .ccx(qid(0), qid(1), qid(2))
            .measure(qid(2))
            .measure(qid(0))
            .build_unchecked()
    }

    #[test]
    fn test_evaluate_truth_table() {
        for a in [false, true] {
            for b in [false, true] {
                assert_eq!(evaluate(&toffoli_circuit(a, b)), (a && b, a));
            }
        }
    }

    #[test]
    fn test_evaluate_register_leaves_ancilla_state() {
        let circuit = CircuitBuilder::new(3)
            .encode(qid(0), true)
            .cx(qid(0), qid(1))
            .cx(qid(1), qid(2))
            .measure(qid(2))
            .build_unchecked();
        let register = evaluate_register(&circuit);
        assert_eq!(register.bits(), &[true, true, true]);
    }

    #[test]
    fn test_try_evaluate_rejects_wrong_output_count() {
        let circuit = CircuitBuilder::new(2).measure(qid(0)).build_unchecked();
        assert!(matches!(try_evaluate(&circuit), Err(PumpqError::InvalidOperation { .. })));
    }

    #[test]
    fn test_try_evaluate_rejects_invalid_circuit() {
        let circuit = CircuitBuilder::new(2).cx(qid(0), qid(0)).measure(qid(0)).measure(qid(1)).build_unchecked();
        assert!(matches!(try_evaluate(&circuit), Err(PumpqError::DuplicateOperand { .. })));
    }

    #[test]
    fn test_simulator_matches_register() -> Result<(), PumpqError> {
        let simulator = Simulator::new();
        for a in [false, true] {
            for b in [false, true] {
                let circuit = toffoli_circuit(a, b);
                let result = simulator.run(&circuit)?;
                assert!(result.is_deterministic());
                assert_eq!(result.shots(), 1024);
                assert_eq!(result.most_frequent(), Some(evaluate_outputs(&circuit).as_slice()));
            }
        }
        Ok(())
    }

    #[test]
    fn test_simulator_limits() {
        let circuit = toffoli_circuit(true, true);

        let narrow = Simulator::with_config(SimulatorConfig { max_width: 2, ..Default::default() });
        assert!(matches!(narrow.run(&circuit), Err(PumpqError::RegisterTooLarge { width: 3, limit: 2 })));

        let no_shots = Simulator::with_config(SimulatorConfig { shots: 0, ..Default::default() });
        assert!(matches!(no_shots.run(&circuit), Err(PumpqError::InvalidOperation { .. })));

        let unmeasured = CircuitBuilder::new(1).x(qid(0)).build_unchecked();
        assert!(matches!(Simulator::new().run(&unmeasured), Err(PumpqError::InvalidOperation { .. })));
    }

    #[test]
    fn test_wide_register_is_rejected_not_overflowed() -> Result<(), PumpqError> {
        let circuit = CircuitBuilder::new(70).encode(qid(65), true).measure(qid(65)).build()?;
        let generous = Simulator::with_config(SimulatorConfig { max_width: 80, ..Default::default() });
        match generous.run(&circuit) {
            Err(PumpqError::RegisterTooLarge { width, limit }) => {
                assert_eq!(width, 70);
                assert_eq!(limit, usize::BITS as usize - 1);
            }
            other => panic!("expected RegisterTooLarge, got {:?}", other),
        }
        assert_eq!(circuit.initial_basis_index(), None);
        Ok(())
    }
}
