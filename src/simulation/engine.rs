// src/simulation/engine.rs
use crate::core::{AmplitudeState, BitId, PumpqError};
use crate::operations::Gate;
use crate::simulation::SimulationResult;
use rand::SeedableRng;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;
use std::collections::BTreeMap;

/// Amplitudes below this squared magnitude are treated as unpopulated.
const AMPLITUDE_TOLERANCE: f64 = 1e-12;

/// State-vector engine holding the `2^N` amplitudes of an `N`-bit register.
/// (Internal visibility)
pub(crate) struct StateVectorEngine {
    state: AmplitudeState,
    width: usize,
}

impl StateVectorEngine {
    /// Prepares the basis state `|initial_index>` over `width` bits.
    pub(crate) fn init(width: usize, initial_index: usize) -> Result<Self, PumpqError> {
        let dim = u32::try_from(width)
            .ok()
            .and_then(|w| 1usize.checked_shl(w))
            .ok_or(PumpqError::RegisterTooLarge { width, limit: usize::BITS as usize - 1 })?;
        if initial_index >= dim {
            return Err(PumpqError::InvalidOperation {
                message: format!("initial basis index {} does not fit in {} bits", initial_index, width),
            });
        }
        Ok(Self { state: AmplitudeState::basis(dim, initial_index), width })
    }

    pub(crate) fn state(&self) -> &AmplitudeState {
        &self.state
    }

    /// Applies a flip gate as a permutation of basis states: every basis state
    /// with all controls set is swapped with its partner differing only in
    /// the target bit.
    pub(crate) fn apply_gate(&mut self, gate: &Gate) -> Result<(), PumpqError> {
        for bit in gate.involved_bits() {
            if bit.0 >= self.width {
                return Err(PumpqError::BitOutOfRange { bit, width: self.width });
            }
        }
        let target_mask = 1usize << gate.target().0;
        let control_mask = gate.controls().iter().fold(0usize, |acc, c| acc | (1 << c.0));

        let amplitudes = self.state.vector_mut();
        for k in 0..amplitudes.len() {
            if k & target_mask == 0 && k & control_mask == control_mask {
                amplitudes.swap(k, k | target_mask);
            }
        }
        Ok(())
    }

    /// Samples `shots` measurements of `outputs` from the current amplitudes.
    ///
    /// Outcomes are drawn with a `StdRng` seeded from `seed`, so the same
    /// state, outputs and seed always produce the same counts. The engine
    /// state itself is left untouched.
    pub(crate) fn sample(&self, outputs: &[BitId], shots: usize, seed: u64) -> Result<SimulationResult, PumpqError> {
        let populated: Vec<(usize, f64)> = self
            .state
            .probabilities()
            .into_iter()
            .enumerate()
            .filter(|(_, p)| *p > AMPLITUDE_TOLERANCE)
            .collect();
        let total: f64 = populated.iter().map(|(_, p)| p).sum();
        if populated.is_empty() || total < AMPLITUDE_TOLERANCE {
            return Err(PumpqError::Instability {
                message: "Measurement failed: no basis state carries any amplitude".to_string(),
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut counts: BTreeMap<Vec<bool>, usize> = BTreeMap::new();
        for _ in 0..shots {
            let p_sample: f64 = StandardUniform.sample(&mut rng);
            let threshold = p_sample * total;
            let mut cumulative = 0.0;
            // Fall back to the last populated state to absorb rounding at the top end
            let mut chosen = populated[populated.len() - 1].0;
            for (k, p) in &populated {
                cumulative += *p;
                if threshold < cumulative {
                    chosen = *k;
                    break;
                }
            }
            let outcome: Vec<bool> = outputs.iter().map(|b| (chosen >> b.0) & 1 == 1).collect();
            *counts.entry(outcome).or_insert(0) += 1;
        }

        Ok(SimulationResult::new(outputs.to_vec(), counts, shots))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::check_basis_state;
    use num_complex::Complex;

    fn qid(i: usize) -> BitId {
        BitId(i)
    }

    #[test]
    fn test_init_prepares_basis_state() -> Result<(), PumpqError> {
        let engine = StateVectorEngine::init(3, 0b101)?;
        assert_eq!(engine.state().dim(), 8);
        assert_eq!(engine.width, 3);
        assert_eq!(check_basis_state(engine.state(), None)?, 0b101);
        Ok(())
    }

    #[test]
    fn test_init_rejects_index_outside_space() {
        assert!(matches!(StateVectorEngine::init(2, 4), Err(PumpqError::InvalidOperation { .. })));
    }

    #[test]
    fn test_gates_permute_basis_states() -> Result<(), PumpqError> {
        // |q2 q1 q0> = |011> -> CCX(0,1->2) -> |111> -> CX(2->0) -> |110> -> X(1) -> |100>
        let mut engine = StateVectorEngine::init(3, 0b011)?;
        engine.apply_gate(&Gate::ccx(qid(0), qid(1), qid(2)))?;
        assert_eq!(check_basis_state(engine.state(), None)?, 0b111);
        engine.apply_gate(&Gate::cx(qid(2), qid(0)))?;
        assert_eq!(check_basis_state(engine.state(), None)?, 0b110);
        engine.apply_gate(&Gate::x(qid(1)))?;
        assert_eq!(check_basis_state(engine.state(), None)?, 0b100);
        Ok(())
    }

    #[test]
    fn test_disabled_gate_leaves_state() -> Result<(), PumpqError> {
        let mut engine = StateVectorEngine::init(3, 0b001)?;
        engine.apply_gate(&Gate::ccx(qid(0), qid(1), qid(2)))?;
        assert_eq!(check_basis_state(engine.state(), None)?, 0b001);
        Ok(())
    }

    #[test]
    fn test_out_of_range_gate_is_rejected() -> Result<(), PumpqError> {
        let mut engine = StateVectorEngine::init(2, 0)?;
        let result = engine.apply_gate(&Gate::cx(qid(0), qid(2)));
        assert!(matches!(result, Err(PumpqError::BitOutOfRange { .. })));
        Ok(())
    }

    #[test]
    fn test_sample_basis_state_is_deterministic() -> Result<(), PumpqError> {
        let engine = StateVectorEngine::init(3, 0b110)?;
        let result = engine.sample(&[qid(2), qid(0)], 64, 7)?;
        assert_eq!(result.counts().len(), 1);
        assert_eq!(result.count(&[true, false]), 64);
        Ok(())
    }

    #[test]
    fn test_sample_spread_state_uses_seed() -> Result<(), PumpqError> {
        let mut engine = StateVectorEngine::init(1, 0)?;
        let half = Complex::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        engine.state.vector_mut().copy_from_slice(&[half, half]);

        let a = engine.sample(&[qid(0)], 200, 42)?;
        let b = engine.sample(&[qid(0)], 200, 42)?;
        assert_eq!(a, b, "same seed must give the same counts");
        assert_eq!(a.count(&[false]) + a.count(&[true]), 200);
        assert!(a.count(&[false]) > 0 && a.count(&[true]) > 0);
        Ok(())
    }

    #[test]
    fn test_sample_empty_state_fails() -> Result<(), PumpqError> {
        let mut engine = StateVectorEngine::init(2, 0)?;
        engine.state.vector_mut().fill(Complex::new(0.0, 0.0));
        assert!(matches!(engine.sample(&[qid(0)], 8, 1), Err(PumpqError::Instability { .. })));
        Ok(())
    }
}
