// src/validation/mod.rs

//! Structural checks on circuits and state checks on simulated amplitude vectors.

use crate::circuits::Circuit;
use crate::core::{AmplitudeState, BitId, PumpqError};
use std::collections::HashSet;

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;
const DEFAULT_AMPLITUDE_TOLERANCE: f64 = 1e-12;

fn check_in_range(bit: BitId, width: usize) -> Result<(), PumpqError> {
    if bit.0 < width {
        Ok(())
    } else {
        Err(PumpqError::BitOutOfRange { bit, width })
    }
}

/// Checks that a circuit only refers to bits inside its register and that no
/// gate uses the same bit twice.
///
/// A gate whose target is also one of its controls is not reversible, and
/// `CCX(a, a -> t)` silently degrades to `CX(a -> t)`; both are rejected.
/// Encoding the same input bit twice is rejected as well.
///
/// # Errors
/// * `PumpqError::BitOutOfRange` for the first bit outside `0..width`.
/// * `PumpqError::DuplicateOperand` for the first gate (or input) that repeats a bit.
pub fn validate_circuit(circuit: &Circuit) -> Result<(), PumpqError> {
    let width = circuit.width();

    let mut encoded = HashSet::new();
    for (bit, _) in circuit.encoding() {
        check_in_range(*bit, width)?;
        if !encoded.insert(*bit) {
            return Err(PumpqError::DuplicateOperand {
                message: format!("input {} is encoded more than once", bit),
            });
        }
    }

    for (position, gate) in circuit.gates().iter().enumerate() {
        let bits = gate.involved_bits();
        for bit in &bits {
            check_in_range(*bit, width)?;
        }
        let distinct: HashSet<&BitId> = bits.iter().collect();
        if distinct.len() != bits.len() {
            return Err(PumpqError::DuplicateOperand {
                message: format!("gate #{} {} repeats an operand", position, gate),
            });
        }
    }

    for bit in circuit.outputs() {
        check_in_range(*bit, width)?;
    }
    Ok(())
}

/// Checks if the amplitude vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Errors
/// Returns `PumpqError::Incoherence` if the deviation exceeds `tolerance`
/// (default `1e-9`).
pub fn check_normalization(state: &AmplitudeState, tolerance: Option<f64>) -> Result<(), PumpqError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.vector().iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(PumpqError::Incoherence {
            message: format!("State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})", norm_sq, effective_tolerance),
        })
    } else {
        Ok(())
    }
}

/// Checks that exactly one basis state carries (essentially) all of the
/// amplitude and returns its index.
///
/// Circuits built from flip gates over a classical encoding always satisfy
/// this; a failure means the state was corrupted or prepared by hand.
///
/// # Errors
/// Returns `PumpqError::Incoherence` if the state is not normalized or more
/// than one basis state is populated.
pub fn check_basis_state(state: &AmplitudeState, amplitude_tolerance: Option<f64>) -> Result<usize, PumpqError> {
    check_normalization(state, None)?;
    let tolerance = amplitude_tolerance.unwrap_or(DEFAULT_AMPLITUDE_TOLERANCE);
    let populated: Vec<usize> = state
        .vector()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.norm_sqr() > tolerance)
        .map(|(k, _)| k)
        .collect();

    match populated.as_slice() {
        [single] => Ok(*single),
        _ => Err(PumpqError::Incoherence {
            message: format!("Expected a single basis state, found {} populated amplitudes", populated.len()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use num_complex::Complex;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn qid(i: usize) -> BitId {
        BitId(i)
    }

    #[test]
    fn test_valid_circuit_passes() -> Result<(), PumpqError> {
        let circuit = CircuitBuilder::new(3)
            .encode(qid(0), true)
            .ccx(qid(0), qid(1), qid(2))
            .measure(qid(2))
            .build_unchecked();
        validate_circuit(&circuit)
    }

    #[test]
    fn test_control_equal_to_target_is_rejected() {
        let circuit = CircuitBuilder::new(2).cx(qid(1), qid(1)).build_unchecked();
        assert!(matches!(validate_circuit(&circuit), Err(PumpqError::DuplicateOperand { .. })));
    }

    #[test]
    fn test_repeated_control_is_rejected() {
        let circuit = CircuitBuilder::new(3).ccx(qid(0), qid(0), qid(2)).build_unchecked();
        assert!(matches!(validate_circuit(&circuit), Err(PumpqError::DuplicateOperand { .. })));
    }

    #[test]
    fn test_double_encoding_is_rejected() {
        let circuit = CircuitBuilder::new(2)
            .encode(qid(0), true)
            .encode(qid(0), false)
            .build_unchecked();
        assert!(matches!(validate_circuit(&circuit), Err(PumpqError::DuplicateOperand { .. })));
    }

    #[test]
    fn test_out_of_range_output_is_rejected() {
        let circuit = CircuitBuilder::new(2).measure(qid(5)).build_unchecked();
        assert!(matches!(
            validate_circuit(&circuit),
            Err(PumpqError::BitOutOfRange { bit: BitId(5), width: 2 })
        ));
    }

    #[test]
    fn test_check_basis_state() -> Result<(), PumpqError> {
        let state = AmplitudeState::basis(8, 5);
        assert_eq!(check_basis_state(&state, None)?, 5);

        let spread = AmplitudeState::new(vec![
            Complex::new(FRAC_1_SQRT_2, 0.0),
            Complex::new(FRAC_1_SQRT_2, 0.0),
        ]);
        check_normalization(&spread, None)?;
        assert!(matches!(check_basis_state(&spread, None), Err(PumpqError::Incoherence { .. })));
        Ok(())
    }

    #[test]
    fn test_unnormalized_state_fails() {
        let state = AmplitudeState::new(vec![Complex::new(0.5, 0.0), Complex::new(0.0, 0.0)]);
        assert!(matches!(check_normalization(&state, None), Err(PumpqError::Incoherence { .. })));
    }
}
