// src/core/state.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// Amplitude vector over the `2^N` basis states of an `N`-bit register.
///
/// Basis index `k` describes the register whose bit `i` equals bit `i` of `k`.
/// The gate set used by this crate only permutes basis states, so a state
/// prepared from a classical encoding stays one-hot for its whole lifetime.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct AmplitudeState {
    amplitudes: Vec<Complex<f64>>,
}

impl AmplitudeState {
    /// Creates a state from an explicit amplitude vector.
    #[cfg(test)]
    pub(crate) fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// Creates the basis state `|index>` in a space of dimension `dim`.
    pub(crate) fn basis(dim: usize, index: usize) -> Self {
        let mut amplitudes = vec![Complex::zero(); dim];
        if index < dim {
            amplitudes[index] = Complex::one();
        }
        Self { amplitudes }
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states represented.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Squared magnitude of each amplitude, i.e. the outcome distribution.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }
}

impl fmt::Display for AmplitudeState {
    /// Lists only the populated basis states, e.g. `Amplitudes[|3>: 1.0000+0.0000i]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amplitudes[")?;
        let mut first = true;
        for (k, c) in self.amplitudes.iter().enumerate() {
            if c.norm_sqr() > 1e-12 {
                write!(f, "{}|{}>: {:.4}", if first { "" } else { ", " }, k, c)?;
                first = false;
            }
        }
        write!(f, "]")
    }
}
