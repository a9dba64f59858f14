// src/core/register.rs

use super::error::BitId;
use std::fmt;

/// A fixed-width, index-addressed sequence of classical bits.
///
/// Every evaluation owns exactly one register, created zeroed and mutated in
/// place by gate application. The width never changes after creation.
///
/// Accessors index like a slice: passing a bit outside `0..width` panics.
/// Circuits are validated against their width when built, so evaluation of a
/// built circuit never hits that path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Register {
    bits: Vec<bool>,
}

impl Register {
    /// Creates a register of `width` bits, all false.
    pub fn zeroed(width: usize) -> Self {
        Self { bits: vec![false; width] }
    }

    /// Number of bits in the register.
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Reads a bit.
    pub fn get(&self, bit: BitId) -> bool {
        self.bits[bit.0]
    }

    /// Overwrites a bit.
    pub fn set(&mut self, bit: BitId, value: bool) {
        self.bits[bit.0] = value;
    }

    /// Inverts a bit.
    pub fn flip(&mut self, bit: BitId) {
        self.bits[bit.0] ^= true;
    }

    /// Read-only view of all bits, lowest index first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Returns `true` if every bit is false.
    pub fn is_clear(&self) -> bool {
        self.bits.iter().all(|b| !b)
    }

    /// Clears every bit. Required before a register is reused, since ancilla
    /// bits are left holding partial results after an evaluation.
    pub fn reset(&mut self) {
        self.bits.iter_mut().for_each(|b| *b = false);
    }

    /// Packs the register into a basis-state index (bit `i` of the index is
    /// register bit `i`). Only meaningful for widths below `usize::BITS`.
    pub fn basis_index(&self) -> usize {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .fold(0usize, |acc, (i, _)| acc | (1 << i))
    }

    /// Builds a register of `width` bits from a basis-state index.
    pub fn from_basis_index(index: usize, width: usize) -> Self {
        Self {
            bits: (0..width).map(|i| (index >> i) & 1 == 1).collect(),
        }
    }
}

impl fmt::Display for Register {
    /// Prints bits lowest index first, e.g. `11110011000010`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.bits {
            write!(f, "{}", if *b { '1' } else { '0' })?;
        }
        Ok(())
    }
}
