// src/operations/mod.rs

//! Reversible gate primitives.
//!
//! Every gate flips a single target bit when all of its control bits are set:
//! `target ^= AND(controls)`, with an empty AND being true. Each gate is its
//! own inverse, so any sequence of gates is undone by replaying it backwards.

use crate::core::{BitId, Register};
use std::fmt;

/// A reversible bit-flip gate with zero, one or two controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Unconditional flip of `target` (NOT, `X`).
    Flip {
        /// Bit to invert.
        target: BitId,
    },

    /// Flips `target` when `control` is set (controlled-NOT, `CX`).
    ///
    /// Applied to a zeroed target this copies the control bit.
    ControlledFlip {
        /// Bit that enables the flip.
        control: BitId,
        /// Bit to invert.
        target: BitId,
    },

    /// Flips `target` when both controls are set (Toffoli, `CCX`).
    ///
    /// Applied to a zeroed target this writes `control1 AND control2`.
    DoublyControlledFlip {
        /// First enabling bit.
        control1: BitId,
        /// Second enabling bit.
        control2: BitId,
        /// Bit to invert.
        target: BitId,
    },
}

impl Gate {
    /// Shorthand for [`Gate::Flip`].
    pub fn x(target: BitId) -> Self {
        Gate::Flip { target }
    }

    /// Shorthand for [`Gate::ControlledFlip`].
    pub fn cx(control: BitId, target: BitId) -> Self {
        Gate::ControlledFlip { control, target }
    }

    /// Shorthand for [`Gate::DoublyControlledFlip`].
    pub fn ccx(control1: BitId, control2: BitId, target: BitId) -> Self {
        Gate::DoublyControlledFlip { control1, control2, target }
    }

    /// The bit this gate may invert.
    pub fn target(&self) -> BitId {
        match self {
            Gate::Flip { target }
            | Gate::ControlledFlip { target, .. }
            | Gate::DoublyControlledFlip { target, .. } => *target,
        }
    }

    /// The bits that must all be set for the flip to happen.
    pub fn controls(&self) -> Vec<BitId> {
        match self {
            Gate::Flip { .. } => vec![],
            Gate::ControlledFlip { control, .. } => vec![*control],
            Gate::DoublyControlledFlip { control1, control2, .. } => vec![*control1, *control2],
        }
    }

    /// Every bit the gate touches, controls first, target last.
    pub fn involved_bits(&self) -> Vec<BitId> {
        let mut bits = self.controls();
        bits.push(self.target());
        bits
    }

    /// Number of bits the gate acts on (1, 2 or 3).
    pub fn arity(&self) -> usize {
        match self {
            Gate::Flip { .. } => 1,
            Gate::ControlledFlip { .. } => 2,
            Gate::DoublyControlledFlip { .. } => 3,
        }
    }

    /// Returns `true` if all controls are set in `register`.
    pub fn is_enabled(&self, register: &Register) -> bool {
        match self {
            Gate::Flip { .. } => true,
            Gate::ControlledFlip { control, .. } => register.get(*control),
            Gate::DoublyControlledFlip { control1, control2, .. } => {
                register.get(*control1) && register.get(*control2)
            }
        }
    }

    /// Applies the gate to `register` in place.
    ///
    /// # Panics
    /// Panics if any involved bit lies outside the register. Circuits check
    /// this when they are built.
    pub fn apply(&self, register: &mut Register) {
        if self.is_enabled(register) {
            register.flip(self.target());
        }
    }

    /// Short mnemonic used in logs and schematics.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Gate::Flip { .. } => "X",
            Gate::ControlledFlip { .. } => "CX",
            Gate::DoublyControlledFlip { .. } => "CCX",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Flip { target } => write!(f, "X({})", target),
            Gate::ControlledFlip { control, target } => write!(f, "CX({} -> {})", control, target),
            Gate::DoublyControlledFlip { control1, control2, target } => {
                write!(f, "CCX({}, {} -> {})", control1, control2, target)
            }
        }
    }
}
