//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Index of a single bit (wire) within a register.
/// The index is the bit's position in the register, counted from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitId(pub usize);

impl BitId {
    /// Returns the raw register position.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for BitId {
    fn from(index: usize) -> Self {
        BitId(index)
    }
}

/// Errors raised while building, validating or simulating circuits.
///
/// The fixed pump circuit never produces any of these: it is valid by
/// construction. They guard the general-purpose builder, simulator and
/// configuration surfaces.
#[derive(Debug, Error)]
pub enum PumpqError {
    /// A gate, input or output refers to a bit outside the register.
    #[error("Bit {bit} is out of range for a {width}-bit register")]
    BitOutOfRange {
        /// Offending bit
        bit: BitId,
        /// Register width at the time of the check
        width: usize,
    },

    /// A gate names the same bit twice, which would make it irreversible.
    #[error("Duplicate operand: {message}")]
    DuplicateOperand {
        /// DuplicateOperand failure message
        message: String,
    },

    /// The state-vector dimension `2^width` exceeds the simulator's limit.
    #[error("Register of {width} bits is too large to simulate (limit {limit})")]
    RegisterTooLarge {
        /// Requested register width
        width: usize,
        /// Configured maximum width
        limit: usize,
    },

    /// An operation is inconsistent with the circuit or expression it targets.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// A configuration value could not be parsed.
    #[error("Invalid configuration value {value:?} for {key}: {message}")]
    InvalidConfig {
        /// Configuration key (environment variable name)
        key: String,
        /// Raw value that failed to parse
        value: String,
        /// Why it was rejected
        message: String,
    },

    /// The state vector lost normalization.
    #[error("Incoherence: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// Measurement could not pick any outcome.
    #[error("Instability: {message}")]
    Instability {
        /// Instability failure message
        message: String,
    },

    /// Writing the text schematic failed.
    #[error("Could not write circuit schematic: {0}")]
    Schematic(#[from] std::io::Error),

    /// Installing the tracing subscriber failed.
    #[error("Could not initialize logging: {message}")]
    Logging {
        /// Logging failure message
        message: String,
    },
}
