// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod register;
pub mod state;

// Re-export public types for convenient access via `pumpq::core::TypeName`
pub use error::{BitId, PumpqError};
pub use register::Register;
pub use state::AmplitudeState;

pub mod constants;
pub use constants::pump_layout;
