// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

// Re-export public types for convenient access via `qtour::core::TypeName`
pub use error::{QsimError, QubitId};
pub use state::{Outcome, StateVector};
