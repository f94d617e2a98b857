//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Unique identifier for a simulated qubit.
/// Identifiers are handed out by the [`Simulator`](crate::Simulator) for live
/// allocations, or chosen freely by the caller when building a [`Circuit`](crate::Circuit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u64);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Errors raised by the simulator and the operations built on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QsimError {
    /// An operation is inconsistent with the current state or its own arguments.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// What was wrong with the request
        message: String,
    },

    /// The qubit is not part of the simulation context.
    #[error("Qubit {qubit} not found in simulation context")]
    QubitNotFound {
        /// The unknown qubit
        qubit: QubitId,
    },

    /// A qubit was released while still carrying amplitude on |1>.
    #[error("Qubit {qubit} released while not in the |0> state (P(|1>) = {probability:.6})")]
    QubitNotReleased {
        /// The dirty qubit
        qubit: QubitId,
        /// Probability of measuring `One` at release time
        probability: f64,
    },

    /// The state vector lost normalization.
    #[error("Incoherence: state norm is {norm}, expected 1 (tolerance {tolerance})")]
    Incoherence {
        /// Sum of squared amplitudes
        norm: f64,
        /// Allowed deviation
        tolerance: f64,
    },

    /// Allocating another qubit would exceed the configured register size.
    #[error("Cannot allocate qubit: register already holds {allocated} of {max} qubits")]
    CapacityExceeded {
        /// Qubits currently allocated
        allocated: usize,
        /// Configured maximum
        max: usize,
    },

    /// General error encountered during the simulation process itself.
    #[error("Simulation error: {message}")]
    Simulation {
        /// Failure message
        message: String,
    },
}

impl QsimError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        QsimError::InvalidOperation { message: message.into() }
    }
}
