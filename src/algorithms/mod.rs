// src/algorithms/mod.rs

//! Small quantum programs run against a [`Simulator`](crate::Simulator).
//!
//! Each program allocates its own qubits through
//! [`Simulator::with_qubits`](crate::Simulator::with_qubits) and returns
//! them to |0> before the scope ends.

mod bell;
mod collapse;
mod deutsch_jozsa;
mod random;
mod reversible;
mod teleport;

pub use bell::{BellTestResult, bell_test};
pub use collapse::measurement_collapsing_superposition;
pub use deutsch_jozsa::{
    Classification, DeutschJozsaResult, Oracle, constant0, constant1, deutsch_jozsa, identity, negation,
};
pub use random::{MAX_RANDOM_BITS, generate_random_number};
pub use reversible::reversible_gate;
pub use teleport::{send_message, teleport};
