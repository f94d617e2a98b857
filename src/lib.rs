// src/lib.rs

//! `qtour` - a guided tour of quantum operations
//!
//! A state-vector simulator with live qubit allocation, a circuit builder,
//! a set of small quantum programs (Bell test, Deutsch-Jozsa, teleportation,
//! ...) and the console driver that walks through them.

pub mod algorithms;
pub mod circuits;
pub mod config;
pub mod core;
pub mod driver;
pub mod logger;
pub mod operations;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use circuits::{Circuit, CircuitBuilder};
pub use core::{Outcome, QsimError, QubitId, StateVector};
pub use operations::{Gate, Operation};
pub use simulation::{SimulationResult, Simulator, SimulatorConfig};
pub use validation::{check_normalization, validate_state};

// Example 1: Bell pair as a circuit
// Builds H + CNOT, measures both qubits and checks that they agree.
/// ```
/// use qtour::{CircuitBuilder, Gate, Operation, QubitId, Simulator};
///
/// let (q0, q1) = (QubitId(0), QubitId(1));
/// let circuit = CircuitBuilder::new()
///     .add_op(Operation::apply(q0, Gate::H))
///     .add_op(Operation::cnot(q0, q1))
///     .add_op(Operation::measure(vec![q0, q1]))
///     .build();
///
/// println!("{}", circuit);
///
/// let mut simulator = Simulator::seeded(2024);
/// for _ in 0..20 {
///     let result = simulator.run(&circuit).expect("circuit runs");
///     assert_eq!(result.outcome(&q0), result.outcome(&q1));
/// }
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Teleporting a message bit with the live API
/// ```
/// use qtour::Simulator;
/// use qtour::algorithms::send_message;
///
/// let mut sim = Simulator::new();
/// assert_eq!(send_message(&mut sim, true).unwrap(), true);
/// assert_eq!(send_message(&mut sim, false).unwrap(), false);
/// assert!(sim.allocated_qubits().is_empty());
/// ```
#[doc(hidden)]
const _: () = ();
