// src/operations/mod.rs

//! Gates and the operations that apply them to qubits.
//!
//! A [`Gate`] is a single-qubit unitary with a known 2x2 matrix. An
//! [`Operation`] places a gate (possibly controlled) on concrete qubits, or
//! requests a measurement or reset.

use crate::core::QubitId;
use num_complex::Complex;
use num_traits::{One, Zero};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;

/// A 2x2 complex matrix acting on a single qubit, row-major.
pub type Matrix2 = [[Complex<f64>; 2]; 2];

/// Single-qubit gates understood by the simulator.
#[derive(Debug, Clone, Copy, PartialEq)] // f64 in R1 rules out Eq
pub enum Gate {
    /// Identity.
    I,
    /// Pauli X (bit flip).
    X,
    /// Pauli Y.
    Y,
    /// Pauli Z (phase flip).
    Z,
    /// Hadamard.
    H,
    /// Phase gate, `diag(1, i)`.
    S,
    /// Adjoint of [`Gate::S`].
    SAdj,
    /// T gate, `diag(1, e^(iπ/4))`.
    T,
    /// Adjoint of [`Gate::T`].
    TAdj,
    /// Phase rotation `diag(1, e^(iθ))` with θ in radians.
    R1(f64),
}

impl Gate {
    /// The unitary matrix of this gate.
    pub fn matrix(&self) -> Matrix2 {
        let zero = Complex::zero();
        let one = Complex::one();
        let i = Complex::i();
        match self {
            Gate::I => [[one, zero], [zero, one]],
            Gate::X => [[zero, one], [one, zero]],
            Gate::Y => [[zero, -i], [i, zero]],
            Gate::Z => [[one, zero], [zero, -one]],
            Gate::H => {
                let h = Complex::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            Gate::S => [[one, zero], [zero, i]],
            Gate::SAdj => [[one, zero], [zero, -i]],
            Gate::T => [[one, zero], [zero, Complex::from_polar(1.0, FRAC_PI_4)]],
            Gate::TAdj => [[one, zero], [zero, Complex::from_polar(1.0, -FRAC_PI_4)]],
            Gate::R1(theta) => [[one, zero], [zero, Complex::from_polar(1.0, *theta)]],
        }
    }

    /// The inverse gate.
    pub fn adjoint(&self) -> Gate {
        match self {
            Gate::S => Gate::SAdj,
            Gate::SAdj => Gate::S,
            Gate::T => Gate::TAdj,
            Gate::TAdj => Gate::T,
            Gate::R1(theta) => Gate::R1(-theta),
            // Paulis and H are self-inverse
            other => *other,
        }
    }

    /// Short label used by circuit diagrams.
    pub fn symbol(&self) -> &'static str {
        match self {
            Gate::I => "I",
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::H => "H",
            Gate::S => "S",
            Gate::SAdj => "S†",
            Gate::T => "T",
            Gate::TAdj => "T†",
            Gate::R1(_) => "R1",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::R1(theta) => write!(f, "R1({:.4})", theta),
            other => f.write_str(other.symbol()),
        }
    }
}

/// An operation within a circuit or applied to a live simulator.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Apply `gate` to `target`.
    Apply {
        /// The qubit acted on.
        target: QubitId,
        /// The gate to apply.
        gate: Gate,
    },

    /// Apply `gate` to `target` on the subspace where `control` is |1>.
    ///
    /// `Controlled { gate: Gate::X, .. }` is CNOT.
    Controlled {
        /// The qubit whose |1> component enables the gate.
        control: QubitId,
        /// The qubit acted on.
        target: QubitId,
        /// The gate applied to `target`.
        gate: Gate,
    },

    /// Exchange the states of two qubits.
    Swap {
        /// First qubit.
        a: QubitId,
        /// Second qubit.
        b: QubitId,
    },

    /// Measure each target in the computational basis, collapsing the state.
    Measure {
        /// Qubits to measure, in order.
        targets: Vec<QubitId>,
    },

    /// Measure `target` and flip it back to |0> if needed.
    Reset {
        /// Qubit to reset.
        target: QubitId,
    },
}

impl Operation {
    /// Shorthand for [`Operation::Apply`].
    pub fn apply(target: QubitId, gate: Gate) -> Self {
        Operation::Apply { target, gate }
    }

    /// Shorthand for a CNOT.
    pub fn cnot(control: QubitId, target: QubitId) -> Self {
        Operation::Controlled { control, target, gate: Gate::X }
    }

    /// Shorthand for [`Operation::Measure`].
    pub fn measure(targets: impl Into<Vec<QubitId>>) -> Self {
        Operation::Measure { targets: targets.into() }
    }

    /// Returns every qubit referenced by the operation.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Apply { target, .. } => vec![*target],
            Operation::Controlled { control, target, .. } => vec![*control, *target],
            Operation::Swap { a, b } => vec![*a, *b],
            Operation::Measure { targets } => targets.clone(),
            Operation::Reset { target } => vec![*target],
        }
    }

    /// `true` for operations that are pure unitaries (no measurement involved).
    pub fn is_unitary(&self) -> bool {
        matches!(
            self,
            Operation::Apply { .. } | Operation::Controlled { .. } | Operation::Swap { .. }
        )
    }
}
