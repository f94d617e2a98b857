// src/core/state.rs

use num_complex::Complex;
use std::fmt;

/// Amplitudes below this squared magnitude are omitted from the dump view.
const DISPLAY_TOLERANCE: f64 = 1e-12;

/// The joint state of every qubit in a simulation context.
///
/// Qubit slot `j` corresponds to bit `j` of the basis index, so for three
/// qubits amplitude `k = 0b110` belongs to `|q2=1, q1=1, q0=0>`.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Creates a state from raw amplitudes. The caller is responsible for the
    /// dimension being a power of two.
    pub(crate) fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// The zero-qubit state: a single amplitude of 1.
    pub(crate) fn scalar() -> Self {
        Self { amplitudes: vec![Complex::new(1.0, 0.0)] }
    }

    /// Read-only view of the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut Vec<Complex<f64>> {
        &mut self.amplitudes
    }

    /// Number of basis states (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits represented.
    pub fn num_qubits(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    /// Probability of observing basis state `k`, or 0 when out of range.
    pub fn probability(&self, k: usize) -> f64 {
        self.amplitudes.get(k).map(|c| c.norm_sqr()).unwrap_or(0.0)
    }

    /// Sum of squared amplitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.num_qubits();
        writeln!(f, "StateVector[{} qubits]", n)?;
        for (k, c) in self.amplitudes.iter().enumerate() {
            if c.norm_sqr() > DISPLAY_TOLERANCE {
                writeln!(
                    f,
                    "  |{:0width$b}>  {:+.4}{:+.4}i  p={:.4}",
                    k,
                    c.re,
                    c.im,
                    c.norm_sqr(),
                    width = n.max(1)
                )?;
            }
        }
        Ok(())
    }
}

/// A measured value of a single qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Outcome {
    /// The qubit was observed in |0>.
    #[default]
    Zero,
    /// The qubit was observed in |1>.
    One,
}

impl Outcome {
    /// `true` for [`Outcome::One`].
    pub fn is_one(self) -> bool {
        matches!(self, Outcome::One)
    }

    /// The opposite outcome.
    pub fn flip(self) -> Self {
        match self {
            Outcome::Zero => Outcome::One,
            Outcome::One => Outcome::Zero,
        }
    }

    /// Numeric value of the bit.
    pub fn bit(self) -> u64 {
        match self {
            Outcome::Zero => 0,
            Outcome::One => 1,
        }
    }
}

impl From<bool> for Outcome {
    fn from(value: bool) -> Self {
        if value { Outcome::One } else { Outcome::Zero }
    }
}

impl From<Outcome> for bool {
    fn from(value: Outcome) -> Self {
        value.is_one()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so width and alignment flags apply, e.g. `{:<4}`
        f.pad(match self {
            Outcome::Zero => "Zero",
            Outcome::One => "One",
        })
    }
}
