// src/simulation/engine.rs
use crate::core::{Outcome, QsimError, QubitId, StateVector};
use crate::operations::{Gate, Matrix2, Operation};
use crate::validation;
use num_complex::Complex;
use num_traits::Zero;
use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Probabilities below this are treated as impossible outcomes.
const COLLAPSE_EPSILON: f64 = 1e-15;

/// The state-vector engine behind a [`Simulator`](super::Simulator).
///
/// Qubits occupy slots `0..n`; slot `j` is bit `j` of the basis index.
/// Allocation appends a slot, release removes one and shifts the slots above
/// it down, so the vector always has dimension `2^n`.
#[derive(Debug)]
pub(crate) struct SimulationEngine {
    /// Maps qubit ids to their slot.
    slots: HashMap<QubitId, usize>,
    /// `order[slot]` is the qubit stored in that slot.
    order: Vec<QubitId>,
    state: StateVector,
    max_qubits: usize,
    tolerance: f64,
}

impl SimulationEngine {
    /// An engine with no qubits (the scalar state `1`).
    pub(crate) fn new(max_qubits: usize, tolerance: f64) -> Self {
        Self {
            slots: HashMap::new(),
            order: Vec::new(),
            state: StateVector::scalar(),
            max_qubits,
            tolerance,
        }
    }

    /// An engine holding `qubits` in |0...0>. Ids are sorted so slot assignment
    /// does not depend on the caller's iteration order.
    pub(crate) fn init<'a, I>(qubits: I, max_qubits: usize, tolerance: f64) -> Result<Self, QsimError>
    where
        I: IntoIterator<Item = &'a QubitId>,
    {
        let mut sorted: Vec<QubitId> = qubits.into_iter().copied().collect();
        sorted.sort();
        sorted.dedup();
        if sorted.len() > max_qubits {
            return Err(QsimError::CapacityExceeded { allocated: sorted.len(), max: max_qubits });
        }
        let mut engine = Self::new(max_qubits, tolerance);
        for qubit in sorted {
            engine.allocate(qubit)?;
        }
        Ok(engine)
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), QsimError> {
        if state.dim() != self.state.dim() {
            return Err(QsimError::Simulation {
                message: format!(
                    "Cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            });
        }
        self.state = state;
        Ok(())
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn num_qubits(&self) -> usize {
        self.order.len()
    }

    /// Qubits in slot order.
    pub(crate) fn qubits(&self) -> &[QubitId] {
        &self.order
    }

    pub(crate) fn contains(&self, qubit: &QubitId) -> bool {
        self.slots.contains_key(qubit)
    }

    fn slot(&self, qubit: &QubitId) -> Result<usize, QsimError> {
        self.slots.get(qubit).copied().ok_or(QsimError::QubitNotFound { qubit: *qubit })
    }

    /// Adds `qubit` in |0>. The new qubit takes the highest slot, so existing
    /// amplitudes keep their indices and the upper half is zero.
    pub(crate) fn allocate(&mut self, qubit: QubitId) -> Result<(), QsimError> {
        if self.slots.contains_key(&qubit) {
            return Err(QsimError::invalid(format!("Qubit {} is already allocated", qubit)));
        }
        if self.order.len() >= self.max_qubits {
            return Err(QsimError::CapacityExceeded { allocated: self.order.len(), max: self.max_qubits });
        }
        let dim = self.state.dim();
        self.state.amplitudes_mut().resize(dim * 2, Complex::zero());
        self.slots.insert(qubit, self.order.len());
        self.order.push(qubit);
        debug!(%qubit, qubits = self.order.len(), "allocated qubit");
        Ok(())
    }

    /// Removes `qubit`, which must be in |0>.
    pub(crate) fn release(&mut self, qubit: QubitId) -> Result<(), QsimError> {
        let slot = self.slot(&qubit)?;
        if let Some(probability) = validation::dirty_probability(&self.state, slot, self.tolerance) {
            return Err(QsimError::QubitNotReleased { qubit, probability });
        }

        let old = self.state.amplitudes();
        let half = old.len() / 2;
        let low_mask = (1usize << slot) - 1;
        let mut compressed = Vec::with_capacity(half);
        for k in 0..half {
            // insert a 0 bit at `slot`
            let src = ((k >> slot) << (slot + 1)) | (k & low_mask);
            compressed.push(old[src]);
        }
        let norm: f64 = compressed.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt();
        if norm > COLLAPSE_EPSILON {
            for c in compressed.iter_mut() {
                *c /= norm;
            }
        }
        self.state = StateVector::new(compressed);

        self.order.remove(slot);
        self.slots.remove(&qubit);
        for (new_slot, id) in self.order.iter().enumerate().skip(slot) {
            self.slots.insert(*id, new_slot);
        }
        debug!(%qubit, qubits = self.order.len(), "released qubit");
        Ok(())
    }

    /// Applies a unitary operation. Measurement and reset need randomness and
    /// go through [`SimulationEngine::measure`] / [`SimulationEngine::reset`].
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), QsimError> {
        trace!(?op, "applying operation");
        match op {
            Operation::Apply { target, gate } => {
                let slot = self.slot(target)?;
                self.apply_single_qubit_gate(slot, &gate.matrix());
            }
            Operation::Controlled { control, target, gate } => {
                let c = self.slot(control)?;
                let t = self.slot(target)?;
                if c == t {
                    return Err(QsimError::invalid(
                        "Control and target qubits cannot be the same for a controlled operation",
                    ));
                }
                self.apply_controlled_gate(c, t, &gate.matrix());
            }
            Operation::Swap { a, b } => {
                let sa = self.slot(a)?;
                let sb = self.slot(b)?;
                if sa == sb {
                    return Err(QsimError::invalid("Cannot swap a qubit with itself"));
                }
                self.apply_swap(sa, sb);
            }
            Operation::Measure { .. } | Operation::Reset { .. } => {
                return Err(QsimError::invalid(
                    "Measurement operations should not be passed directly to apply_operation",
                ));
            }
        }
        Ok(())
    }

    /// Projective measurement of `qubit` in the computational basis.
    ///
    /// `P(One)` is the total weight of basis states with the qubit's bit set.
    /// The rejected half of the vector is zeroed and the rest renormalized.
    pub(crate) fn measure<R: Rng>(&mut self, qubit: QubitId, rng: &mut R) -> Result<Outcome, QsimError> {
        let slot = self.slot(&qubit)?;
        let p_one = validation::probability_of_one(&self.state, slot);
        let sample: f64 = rng.random();
        let outcome = if p_one <= COLLAPSE_EPSILON {
            Outcome::Zero
        } else if p_one >= 1.0 - COLLAPSE_EPSILON {
            Outcome::One
        } else {
            Outcome::from(sample < p_one)
        };

        let p_outcome = if outcome.is_one() { p_one } else { 1.0 - p_one };
        if p_outcome < COLLAPSE_EPSILON {
            return Err(QsimError::Simulation {
                message: format!("Sampled outcome {} of {} has vanishing probability {}", outcome, qubit, p_outcome),
            });
        }

        let mask = 1usize << slot;
        let scale = 1.0 / p_outcome.sqrt();
        for (k, amp) in self.state.amplitudes_mut().iter_mut().enumerate() {
            if ((k & mask) != 0) == outcome.is_one() {
                *amp *= scale;
            } else {
                *amp = Complex::zero();
            }
        }
        debug!(%qubit, %outcome, p_one, "measured qubit");
        Ok(outcome)
    }

    /// Measures `qubit` and flips it to |0> when the result was `One`.
    pub(crate) fn reset<R: Rng>(&mut self, qubit: QubitId, rng: &mut R) -> Result<(), QsimError> {
        if self.measure(qubit, rng)?.is_one() {
            let slot = self.slot(&qubit)?;
            self.apply_single_qubit_gate(slot, &Gate::X.matrix());
        }
        Ok(())
    }

    pub(crate) fn probability_of_one(&self, qubit: &QubitId) -> Result<f64, QsimError> {
        Ok(validation::probability_of_one(&self.state, self.slot(qubit)?))
    }

    /// Applies `matrix` to the pair of amplitudes differing only in bit `slot`.
    fn apply_single_qubit_gate(&mut self, slot: usize, matrix: &Matrix2) {
        let mask = 1usize << slot;
        let amps = self.state.amplitudes_mut();
        for i0 in 0..amps.len() {
            if i0 & mask != 0 {
                continue;
            }
            let i1 = i0 | mask;
            let (a0, a1) = (amps[i0], amps[i1]);
            amps[i0] = matrix[0][0] * a0 + matrix[0][1] * a1;
            amps[i1] = matrix[1][0] * a0 + matrix[1][1] * a1;
        }
    }

    /// Applies `matrix` to `target` on the subspace where `control` is 1.
    fn apply_controlled_gate(&mut self, control: usize, target: usize, matrix: &Matrix2) {
        let c_mask = 1usize << control;
        let t_mask = 1usize << target;
        let amps = self.state.amplitudes_mut();
        for i0 in 0..amps.len() {
            if i0 & c_mask == 0 || i0 & t_mask != 0 {
                continue;
            }
            let i1 = i0 | t_mask;
            let (a0, a1) = (amps[i0], amps[i1]);
            amps[i0] = matrix[0][0] * a0 + matrix[0][1] * a1;
            amps[i1] = matrix[1][0] * a0 + matrix[1][1] * a1;
        }
    }

    fn apply_swap(&mut self, a: usize, b: usize) {
        let a_mask = 1usize << a;
        let b_mask = 1usize << b;
        let amps = self.state.amplitudes_mut();
        for k in 0..amps.len() {
            // visit each |..1_a..0_b..> once and exchange with |..0_a..1_b..>
            if k & a_mask != 0 && k & b_mask == 0 {
                amps.swap(k, (k & !a_mask) | b_mask);
            }
        }
    }
}
