// src/simulation/results.rs
use crate::core::{Outcome, QubitId};
use std::collections::HashMap;
use std::fmt;

/// Measurement outcomes recorded while running a circuit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationResult {
    /// Latest outcome per qubit.
    outcomes: HashMap<QubitId, Outcome>,
    /// Every measurement in execution order, including repeats.
    log: Vec<(QubitId, Outcome)>,
}

impl SimulationResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, qubit: QubitId, outcome: Outcome) {
        self.outcomes.insert(qubit, outcome);
        self.log.push((qubit, outcome));
    }

    /// The most recent outcome for `qubit`, if it was measured.
    pub fn outcome(&self, qubit: &QubitId) -> Option<Outcome> {
        self.outcomes.get(qubit).copied()
    }

    /// Latest outcome of every measured qubit.
    pub fn all_outcomes(&self) -> &HashMap<QubitId, Outcome> {
        &self.outcomes
    }

    /// All measurements in the order they happened.
    pub fn measurement_log(&self) -> &[(QubitId, Outcome)] {
        &self.log
    }

    /// Packs the latest outcomes of `qubits` into an integer, first qubit as
    /// the most significant bit. Unmeasured qubits count as `Zero`.
    pub fn as_integer(&self, qubits: &[QubitId]) -> u64 {
        qubits.iter().fold(0, |acc, q| (acc << 1) | self.outcome(q).unwrap_or_default().bit())
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        if self.outcomes.is_empty() {
            writeln!(f, "  No qubits were measured.")?;
        } else {
            let mut sorted: Vec<_> = self.outcomes.iter().collect();
            sorted.sort_by_key(|(id, _)| *id);
            writeln!(f, "  Outcomes:")?;
            for (id, outcome) in sorted {
                writeln!(f, "    {}: {}", id, outcome)?;
            }
        }
        Ok(())
    }
}
