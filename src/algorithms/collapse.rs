use crate::core::{Outcome, QsimError};
use crate::operations::Gate;
use crate::simulation::Simulator;

/// Puts a qubit prepared in `initial` into equal superposition and measures
/// it twice.
///
/// The first result is a fair coin; the measurement collapses the state, so
/// the second result always repeats the first.
pub fn measurement_collapsing_superposition(
    sim: &mut Simulator,
    initial: Outcome,
) -> Result<(Outcome, Outcome), QsimError> {
    sim.with_qubits(1, |sim, q| {
        let qubit = q[0];
        sim.set(qubit, initial)?;
        sim.gate(qubit, Gate::H)?;
        let first = sim.measure(qubit)?;
        let second = sim.measure(qubit)?;
        sim.reset(qubit)?;
        Ok((first, second))
    })
}
