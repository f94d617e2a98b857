use crate::core::{Outcome, QsimError};
use crate::operations::Gate;
use crate::simulation::Simulator;

/// Prepares `initial`, applies H twice and measures.
///
/// H is its own inverse, so the superposition created by the first H is
/// undone by the second and the measurement always returns `initial`.
pub fn reversible_gate(sim: &mut Simulator, initial: Outcome) -> Result<Outcome, QsimError> {
    sim.with_qubits(1, |sim, q| {
        let qubit = q[0];
        sim.set(qubit, initial)?;
        sim.gate(qubit, Gate::H)?;
        sim.gate(qubit, Gate::H)?;
        let result = sim.measure(qubit)?;
        sim.reset(qubit)?;
        Ok(result)
    })
}
