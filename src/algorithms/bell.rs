use crate::core::{Outcome, QsimError};
use crate::operations::Gate;
use crate::simulation::Simulator;
use tracing::debug;

/// Tallies from [`bell_test`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BellTestResult {
    /// Trials where the first qubit measured `Zero`.
    pub zeros: usize,
    /// Trials where the first qubit measured `One`.
    pub ones: usize,
    /// Trials where both qubits measured the same value.
    pub agrees: usize,
}

/// Runs `count` trials of: prepare the first qubit in `initial` and the second
/// in |0>, entangle them with H and CNOT, then measure both.
///
/// The first qubit lands on `Zero`/`One` about equally often and the second
/// always agrees with it, so `agrees == count` regardless of `initial`.
pub fn bell_test(sim: &mut Simulator, count: usize, initial: Outcome) -> Result<BellTestResult, QsimError> {
    let result = sim.with_qubits(2, |sim, q| {
        let (first, second) = (q[0], q[1]);
        let mut tally = BellTestResult::default();
        for _ in 0..count {
            sim.set(first, initial)?;
            sim.set(second, Outcome::Zero)?;

            sim.gate(first, Gate::H)?;
            sim.cnot(first, second)?;
            let a = sim.measure(first)?;
            let b = sim.measure(second)?;

            if a == b {
                tally.agrees += 1;
            }
            match a {
                Outcome::Zero => tally.zeros += 1,
                Outcome::One => tally.ones += 1,
            }
        }
        sim.reset(first)?;
        sim.reset(second)?;
        Ok(tally)
    })?;
    debug!(count, %initial, ?result, "bell test finished");
    Ok(result)
}
