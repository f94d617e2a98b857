use crate::core::{Outcome, QsimError, QubitId};
use crate::operations::Gate;
use crate::simulation::Simulator;
use tracing::trace;

/// Moves the state of `msg` onto `there`, using `here` as the sender's half
/// of a Bell pair. `here` and `there` must start in |0>.
///
/// Afterwards `msg` and `here` hold the two classical correction bits (they
/// have been measured) and `there` holds the original state of `msg`.
pub fn teleport(sim: &mut Simulator, msg: QubitId, here: QubitId, there: QubitId) -> Result<(), QsimError> {
    // shared Bell pair
    sim.gate(here, Gate::H)?;
    sim.cnot(here, there)?;

    // Bell-basis measurement on the sender side
    sim.cnot(msg, here)?;
    sim.gate(msg, Gate::H)?;
    let m_msg = sim.measure(msg)?;
    let m_here = sim.measure(here)?;
    trace!(%m_msg, %m_here, "teleport corrections");

    if m_msg == Outcome::One {
        sim.gate(there, Gate::Z)?;
    }
    if m_here == Outcome::One {
        sim.gate(there, Gate::X)?;
    }
    Ok(())
}

/// Encodes `message` in a qubit, teleports it and reads it back.
pub fn send_message(sim: &mut Simulator, message: bool) -> Result<bool, QsimError> {
    sim.with_qubits(3, |sim, q| {
        let (msg, here, there) = (q[0], q[1], q[2]);
        if message {
            sim.gate(msg, Gate::X)?;
        }
        teleport(sim, msg, here, there)?;
        let received = sim.measure(there)?.is_one();

        for qubit in [msg, here, there] {
            sim.reset(qubit)?;
        }
        Ok(received)
    })
}
