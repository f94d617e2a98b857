use crate::core::QsimError;
use crate::operations::Gate;
use crate::simulation::Simulator;

/// Largest bit width accepted by [`generate_random_number`].
pub const MAX_RANDOM_BITS: u32 = 63;

/// Draws a uniformly random integer in `0..2^bits`.
///
/// Every bit comes from a fresh qubit put in superposition with H and
/// measured; bits are assembled most significant first.
pub fn generate_random_number(sim: &mut Simulator, bits: u32) -> Result<u64, QsimError> {
    if bits == 0 || bits > MAX_RANDOM_BITS {
        return Err(QsimError::invalid(format!(
            "Random number width must be between 1 and {} bits, got {}",
            MAX_RANDOM_BITS, bits
        )));
    }

    let mut value = 0u64;
    for _ in 0..bits {
        let bit = sim.with_qubits(1, |sim, q| {
            sim.gate(q[0], Gate::H)?;
            let outcome = sim.measure(q[0])?;
            sim.reset(q[0])?;
            Ok(outcome)
        })?;
        value = (value << 1) | bit.bit();
    }
    Ok(value)
}
