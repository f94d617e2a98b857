use crate::core::{Outcome, QsimError, QubitId};
use crate::operations::Gate;
use crate::simulation::Simulator;
use std::fmt;

/// The four one-bit boolean functions, as reversible oracles
/// `|x, y> -> |x, y ⊕ f(x)>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Oracle {
    /// f(x) = 0
    Constant0,
    /// f(x) = 1
    Constant1,
    /// f(x) = x
    Identity,
    /// f(x) = ¬x
    Negation,
}

impl Oracle {
    /// All oracles, constant ones first.
    pub const ALL: [Oracle; 4] = [Oracle::Constant0, Oracle::Constant1, Oracle::Identity, Oracle::Negation];

    /// Whether the function is balanced (not constant).
    pub fn is_balanced(self) -> bool {
        matches!(self, Oracle::Identity | Oracle::Negation)
    }

    /// Classical value of the function.
    pub fn evaluate(self, x: bool) -> bool {
        match self {
            Oracle::Constant0 => false,
            Oracle::Constant1 => true,
            Oracle::Identity => x,
            Oracle::Negation => !x,
        }
    }

    /// Applies the oracle to `input` and `output`.
    pub fn apply(self, sim: &mut Simulator, input: QubitId, output: QubitId) -> Result<(), QsimError> {
        match self {
            Oracle::Constant0 => Ok(()),
            Oracle::Constant1 => sim.gate(output, Gate::X),
            Oracle::Identity => sim.cnot(input, output),
            Oracle::Negation => {
                sim.cnot(input, output)?;
                sim.gate(output, Gate::X)
            }
        }
    }
}

impl fmt::Display for Oracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Oracle::Constant0 => "Const0",
            Oracle::Constant1 => "Const1",
            Oracle::Identity => "Identity",
            Oracle::Negation => "Negation",
        })
    }
}

/// Verdict of a Deutsch-Jozsa run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// f(0) == f(1)
    Constant,
    /// f(0) != f(1)
    Balanced,
}

/// Output of [`deutsch_jozsa`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeutschJozsaResult {
    /// Oracle output for input |0>.
    pub f0: Outcome,
    /// Oracle output for input |1>.
    pub f1: Outcome,
    /// Measured input qubit of the interference circuit: `Zero` means
    /// constant, `One` means balanced.
    pub verdict: Outcome,
}

impl DeutschJozsaResult {
    /// Interprets the verdict bit.
    pub fn classification(&self) -> Classification {
        match self.verdict {
            Outcome::Zero => Classification::Constant,
            Outcome::One => Classification::Balanced,
        }
    }
}

impl fmt::Display for DeutschJozsaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.f0, self.f1, self.verdict)
    }
}

/// Queries `oracle` on each basis input, then decides constant vs. balanced
/// with a single query using interference.
pub fn deutsch_jozsa(sim: &mut Simulator, oracle: Oracle) -> Result<DeutschJozsaResult, QsimError> {
    sim.with_qubits(2, |sim, q| {
        let (input, output) = (q[0], q[1]);

        let f0 = query_basis(sim, oracle, input, output, Outcome::Zero)?;
        let f1 = query_basis(sim, oracle, input, output, Outcome::One)?;

        // |0>|1> -> H⊗H -> oracle -> H on input
        sim.set(input, Outcome::Zero)?;
        sim.set(output, Outcome::One)?;
        sim.gate(input, Gate::H)?;
        sim.gate(output, Gate::H)?;
        oracle.apply(sim, input, output)?;
        sim.gate(input, Gate::H)?;
        let verdict = sim.measure(input)?;

        sim.reset(input)?;
        sim.reset(output)?;
        Ok(DeutschJozsaResult { f0, f1, verdict })
    })
}

fn query_basis(
    sim: &mut Simulator,
    oracle: Oracle,
    input: QubitId,
    output: QubitId,
    x: Outcome,
) -> Result<Outcome, QsimError> {
    sim.set(input, x)?;
    sim.set(output, Outcome::Zero)?;
    oracle.apply(sim, input, output)?;
    sim.measure(output)
}

/// [`deutsch_jozsa`] with [`Oracle::Constant0`].
pub fn constant0(sim: &mut Simulator) -> Result<DeutschJozsaResult, QsimError> {
    deutsch_jozsa(sim, Oracle::Constant0)
}

/// [`deutsch_jozsa`] with [`Oracle::Constant1`].
pub fn constant1(sim: &mut Simulator) -> Result<DeutschJozsaResult, QsimError> {
    deutsch_jozsa(sim, Oracle::Constant1)
}

/// [`deutsch_jozsa`] with [`Oracle::Identity`].
pub fn identity(sim: &mut Simulator) -> Result<DeutschJozsaResult, QsimError> {
    deutsch_jozsa(sim, Oracle::Identity)
}

/// [`deutsch_jozsa`] with [`Oracle::Negation`].
pub fn negation(sim: &mut Simulator) -> Result<DeutschJozsaResult, QsimError> {
    deutsch_jozsa(sim, Oracle::Negation)
}
