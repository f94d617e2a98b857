// src/simulation/mod.rs

//! The simulation context.
//!
//! A [`Simulator`] owns a live register of qubits that callers allocate,
//! manipulate and release one operation at a time (so classical code can
//! branch on measurement outcomes), and can also execute a whole
//! [`Circuit`] on a fresh register.

mod config;
pub(crate) mod engine;
mod results;

pub use config::SimulatorConfig;
pub use results::SimulationResult;

use crate::circuits::Circuit;
use crate::core::{Outcome, QsimError, QubitId, StateVector};
use crate::operations::{Gate, Operation};
use crate::validation;
use engine::SimulationEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

/// A quantum simulation context.
///
/// # Examples
///
/// ```
/// use qtour::{Gate, Simulator, SimulatorConfig};
///
/// let mut sim = Simulator::with_config(SimulatorConfig::seeded(7));
/// let received = sim
///     .with_qubits(2, |sim, q| {
///         sim.gate(q[0], Gate::H)?;
///         sim.cnot(q[0], q[1])?;
///         let a = sim.measure(q[0])?;
///         let b = sim.measure(q[1])?;
///         sim.reset(q[0])?;
///         sim.reset(q[1])?;
///         Ok((a, b))
///     })
///     .unwrap();
/// // Bell pair: both halves always agree
/// assert_eq!(received.0, received.1);
/// ```
#[derive(Debug)]
pub struct Simulator {
    config: SimulatorConfig,
    engine: SimulationEngine,
    rng: StdRng,
    next_id: u64,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::with_config(SimulatorConfig::default())
    }
}

impl Simulator {
    /// Creates a simulator seeded from the operating system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator from an explicit configuration.
    pub fn with_config(config: SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        debug!(seed = ?config.seed, max_qubits = config.max_qubits, "simulator created");
        Self {
            engine: SimulationEngine::new(config.max_qubits, config.tolerance),
            config,
            rng,
            next_id: 0,
        }
    }

    /// Shorthand for a deterministic simulator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_config(SimulatorConfig::seeded(seed))
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    //---------------------------------------------------------------------
    // Qubit management
    //---------------------------------------------------------------------

    /// Allocates a fresh qubit in |0>.
    pub fn allocate(&mut self) -> Result<QubitId, QsimError> {
        let qubit = QubitId(self.next_id);
        self.engine.allocate(qubit)?;
        self.next_id += 1;
        Ok(qubit)
    }

    /// Allocates `count` qubits, all or nothing.
    pub fn allocate_many(&mut self, count: usize) -> Result<Vec<QubitId>, QsimError> {
        let allocated = self.engine.num_qubits();
        if allocated + count > self.config.max_qubits {
            return Err(QsimError::CapacityExceeded { allocated, max: self.config.max_qubits });
        }
        (0..count).map(|_| self.allocate()).collect()
    }

    /// Releases a qubit. Fails with [`QsimError::QubitNotReleased`] (and keeps
    /// the qubit allocated) unless it is in |0>.
    pub fn release(&mut self, qubit: QubitId) -> Result<(), QsimError> {
        self.engine.release(qubit)
    }

    /// Resets and releases a qubit regardless of its state.
    fn discard(&mut self, qubit: QubitId) -> Result<(), QsimError> {
        self.engine.reset(qubit, &mut self.rng)?;
        self.engine.release(qubit)
    }

    /// Runs `body` with `count` freshly allocated qubits and releases them
    /// afterwards, on success and on failure alike.
    ///
    /// A body that returns `Ok` but leaves a qubit outside |0> yields
    /// [`QsimError::QubitNotReleased`]; the qubit is still reclaimed.
    pub fn with_qubits<T, F>(&mut self, count: usize, body: F) -> Result<T, QsimError>
    where
        F: FnOnce(&mut Self, &[QubitId]) -> Result<T, QsimError>,
    {
        let qubits = self.allocate_many(count)?;
        let outcome = body(self, &qubits);

        let mut release_error = None;
        for qubit in qubits.iter().rev() {
            if !self.engine.contains(qubit) {
                continue;
            }
            if let Err(err) = self.release(*qubit) {
                if outcome.is_ok() {
                    warn!(%qubit, error = %err, "qubit left dirty at end of scope");
                    release_error.get_or_insert(err);
                }
                if let Err(err) = self.discard(*qubit) {
                    warn!(%qubit, error = %err, "failed to reclaim qubit");
                    release_error.get_or_insert(err);
                }
            }
        }

        match (outcome, release_error) {
            (Err(err), _) => Err(err),
            (Ok(_), Some(err)) => Err(err),
            (Ok(value), None) => Ok(value),
        }
    }

    /// Qubits currently allocated, in register order.
    pub fn allocated_qubits(&self) -> &[QubitId] {
        self.engine.qubits()
    }

    //---------------------------------------------------------------------
    // Live operations
    //---------------------------------------------------------------------

    /// Applies any operation. Returns the outcomes of a `Measure`, in target
    /// order; other operations return an empty list.
    pub fn apply(&mut self, op: &Operation) -> Result<Vec<Outcome>, QsimError> {
        Self::step(&mut self.engine, &mut self.rng, &self.config, op)
    }

    /// Applies `gate` to `target`.
    pub fn gate(&mut self, target: QubitId, gate: Gate) -> Result<(), QsimError> {
        self.apply(&Operation::Apply { target, gate }).map(|_| ())
    }

    /// Applies `gate` to `target` controlled on `control`.
    pub fn controlled(&mut self, control: QubitId, target: QubitId, gate: Gate) -> Result<(), QsimError> {
        self.apply(&Operation::Controlled { control, target, gate }).map(|_| ())
    }

    /// CNOT with the given control and target.
    pub fn cnot(&mut self, control: QubitId, target: QubitId) -> Result<(), QsimError> {
        self.controlled(control, target, Gate::X)
    }

    /// Measures `qubit` in the computational basis.
    pub fn measure(&mut self, qubit: QubitId) -> Result<Outcome, QsimError> {
        let outcomes = self.apply(&Operation::measure(vec![qubit]))?;
        outcomes.into_iter().next().ok_or_else(|| QsimError::Simulation {
            message: format!("Measurement of {} produced no outcome", qubit),
        })
    }

    /// Returns `qubit` to |0>.
    pub fn reset(&mut self, qubit: QubitId) -> Result<(), QsimError> {
        self.apply(&Operation::Reset { target: qubit }).map(|_| ())
    }

    /// Puts `qubit` into the basis state matching `desired`.
    pub fn set(&mut self, qubit: QubitId, desired: Outcome) -> Result<(), QsimError> {
        if self.measure(qubit)? != desired {
            self.gate(qubit, Gate::X)?;
        }
        Ok(())
    }

    /// Probability that measuring `qubit` now would yield `One`.
    pub fn probability_of_one(&self, qubit: QubitId) -> Result<f64, QsimError> {
        self.engine.probability_of_one(&qubit)
    }

    /// The joint state of all allocated qubits.
    pub fn state(&self) -> &StateVector {
        self.engine.state()
    }

    //---------------------------------------------------------------------
    // Circuits
    //---------------------------------------------------------------------

    /// Runs `circuit` on a fresh register where every qubit starts in |0>.
    ///
    /// The live register is untouched; only the random generator is shared.
    pub fn run(&mut self, circuit: &Circuit) -> Result<SimulationResult, QsimError> {
        let mut result = SimulationResult::new();
        if circuit.is_empty() {
            return Ok(result);
        }

        let mut engine = SimulationEngine::init(circuit.qubits(), self.config.max_qubits, self.config.tolerance)?;
        for op in circuit.operations() {
            let outcomes = Self::step(&mut engine, &mut self.rng, &self.config, op)?;
            if let Operation::Measure { targets } = op {
                for (qubit, outcome) in targets.iter().zip(outcomes) {
                    result.record(*qubit, outcome);
                }
            }
        }
        debug!(operations = circuit.len(), measured = result.measurement_log().len(), "circuit finished");
        Ok(result)
    }

    fn step(
        engine: &mut SimulationEngine,
        rng: &mut StdRng,
        config: &SimulatorConfig,
        op: &Operation,
    ) -> Result<Vec<Outcome>, QsimError> {
        let outcomes = match op {
            Operation::Measure { targets } => {
                targets.iter().map(|q| engine.measure(*q, rng)).collect::<Result<Vec<_>, _>>()?
            }
            Operation::Reset { target } => {
                engine.reset(*target, rng)?;
                Vec::new()
            }
            unitary => {
                engine.apply_operation(unitary)?;
                Vec::new()
            }
        };
        if config.validate_states {
            validation::validate_state(engine.state(), Some(config.tolerance))?;
        }
        Ok(outcomes)
    }
}

impl Drop for Simulator {
    fn drop(&mut self) {
        let remaining = self.engine.num_qubits();
        if remaining > 0 {
            debug!(remaining, "simulator dropped with qubits still allocated");
        }
    }
}
