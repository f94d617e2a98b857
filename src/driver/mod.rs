// src/driver/mod.rs

//! The console tour: runs each demonstration in a fixed order, prints the
//! results and pauses for the user between sections.
//!
//! Input and output are generic so the whole run can be driven from memory.

use crate::algorithms::{self, Oracle};
use crate::config::DemoConfig;
use crate::core::{Outcome, QsimError};
use crate::simulation::Simulator;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error(transparent)]
    Simulation(#[from] QsimError),

    #[error("Console I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("No Deutsch-Jozsa result recorded for oracle {0}")]
    MissingResult(Oracle),
}

/// The sections of the tour, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    ReversibleGate,
    MeasurementCollapse,
    RandomNumbers,
    BellTest,
    DeutschJozsa,
    TeleportFalse,
    TeleportTrue,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::ReversibleGate,
        Section::MeasurementCollapse,
        Section::RandomNumbers,
        Section::BellTest,
        Section::DeutschJozsa,
        Section::TeleportFalse,
        Section::TeleportTrue,
    ];

    /// Name shown in the pause prompt.
    pub fn title(self) -> &'static str {
        match self {
            Section::ReversibleGate => "Reversable gate",
            Section::MeasurementCollapse => "Measurement superposition collapsing",
            Section::RandomNumbers => "Random number generator",
            Section::BellTest => "Bell test",
            Section::DeutschJozsa => "Deutsch-Jozsa",
            Section::TeleportFalse => "Teleportation part 1",
            Section::TeleportTrue => "Teleportation part 2",
        }
    }

    /// How many times the section calls into its demonstration.
    pub fn invocations(self) -> usize {
        match self {
            Section::ReversibleGate => 5,
            Section::MeasurementCollapse => 15,
            Section::RandomNumbers => 10,
            Section::BellTest => BELL_INITIALS.len(),
            Section::DeutschJozsa => DEUTSCH_JOZSA_ORDER.len(),
            Section::TeleportFalse | Section::TeleportTrue => 5,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

const BELL_INITIALS: [Outcome; 2] = [Outcome::Zero, Outcome::One];

/// Oracles are queried in this order...
const DEUTSCH_JOZSA_ORDER: [Oracle; 4] = [Oracle::Constant0, Oracle::Constant1, Oracle::Negation, Oracle::Identity];
/// ...and printed in this one.
const DEUTSCH_JOZSA_PRINT: [Oracle; 4] = [Oracle::Constant0, Oracle::Constant1, Oracle::Identity, Oracle::Negation];

/// Received teleport bits are printed capitalised; the `msg==` label is not.
pub fn display_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// How many demonstration calls each section made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoReport {
    invocations: Vec<(Section, usize)>,
}

impl DemoReport {
    fn record(&mut self, section: Section, calls: usize) {
        self.invocations.push((section, calls));
    }

    /// Calls made by `section`, or 0 if it never ran.
    pub fn count(&self, section: Section) -> usize {
        self.invocations
            .iter()
            .filter(|(s, _)| *s == section)
            .map(|(_, n)| n)
            .sum()
    }

    /// Sections in the order they ran.
    pub fn sections(&self) -> Vec<Section> {
        self.invocations.iter().map(|(s, _)| *s).collect()
    }
}

/// Runs the tour against a simulator.
pub struct Driver<R, W> {
    config: DemoConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    pub fn new(config: DemoConfig, input: R, output: W) -> Self {
        Self { config, input, output }
    }

    /// Consumes the driver, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs every section in order. Any simulator error aborts the run.
    pub fn run(&mut self, sim: &mut Simulator) -> Result<DemoReport, DriverError> {
        let mut report = DemoReport::default();
        for section in Section::ALL {
            self.pause(section.title())?;
            info!(%section, "starting section");
            let calls = self.run_section(sim, section)?;
            report.record(section, calls);
        }
        write!(self.output, "\n\nEnd\n")?;
        self.wait_for_ack()?;
        Ok(report)
    }

    fn run_section(&mut self, sim: &mut Simulator, section: Section) -> Result<usize, DriverError> {
        let mut calls = 0;
        match section {
            Section::ReversibleGate => {
                for i in 0..section.invocations() {
                    let initial = if i % 2 == 0 { Outcome::Zero } else { Outcome::One };
                    let result = algorithms::reversible_gate(sim, initial)?;
                    calls += 1;
                    writeln!(self.output, "Reversable gate result is: {}. Initial value: {}", result, initial)?;
                }
            }
            Section::MeasurementCollapse => {
                for i in 0..section.invocations() {
                    let initial = if i % 2 == 0 { Outcome::One } else { Outcome::Zero };
                    let (first, second) = algorithms::measurement_collapsing_superposition(sim, initial)?;
                    calls += 1;
                    writeln!(
                        self.output,
                        "Reversable gate result is: {}. Result2: {}. Inital value: {}",
                        first, second, initial
                    )?;
                }
            }
            Section::RandomNumbers => {
                for _ in 0..section.invocations() {
                    let number = algorithms::generate_random_number(sim, self.config.random_bits)?;
                    calls += 1;
                    writeln!(self.output, "Random number is: {}", number)?;
                }
            }
            Section::BellTest => {
                for initial in BELL_INITIALS {
                    let res = algorithms::bell_test(sim, self.config.bell_trials, initial)?;
                    calls += 1;
                    writeln!(
                        self.output,
                        "Init:{:<4} 0s={:<4} 1s={:<4} Agrees = {:<4}",
                        initial, res.zeros, res.ones, res.agrees
                    )?;
                }
            }
            Section::DeutschJozsa => {
                let mut results = HashMap::with_capacity(DEUTSCH_JOZSA_ORDER.len());
                for oracle in DEUTSCH_JOZSA_ORDER {
                    results.insert(oracle, algorithms::deutsch_jozsa(sim, oracle)?);
                    calls += 1;
                }
                for oracle in DEUTSCH_JOZSA_PRINT {
                    let result = results.get(&oracle).ok_or(DriverError::MissingResult(oracle))?;
                    writeln!(self.output, "{}: {}", oracle, result)?;
                }
            }
            Section::TeleportFalse | Section::TeleportTrue => {
                let message = section == Section::TeleportTrue;
                for _ in 0..section.invocations() {
                    let received = algorithms::send_message(sim, message)?;
                    calls += 1;
                    writeln!(self.output, "Teleport (msg=={}): {}", message, display_bool(received))?;
                }
            }
        }
        Ok(calls)
    }

    fn pause(&mut self, name: &str) -> Result<(), DriverError> {
        write!(self.output, "\n\nPress Enter to start {}\n\n", name)?;
        self.wait_for_ack()
    }

    fn wait_for_ack(&mut self) -> Result<(), DriverError> {
        self.output.flush()?;
        if self.config.pause {
            // EOF counts as acknowledgment
            let mut line = String::new();
            self.input.read_line(&mut line)?;
        }
        Ok(())
    }
}
