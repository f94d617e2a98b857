//! Simulator configuration

/// Configuration for the [`Simulator`](super::Simulator).
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Random number generator seed for reproducible measurements.
    ///
    /// If `None`, the generator is seeded from the operating system.
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Maximum number of simultaneously allocated qubits.
    ///
    /// The state vector needs `16 * 2^n` bytes, so this bounds memory use.
    ///
    /// Default: 24
    pub max_qubits: usize,

    /// Tolerance for normalization checks and for deciding whether a
    /// released qubit is in |0>.
    ///
    /// Default: 1e-9
    pub tolerance: f64,

    /// Check normalization after every step, measurements and resets included.
    ///
    /// Default: false
    pub validate_states: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_qubits: 24,
            tolerance: 1e-9,
            validate_states: false,
        }
    }
}

impl SimulatorConfig {
    /// Default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    /// Sets the qubit limit.
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Enables or disables per-step normalization checks.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_states = enabled;
        self
    }
}
