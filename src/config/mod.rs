//! Configuration for the demonstration run: TOML file plus command line.

use crate::simulation::SimulatorConfig;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

#[derive(Debug, Clone, Parser)]
#[command(name = "qtour")]
#[command(about = "A guided console tour of quantum operations on a state-vector simulator")]
pub struct CliArgs {
    #[arg(long, short, help = "Read settings from a TOML file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Seed for the simulator's random generator")]
    pub seed: Option<u64>,

    #[arg(long, help = "Do not wait for input between sections")]
    pub no_pause: bool,

    #[arg(long, help = "Trials per Bell test run [default: 1000]")]
    pub bell_trials: Option<usize>,

    #[arg(long, help = "Width of generated random numbers in bits [default: 8]")]
    pub random_bits: Option<u32>,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Settings for a demonstration run. Every field has a default, so an empty
/// TOML file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub seed: Option<u64>,
    pub pause: bool,
    pub bell_trials: usize,
    pub random_bits: u32,
    pub max_qubits: usize,
    pub validate_states: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: None,
            pause: true,
            bell_trials: 1000,
            random_bits: 8,
            max_qubits: SimulatorConfig::default().max_qubits,
            validate_states: false,
        }
    }
}

impl DemoConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File settings (when `--config` is given) overridden by explicit flags.
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if args.seed.is_some() {
            config.seed = args.seed;
        }
        if args.no_pause {
            config.pause = false;
        }
        if let Some(trials) = args.bell_trials {
            config.bell_trials = trials;
        }
        if let Some(bits) = args.random_bits {
            config.random_bits = bits;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.random_bits == 0 || self.random_bits > crate::algorithms::MAX_RANDOM_BITS {
            return Err(ConfigError::Invalid {
                message: format!(
                    "random_bits must be between 1 and {}, got {}",
                    crate::algorithms::MAX_RANDOM_BITS,
                    self.random_bits
                ),
            });
        }
        // teleportation needs three qubits at once
        if self.max_qubits < 3 {
            return Err(ConfigError::Invalid {
                message: format!("max_qubits must be at least 3, got {}", self.max_qubits),
            });
        }
        Ok(())
    }

    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            seed: self.seed,
            max_qubits: self.max_qubits,
            validate_states: self.validate_states,
            ..SimulatorConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["qtour"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn empty_toml_yields_defaults() {
        assert_eq!(DemoConfig::from_toml_str("").unwrap(), DemoConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(DemoConfig::from_toml_str("bell_trails = 10").is_err());
    }

    #[test]
    fn cli_flags_override_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 1\nbell_trials = 50\nrandom_bits = 4\npause = true").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = DemoConfig::from_args(&args(&["--config", &path, "--seed", "9", "--no-pause"])).unwrap();
        assert_eq!(config.seed, Some(9));
        assert!(!config.pause);
        assert_eq!(config.bell_trials, 50);
        assert_eq!(config.random_bits, 4);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = DemoConfig::from_args(&args(&["--config", "/definitely/not/here.toml"])).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn out_of_range_random_bits_is_invalid() {
        let err = DemoConfig::from_args(&args(&["--random-bits", "64"])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn simulator_config_carries_seed_and_limits() {
        let config = DemoConfig { seed: Some(42), max_qubits: 5, ..DemoConfig::default() };
        let sim = config.simulator_config();
        assert_eq!(sim.seed, Some(42));
        assert_eq!(sim.max_qubits, 5);
    }
}
