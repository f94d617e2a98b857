// src/validation/mod.rs

//! Consistency checks on a [`StateVector`].

use crate::core::{QsimError, StateVector};

/// Default allowed deviation of the squared norm from 1.
pub const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that the state is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QsimError::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), QsimError> {
    let tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm = state.norm_sqr();
    if (norm - 1.0).abs() > tolerance {
        Err(QsimError::Incoherence { norm, tolerance })
    } else {
        Ok(())
    }
}

/// Probability that the qubit stored in bit `slot` measures as `One`.
pub fn probability_of_one(state: &StateVector, slot: usize) -> f64 {
    let mask = 1usize << slot;
    state
        .amplitudes()
        .iter()
        .enumerate()
        .filter(|(k, _)| k & mask != 0)
        .map(|(_, c)| c.norm_sqr())
        .sum()
}

/// Returns `Some(p)` with the probability of `One` when the qubit in bit
/// `slot` is not in |0> within `tolerance`, `None` when it is clean.
pub fn dirty_probability(state: &StateVector, slot: usize, tolerance: f64) -> Option<f64> {
    let p = probability_of_one(state, slot);
    (p > tolerance).then_some(p)
}

/// Runs all state checks. Dimension must be a non-zero power of two and the
/// state must be normalized.
pub fn validate_state(state: &StateVector, tolerance: Option<f64>) -> Result<(), QsimError> {
    if !state.dim().is_power_of_two() {
        return Err(QsimError::Simulation {
            message: format!("State dimension {} is not a power of two", state.dim()),
        });
    }
    check_normalization(state, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn plus_zero() -> StateVector {
        // |q1=0> ⊗ |+> on q0
        StateVector::new(vec![
            Complex::new(FRAC_1_SQRT_2, 0.0),
            Complex::new(FRAC_1_SQRT_2, 0.0),
            Complex::new(0.0, 0.0),
            Complex::new(0.0, 0.0),
        ])
    }

    #[test]
    fn normalized_state_passes() {
        assert!(validate_state(&plus_zero(), None).is_ok());
    }

    #[test]
    fn unnormalized_state_is_incoherent() {
        let state = StateVector::new(vec![Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)]);
        match check_normalization(&state, None) {
            Err(QsimError::Incoherence { norm, .. }) => assert!((norm - 2.0).abs() < 1e-12),
            other => panic!("expected incoherence, got {:?}", other),
        }
    }

    #[test]
    fn non_power_of_two_dimension_is_rejected() {
        let state = StateVector::new(vec![Complex::new(1.0, 0.0); 3]);
        assert!(matches!(validate_state(&state, None), Err(QsimError::Simulation { .. })));
    }

    #[test]
    fn probability_of_one_per_slot() {
        let state = plus_zero();
        assert!((probability_of_one(&state, 0) - 0.5).abs() < 1e-12);
        assert!(probability_of_one(&state, 1).abs() < 1e-12);
        assert!(dirty_probability(&state, 1, 1e-9).is_none());
        assert!(dirty_probability(&state, 0, 1e-9).is_some());
    }
}
