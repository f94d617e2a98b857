// tests/algorithms_tests.rs

use qtour::algorithms::{
    self, Classification, MAX_RANDOM_BITS, Oracle, bell_test, deutsch_jozsa, generate_random_number,
    measurement_collapsing_superposition, reversible_gate, send_message,
};
use qtour::{Outcome, QsimError, Simulator};

fn assert_all_released(sim: &Simulator) {
    assert!(
        sim.allocated_qubits().is_empty(),
        "Qubits left allocated: {:?}",
        sim.allocated_qubits()
    );
}

#[test]
fn test_reversible_gate_returns_initial() -> Result<(), QsimError> {
    let mut sim = Simulator::seeded(21);
    for initial in [Outcome::Zero, Outcome::One, Outcome::Zero, Outcome::One] {
        assert_eq!(reversible_gate(&mut sim, initial)?, initial);
    }
    assert_all_released(&sim);
    Ok(())
}

#[test]
fn test_collapse_second_measurement_repeats_first() -> Result<(), QsimError> {
    let mut sim = Simulator::seeded(22);
    let mut seen = [false; 2];
    for i in 0..60 {
        let initial = if i % 2 == 0 { Outcome::One } else { Outcome::Zero };
        let (first, second) = measurement_collapsing_superposition(&mut sim, initial)?;
        assert_eq!(first, second);
        seen[first.bit() as usize] = true;
    }
    assert!(seen[0] && seen[1], "Superposition should collapse both ways");
    assert_all_released(&sim);
    Ok(())
}

#[test]
fn test_random_numbers_stay_in_range() -> Result<(), QsimError> {
    let mut sim = Simulator::seeded(23);
    let mut distinct = std::collections::HashSet::new();
    for _ in 0..40 {
        let n = generate_random_number(&mut sim, 4)?;
        assert!(n < 16, "{} does not fit in 4 bits", n);
        distinct.insert(n);
    }
    assert!(distinct.len() > 1, "Random numbers should vary");

    let wide = generate_random_number(&mut sim, MAX_RANDOM_BITS)?;
    assert!(wide < 1u64 << MAX_RANDOM_BITS);
    assert_all_released(&sim);
    Ok(())
}

#[test]
fn test_random_number_width_is_checked() {
    let mut sim = Simulator::seeded(24);
    for bits in [0, MAX_RANDOM_BITS + 1] {
        let err = generate_random_number(&mut sim, bits).unwrap_err();
        assert!(matches!(err, QsimError::InvalidOperation { .. }), "Unexpected error: {:?}", err);
    }
}

#[test]
fn test_bell_test_counts() -> Result<(), QsimError> {
    let mut sim = Simulator::seeded(25);
    let count = 1000;
    for initial in [Outcome::Zero, Outcome::One] {
        let res = bell_test(&mut sim, count, initial)?;
        assert_eq!(res.zeros + res.ones, count);
        assert_eq!(res.agrees, count, "Entangled qubits must always agree");
        // roughly balanced; 1000 fair flips stay well inside these bounds
        assert!(res.zeros > 400 && res.zeros < 600, "Unbalanced tally: {:?}", res);
    }
    assert_all_released(&sim);
    Ok(())
}

#[test]
fn test_bell_test_with_zero_trials() -> Result<(), QsimError> {
    let mut sim = Simulator::seeded(26);
    let res = bell_test(&mut sim, 0, Outcome::One)?;
    assert_eq!(res, algorithms::BellTestResult::default());
    assert_all_released(&sim);
    Ok(())
}

#[test]
fn test_deutsch_jozsa_classifies_all_oracles() -> Result<(), QsimError> {
    let mut sim = Simulator::seeded(27);
    for oracle in Oracle::ALL {
        for _ in 0..5 {
            let res = deutsch_jozsa(&mut sim, oracle)?;
            assert_eq!(res.f0.is_one(), oracle.evaluate(false), "f(0) mismatch for {}", oracle);
            assert_eq!(res.f1.is_one(), oracle.evaluate(true), "f(1) mismatch for {}", oracle);
            let expected = if oracle.is_balanced() { Classification::Balanced } else { Classification::Constant };
            assert_eq!(res.classification(), expected, "Wrong verdict for {}", oracle);
        }
    }
    assert_all_released(&sim);
    Ok(())
}

#[test]
fn test_named_oracle_shortcuts() -> Result<(), QsimError> {
    let mut sim = Simulator::seeded(28);
    assert_eq!(algorithms::constant0(&mut sim)?.to_string(), "Zero Zero Zero");
    assert_eq!(algorithms::constant1(&mut sim)?.to_string(), "One One Zero");
    assert_eq!(algorithms::identity(&mut sim)?.to_string(), "Zero One One");
    assert_eq!(algorithms::negation(&mut sim)?.to_string(), "One Zero One");
    Ok(())
}

#[test]
fn test_teleport_delivers_message() -> Result<(), QsimError> {
    let mut sim = Simulator::seeded(29);
    for _ in 0..20 {
        assert!(!send_message(&mut sim, false)?);
        assert!(send_message(&mut sim, true)?);
    }
    assert_all_released(&sim);
    Ok(())
}

#[test]
fn test_teleport_moves_superposition() -> Result<(), QsimError> {
    let mut sim = Simulator::seeded(30);
    sim.with_qubits(3, |sim, q| {
        let (msg, here, there) = (q[0], q[1], q[2]);
        sim.gate(msg, qtour::Gate::H)?;
        algorithms::teleport(sim, msg, here, there)?;
        let p = sim.probability_of_one(there)?;
        assert!((p - 0.5).abs() < 1e-9, "P(One) after teleport was {}", p);
        // H undoes the teleported H, leaving |0>
        sim.gate(there, qtour::Gate::H)?;
        assert!(sim.probability_of_one(there)? < 1e-9);
        for qubit in [msg, here] {
            sim.reset(qubit)?;
        }
        Ok(())
    })?;
    assert_all_released(&sim);
    Ok(())
}

#[test]
fn test_programs_fail_without_capacity() {
    let mut sim = Simulator::with_config(qtour::SimulatorConfig::seeded(31).with_max_qubits(2));
    let err = send_message(&mut sim, true).unwrap_err();
    assert!(matches!(err, QsimError::CapacityExceeded { max: 2, .. }), "Unexpected error: {:?}", err);
    assert_all_released(&sim);
}
