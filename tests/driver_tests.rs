// tests/driver_tests.rs

use qtour::config::DemoConfig;
use qtour::driver::{DemoReport, Driver, DriverError, Section, display_bool};
use qtour::{QsimError, Simulator};
use std::io::Cursor;

fn config(seed: u64, pause: bool) -> DemoConfig {
    DemoConfig { seed: Some(seed), pause, bell_trials: 200, ..DemoConfig::default() }
}

// Runs the whole tour from memory, returning the report and the printed text.
fn run_tour(config: DemoConfig, input: &str) -> (Result<DemoReport, DriverError>, String) {
    let mut sim = Simulator::with_config(config.simulator_config());
    let mut driver = Driver::new(config, Cursor::new(input.as_bytes().to_vec()), Vec::new());
    let report = driver.run(&mut sim);
    let output = String::from_utf8(driver.into_output()).expect("output is UTF-8");
    assert!(sim.allocated_qubits().is_empty(), "Tour leaked qubits");
    (report, output)
}

fn lines_starting_with<'a>(output: &'a str, prefix: &str) -> Vec<&'a str> {
    output.lines().filter(|l| l.starts_with(prefix)).collect()
}

#[test]
fn test_sections_run_in_order_with_fixed_counts() {
    let (report, _) = run_tour(config(41, false), "");
    let report = report.expect("tour completes");

    assert_eq!(report.sections(), Section::ALL.to_vec());
    let expected = [5, 15, 10, 2, 4, 5, 5];
    for (section, count) in Section::ALL.into_iter().zip(expected) {
        assert_eq!(report.count(section), count, "Wrong call count for {}", section);
        assert_eq!(section.invocations(), count);
    }
}

#[test]
fn test_output_lines() {
    let (report, output) = run_tour(config(42, false), "");
    assert!(report.is_ok());

    let reversible = lines_starting_with(&output, "Reversable gate result is:");
    // 5 reversible-gate lines plus 15 collapse lines share the prefix
    assert_eq!(reversible.len(), 20);
    assert_eq!(reversible[0], "Reversable gate result is: Zero. Initial value: Zero");
    assert_eq!(reversible[1], "Reversable gate result is: One. Initial value: One");

    let collapse: Vec<_> = reversible.iter().filter(|l| l.contains("Inital value:")).collect();
    assert_eq!(collapse.len(), 15);
    assert!(collapse[0].ends_with("Inital value: One"));
    assert!(collapse[1].ends_with("Inital value: Zero"));

    let randoms = lines_starting_with(&output, "Random number is: ");
    assert_eq!(randoms.len(), 10);
    for line in randoms {
        let n: u64 = line["Random number is: ".len()..].parse().expect("number");
        assert!(n < 256, "{} does not fit in 8 bits", n);
    }

    let bell = lines_starting_with(&output, "Init:");
    assert_eq!(bell.len(), 2);
    assert!(bell[0].starts_with("Init:Zero 0s="));
    assert!(bell[1].starts_with("Init:One  0s="));
    assert!(bell.iter().all(|l| l.contains("Agrees = 200 ")));

    let dj: Vec<_> = output
        .lines()
        .filter(|l| ["Const0:", "Const1:", "Identity:", "Negation:"].iter().any(|p| l.starts_with(p)))
        .collect();
    assert_eq!(
        dj,
        vec!["Const0: Zero Zero Zero", "Const1: One One Zero", "Identity: Zero One One", "Negation: One Zero One"]
    );

    let teleports = lines_starting_with(&output, "Teleport (msg==");
    assert_eq!(teleports.len(), 10);
    assert!(teleports[..5].iter().all(|l| *l == "Teleport (msg==false): False"), "{:?}", teleports);
    assert!(teleports[5..].iter().all(|l| *l == "Teleport (msg==true): True"), "{:?}", teleports);

    assert!(output.trim_end().ends_with("End"));
}

#[test]
fn test_prompts_name_each_section() {
    let (_, output) = run_tour(config(43, false), "");
    let prompts: Vec<_> = output
        .lines()
        .filter_map(|l| l.strip_prefix("Press Enter to start "))
        .collect();
    let titles: Vec<_> = Section::ALL.iter().map(|s| s.title()).collect();
    assert_eq!(prompts, titles);
    assert!(prompts.contains(&"Reversable gate"));
}

#[test]
fn test_pausing_consumes_input_lines() {
    // one acknowledgment per section plus one after "End"
    let input = "\n".repeat(Section::ALL.len() + 1);
    let (report, output) = run_tour(config(44, true), &input);
    assert!(report.is_ok());
    assert!(output.trim_end().ends_with("End"));
}

#[test]
fn test_pausing_treats_eof_as_acknowledgment() {
    let (report, _) = run_tour(config(45, true), "");
    assert_eq!(report.expect("tour completes").count(Section::TeleportTrue), 5);
}

#[test]
fn test_simulator_failure_aborts_tour() {
    // two qubits cover every section except teleportation
    let cfg = DemoConfig { max_qubits: 2, ..config(46, false) };
    let (report, output) = run_tour(cfg, "");

    match report {
        Err(DriverError::Simulation(QsimError::CapacityExceeded { max, .. })) => assert_eq!(max, 2),
        other => panic!("Expected capacity error, got {:?}", other),
    }
    assert!(output.contains("Negation: "));
    assert!(!output.contains("Teleport (msg=="));
    assert!(!output.contains("End"));
}

#[test]
fn test_first_teleport_line_capitalises_received_bit() {
    let (report, output) = run_tour(config(1, false), "");
    assert!(report.is_ok());
    let first = lines_starting_with(&output, "Teleport (msg==")[0];
    assert_eq!(first, "Teleport (msg==false): False");
    assert_eq!(display_bool(true), "True");
}
