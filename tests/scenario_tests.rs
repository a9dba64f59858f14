// tests/scenario_tests.rs

use pumpq::{
    AlarmLogic, Backend, HarnessConfig, PumpqError, SCENARIOS, SystemState, build_pump_circuit, evaluate,
    reference_outputs, run_all, run_all_with,
};

const SHUTDOWN: &str = "Shutdown/OFF";

#[test]
fn test_six_of_seven_scenarios_pass() {
    let report = run_all(&SCENARIOS);
    assert_eq!(report.rows.len(), 7);
    assert_eq!(report.passed_count(), 6);
    assert!(!report.all_passed());

    let failures: Vec<&str> = report.failures().map(|r| r.scenario.name).collect();
    assert_eq!(failures, vec![SHUTDOWN]);
}

#[test]
fn test_shutdown_row_measures_no_alarm() {
    let report = run_all(&SCENARIOS);
    let shutdown = report.row(SHUTDOWN).expect("shutdown row present");
    assert_eq!(shutdown.measured, Some((false, false)));
    assert_eq!(shutdown.scenario.expected(), (false, true));
    assert!(shutdown.error.is_none());
    assert_eq!(shutdown.system_state(), Some(SystemState::StandbyOff));

    // The boolean reference agrees with the circuit, not with the table.
    assert_eq!(reference_outputs(&shutdown.scenario.readings), (false, false));
}

#[test]
fn test_passing_rows_match_reference_and_states() {
    let report = run_all(&SCENARIOS);
    for row in report.rows.iter().filter(|r| r.passed()) {
        assert_eq!(row.measured, Some(reference_outputs(&row.scenario.readings)));
        let expected_state =
            if row.scenario.name == "Normal Operation" { SystemState::NormalOperation } else { SystemState::FaultDetected };
        assert_eq!(row.system_state(), Some(expected_state), "wrong state for {}", row.scenario.name);
    }
}

#[test]
fn test_demorgan_gives_same_table_results() {
    let parity = run_all(&SCENARIOS);
    let config = HarnessConfig { alarm: AlarmLogic::DeMorgan, ..Default::default() };
    let demorgan = run_all_with(&SCENARIOS, &config);

    let measured = |r: &pumpq::Report| r.rows.iter().map(|row| row.measured).collect::<Vec<_>>();
    assert_eq!(measured(&parity), measured(&demorgan));
    assert_eq!(demorgan.passed_count(), 6);
}

#[test]
fn test_state_vector_backend_report() -> Result<(), PumpqError> {
    let config = HarnessConfig::from_lookup(|key| match key {
        "PUMPQ_BACKEND" => Some("statevector".to_string()),
        "PUMPQ_SHOTS" => Some("32".to_string()),
        _ => None,
    })?;
    let report = run_all_with(&SCENARIOS, &config);
    assert_eq!(report.backend, Backend::StateVector);
    assert_eq!(report.rows, run_all(&SCENARIOS).rows);
    Ok(())
}

#[test]
fn test_each_scenario_uses_a_fresh_circuit() {
    // Evaluating rows in any order yields the same outputs.
    let forward: Vec<_> = SCENARIOS
        .iter()
        .map(|s| evaluate(&build_pump_circuit(&s.readings, AlarmLogic::ParityCascade)))
        .collect();
    let mut backward: Vec<_> = SCENARIOS
        .iter()
        .rev()
        .map(|s| evaluate(&build_pump_circuit(&s.readings, AlarmLogic::ParityCascade)))
        .collect();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn test_report_text() {
    let text = run_all(&SCENARIOS).to_string();
    assert!(text.contains("Industrial Pump Monitoring System"));
    assert!(text.contains("6/7 scenarios passed"));
    let shutdown = text.lines().find(|l| l.starts_with(SHUTDOWN)).expect("shutdown line");
    assert!(shutdown.contains("0 1 1 1 0 0"));
    assert!(shutdown.ends_with("✗ FAIL"));
    assert_eq!(text.matches("✓ PASS").count(), 6);
}
