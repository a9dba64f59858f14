// src/harness/mod.rs

//! Scenario-driven verification of the pump circuit.
//!
//! Each scenario is evaluated on its own freshly built circuit. A mismatch is
//! recorded in the report and never stops the remaining scenarios.

use crate::circuits::pump::{AlarmLogic, build_pump_circuit};
use crate::config::{Backend, HarnessConfig};
use crate::core::PumpqError;
use crate::pump::{ActuatorStates, SensorReadings, SystemState};
use crate::simulation::{Simulator, evaluate};
use std::fmt;
use tracing::{info, info_span, warn};

/// One row of the fixed truth table: named sensor readings and the expected
/// `(A1, A5)` outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scenario {
    /// Row name as printed in the report.
    pub name: &'static str,
    /// Sensor inputs S1..S6.
    pub readings: SensorReadings,
    /// Expected relay output A1.
    pub expected_relay: bool,
    /// Expected alarm output A5.
    pub expected_alarm: bool,
}

impl Scenario {
    /// Builds a scenario from `0`/`1` literals, mirroring the table layout.
    pub const fn from_table(name: &'static str, s: [u8; 6], expected: [u8; 2]) -> Self {
        Self {
            name,
            readings: SensorReadings::from_bits([s[0] == 1, s[1] == 1, s[2] == 1, s[3] == 1, s[4] == 1, s[5] == 1]),
            expected_relay: expected[0] == 1,
            expected_alarm: expected[1] == 1,
        }
    }

    /// Expected `(A1, A5)`.
    pub fn expected(&self) -> (bool, bool) {
        (self.expected_relay, self.expected_alarm)
    }
}

/// The seven reference scenarios.
pub const SCENARIOS: [Scenario; 7] = [
    Scenario::from_table("Normal Operation", [1, 1, 1, 1, 0, 0], [1, 0]),
    Scenario::from_table("Low Pressure", [1, 0, 1, 1, 0, 0], [0, 1]),
    Scenario::from_table("Low Level", [1, 1, 0, 1, 0, 0], [0, 1]),
    Scenario::from_table("No Flow", [1, 1, 1, 0, 0, 0], [0, 1]),
    Scenario::from_table("Overheat", [1, 1, 1, 1, 1, 0], [0, 1]),
    Scenario::from_table("Abnormal Vibration", [1, 1, 1, 1, 0, 1], [0, 1]),
    Scenario::from_table("Shutdown/OFF", [0, 1, 1, 1, 0, 0], [0, 1]),
];

/// Result of evaluating one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    /// The row that was evaluated.
    pub scenario: Scenario,
    /// Decoded `(A1, A5)`, or `None` if evaluation failed.
    pub measured: Option<(bool, bool)>,
    /// Why evaluation failed, if it did.
    pub error: Option<String>,
}

impl ScenarioOutcome {
    /// Returns `true` if the decoded outputs equal the expected ones.
    pub fn passed(&self) -> bool {
        self.measured == Some(self.scenario.expected())
    }

    /// Actuator states implied by the decoded outputs.
    pub fn actuators(&self) -> Option<ActuatorStates> {
        self.measured.map(|(relay, alarm)| ActuatorStates::from_outputs(relay, alarm))
    }

    /// Overall pump state implied by the decoded outputs.
    pub fn system_state(&self) -> Option<SystemState> {
        self.actuators().map(|a| a.system_state())
    }
}

/// Outcome of a full harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Backend that evaluated every row.
    pub backend: Backend,
    /// Alarm construction used for every row.
    pub alarm: AlarmLogic,
    /// One outcome per scenario, in input order.
    pub rows: Vec<ScenarioOutcome>,
}

impl Report {
    /// Number of rows whose outputs matched.
    pub fn passed_count(&self) -> usize {
        self.rows.iter().filter(|r| r.passed()).count()
    }

    /// Returns `true` if every row matched.
    pub fn all_passed(&self) -> bool {
        self.rows.iter().all(ScenarioOutcome::passed)
    }

    /// Rows whose outputs did not match, in table order.
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.rows.iter().filter(|r| !r.passed())
    }

    /// Looks up a row by scenario name.
    pub fn row(&self, name: &str) -> Option<&ScenarioOutcome> {
        self.rows.iter().find(|r| r.scenario.name == name)
    }
}

/// Evaluates `scenarios` with the default configuration (register backend,
/// parity alarm).
pub fn run_all(scenarios: &[Scenario]) -> Report {
    run_all_with(scenarios, &HarnessConfig::default())
}

/// Evaluates every scenario with the given configuration.
pub fn run_all_with(scenarios: &[Scenario], config: &HarnessConfig) -> Report {
    let span = info_span!("harness", backend = %config.backend, alarm = %config.alarm);
    let _enter = span.enter();

    let rows: Vec<ScenarioOutcome> = scenarios
        .iter()
        .map(|scenario| {
            let outcome = match evaluate_scenario(scenario, config) {
                Ok(measured) => ScenarioOutcome { scenario: *scenario, measured: Some(measured), error: None },
                Err(err) => {
                    warn!(scenario = scenario.name, error = %err, "scenario evaluation failed");
                    ScenarioOutcome { scenario: *scenario, measured: None, error: Some(err.to_string()) }
                }
            };
            if outcome.passed() {
                info!(scenario = scenario.name, measured = ?outcome.measured, "scenario passed");
            } else if outcome.measured.is_some() {
                warn!(
                    scenario = scenario.name,
                    measured = ?outcome.measured,
                    expected = ?scenario.expected(),
                    "scenario output mismatch"
                );
            }
            outcome
        })
        .collect();

    let report = Report { backend: config.backend, alarm: config.alarm, rows };
    info!(passed = report.passed_count(), total = report.rows.len(), "harness run finished");
    report
}

fn evaluate_scenario(scenario: &Scenario, config: &HarnessConfig) -> Result<(bool, bool), PumpqError> {
    let circuit = build_pump_circuit(&scenario.readings, config.alarm);
    match config.backend {
        Backend::Register => Ok(evaluate(&circuit)),
        Backend::StateVector => {
            let result = Simulator::with_config(config.simulator).run(&circuit)?;
            match result.most_frequent() {
                Some([relay, alarm]) => Ok((*relay, *alarm)),
                _ => Err(PumpqError::Instability {
                    message: format!("no two-bit outcome recorded for '{}'", scenario.name),
                }),
            }
        }
    }
}

fn bit(value: bool) -> u8 {
    u8::from(value)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(80);
        writeln!(f, "{}", rule)?;
        writeln!(f, "REVERSIBLE CIRCUIT RESULTS - Industrial Pump Monitoring System")?;
        writeln!(f, "backend: {}, alarm logic: {}", self.backend, self.alarm)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "{:<25} {:<20} {:<10} {:<10} Status", "Scenario", "S1 S2 S3 S4 S5 S6", "A1 A5", "Expected")?;
        writeln!(f, "{}", "-".repeat(80))?;
        for row in &self.rows {
            let measured = match row.measured {
                Some((relay, alarm)) => format!("{} {}", bit(relay), bit(alarm)),
                None => "- -".to_string(),
            };
            let (exp_relay, exp_alarm) = row.scenario.expected();
            let expected = format!("{} {}", bit(exp_relay), bit(exp_alarm));
            let status = if row.passed() { "✓ PASS" } else { "✗ FAIL" };
            writeln!(
                f,
                "{:<25} {:<20} {:<10} {:<10} {}",
                row.scenario.name,
                row.scenario.readings.to_string(),
                measured,
                expected,
                status
            )?;
        }
        writeln!(f, "{}", rule)?;
        write!(f, "{}/{} scenarios passed", self.passed_count(), self.rows.len())?;
        for row in self.failures() {
            if let Some(err) = &row.error {
                write!(f, "\n  {}: {}", row.scenario.name, err)?;
            }
        }
        writeln!(f)
    }
}
