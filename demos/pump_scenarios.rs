//! Runs the seven pump scenarios through the reversible circuit and prints
//! the results table.
//!
//! Environment:
//! - `PUMPQ_BACKEND`, `PUMPQ_ALARM`, `PUMPQ_SHOTS`, `PUMPQ_SEED` select how
//!   scenarios are evaluated (see `pumpq::config`).
//! - `PUMPQ_LOG`, `PUMPQ_LOG_ANSI` control log output.
//!
//! The Normal Operation schematic is written to `pump_circuit_schematic.txt`
//! in the working directory. Failing to write it only logs a warning.

use pumpq::{
    HarnessConfig, LoggingConfig, PumpqError, SCENARIOS, ScenarioOutcome, build_pump_circuit, init_tracing,
    run_all_with,
};
use std::fs;
use tracing::{info, warn};

const SCHEMATIC_PATH: &str = "pump_circuit_schematic.txt";

fn print_outcome(outcome: &ScenarioOutcome) {
    println!("\n--- SCENARIO: {} ---", outcome.scenario.name);
    let s = outcome.scenario.readings.bits();
    println!(
        "[INPUTS]  S1:{} S2:{} S3:{} S4:{} S5:{} S6:{}",
        u8::from(s[0]),
        u8::from(s[1]),
        u8::from(s[2]),
        u8::from(s[3]),
        u8::from(s[4]),
        u8::from(s[5])
    );
    match (outcome.actuators(), outcome.system_state()) {
        (Some(actuators), Some(state)) => {
            println!("[OUTPUTS] {}", actuators);
            println!("System State: {}", state);
        }
        _ => println!("[OUTPUTS] unavailable: {}", outcome.error.as_deref().unwrap_or("unknown error")),
    }
}

fn write_schematic(config: &HarnessConfig) -> Result<(), PumpqError> {
    let circuit = build_pump_circuit(&SCENARIOS[0].readings, config.alarm);
    fs::write(SCHEMATIC_PATH, format!("{}\n", circuit))?;
    Ok(())
}

fn main() -> Result<(), PumpqError> {
    if let Err(err) = init_tracing(&LoggingConfig::from_env()) {
        eprintln!("logging disabled: {}", err);
    }

    let config = HarnessConfig::from_env()?;
    info!(backend = %config.backend, alarm = %config.alarm, "starting pump scenarios");

    println!("======================================================");
    println!("  Reversible Circuit Simulation for Industrial Pump   ");
    println!("======================================================");

    let report = run_all_with(&SCENARIOS, &config);
    for outcome in &report.rows {
        print_outcome(outcome);
    }

    println!();
    print!("{}", report);

    match write_schematic(&config) {
        Ok(()) => info!(path = SCHEMATIC_PATH, "wrote circuit schematic"),
        Err(err) => warn!(path = SCHEMATIC_PATH, error = %err, "could not write circuit schematic"),
    }

    Ok(())
}
