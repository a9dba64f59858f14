// src/circuits/pump.rs

//! The pump relay/alarm circuit.
//!
//! Register layout (see `core::pump_layout`):
//!
//! | bits  | role                                  |
//! |-------|---------------------------------------|
//! | 0..=5 | S1..S6 sensor inputs                  |
//! | 6, 7  | ¬S5, ¬S6                              |
//! | 8..=11| partial ANDs of the relay cascade     |
//! | 12    | A1 relay                              |
//! | 13    | A5 alarm                              |
//!
//! Bits past 13 only exist with [`AlarmLogic::DeMorgan`].

use super::{Circuit, CircuitBuilder};
use crate::core::BitId;
use crate::core::pump_layout::*;
use crate::pump::SensorReadings;
use crate::synthesis::{Expr, Synthesizer};
use std::fmt;
use std::str::FromStr;

/// How the alarm bit A5 is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlarmLogic {
    /// Flips A5 once per active condition (¬S2, ¬S3, ¬S4, S5, S6).
    ///
    /// The result is the parity of the five conditions, which equals their OR
    /// only while at most one condition holds at a time. That is the case for
    /// every row of the scenario table but not for arbitrary inputs: with S2
    /// and S3 both low the two flips cancel and no alarm is raised.
    #[default]
    ParityCascade,
    /// Computes a true five-input OR as `¬(S2 ∧ S3 ∧ S4 ∧ ¬S5 ∧ ¬S6)`,
    /// using extra ancillas past bit 13.
    DeMorgan,
}

impl fmt::Display for AlarmLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlarmLogic::ParityCascade => write!(f, "parity"),
            AlarmLogic::DeMorgan => write!(f, "demorgan"),
        }
    }
}

impl FromStr for AlarmLogic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parity" | "parity-cascade" | "xor" => Ok(AlarmLogic::ParityCascade),
            "demorgan" | "de-morgan" | "or" => Ok(AlarmLogic::DeMorgan),
            other => Err(format!("unknown alarm logic '{}', expected 'parity' or 'demorgan'", other)),
        }
    }
}

/// Operands of the relay AND, in cascade order: S1, S2, S3, S4, ¬S5, ¬S6.
pub const RELAY_OPERANDS: [BitId; 6] = [S1_CURRENT, S2_PRESSURE, S3_LEVEL, S4_FLOW, S5_SAFE, S6_SAFE];

/// Sensors whose *low* reading raises the alarm.
const ALARM_WHEN_LOW: [BitId; 3] = [S2_PRESSURE, S3_LEVEL, S4_FLOW];
/// Sensors whose *high* reading raises the alarm.
const ALARM_WHEN_HIGH: [BitId; 2] = [S5_TEMPERATURE, S6_VIBRATION];

/// Builds the pump circuit for one set of sensor readings with the parity alarm.
///
/// The gate sequence is the same for every input; only the encoded literals
/// of bits 0..=5 differ.
pub fn build_circuit(s1: bool, s2: bool, s3: bool, s4: bool, s5: bool, s6: bool) -> Circuit {
    build_pump_circuit(&SensorReadings::from_bits([s1, s2, s3, s4, s5, s6]), AlarmLogic::ParityCascade)
}

/// Builds the pump circuit for `readings` using the chosen alarm logic.
pub fn build_pump_circuit(readings: &SensorReadings, alarm: AlarmLogic) -> Circuit {
    build_with_relay_order(readings, alarm, &RELAY_OPERANDS)
}

/// Builds the pump circuit with the relay cascade combining its operands in
/// `relay_order`. Any permutation of [`RELAY_OPERANDS`] yields the same A1;
/// only the partial results left in the ancillas differ.
pub fn build_with_relay_order(readings: &SensorReadings, alarm: AlarmLogic, relay_order: &[BitId; 6]) -> Circuit {
    let mut builder = labelled_builder();

    // Step 1: encode |S1 .. S6>
    for (bit, value) in SENSOR_BITS.iter().zip(readings.bits()) {
        builder = builder.encode(*bit, value);
    }
    builder = builder.barrier();

    // Step 2: normalize S5, S6 into "safe" bits
    builder = builder
        .copy_inverted(S5_TEMPERATURE, S5_SAFE)
        .copy_inverted(S6_VIBRATION, S6_SAFE)
        .barrier();

    // Step 3: A1 = S1 ∧ S2 ∧ S3 ∧ S4 ∧ ¬S5 ∧ ¬S6
    builder = relay_cascade(builder, relay_order).barrier();

    // Step 4: A5
    builder = match alarm {
        AlarmLogic::ParityCascade => {
            for bit in ALARM_WHEN_LOW {
                builder = builder.flip_if_clear(bit, A5_ALARM);
            }
            for bit in ALARM_WHEN_HIGH {
                builder = builder.cx(bit, A5_ALARM);
            }
            builder
        }
        AlarmLogic::DeMorgan => {
            let mut synth = Synthesizer::new(REGISTER_WIDTH);
            synth.bind(Expr::not(Expr::var(S5_TEMPERATURE)), S5_SAFE);
            synth.bind(Expr::not(Expr::var(S6_VIBRATION)), S6_SAFE);
            synth.synthesize_into(&alarm_expr(), A5_ALARM, &mut builder);
            builder
        }
    };

    // Step 5: decode A1, A5
    builder
        .barrier()
        .measure(A1_RELAY)
        .measure(A5_ALARM)
        .build_unchecked()
}

/// The alarm condition as a formula: `¬S2 ∨ ¬S3 ∨ ¬S4 ∨ S5 ∨ S6`.
pub fn alarm_expr() -> Expr {
    Expr::or(
        ALARM_WHEN_LOW
            .iter()
            .map(|bit| Expr::not(Expr::var(*bit)))
            .chain(ALARM_WHEN_HIGH.iter().map(|bit| Expr::var(*bit))),
    )
}

/// The relay condition as a formula: `S1 ∧ S2 ∧ S3 ∧ S4 ∧ ¬S5 ∧ ¬S6`.
pub fn relay_expr() -> Expr {
    Expr::and([
        Expr::var(S1_CURRENT),
        Expr::var(S2_PRESSURE),
        Expr::var(S3_LEVEL),
        Expr::var(S4_FLOW),
        Expr::not(Expr::var(S5_TEMPERATURE)),
        Expr::not(Expr::var(S6_VIBRATION)),
    ])
}

fn relay_cascade(builder: CircuitBuilder, order: &[BitId; 6]) -> CircuitBuilder {
    // Six operands and four ancillas: four links into t1..t4, the fifth into A1.
    builder.and_chain(order, &RELAY_ANCILLAS, A1_RELAY)
}

fn labelled_builder() -> CircuitBuilder {
    let names = ["S1", "S2", "S3", "S4", "S5", "S6", "¬S5", "¬S6", "t1", "t2", "t3", "t4", "A1", "A5"];
    names
        .iter()
        .enumerate()
        .fold(CircuitBuilder::new(REGISTER_WIDTH), |b, (i, name)| b.label(BitId(i), *name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::Gate;
    use crate::validation::validate_circuit;

    fn qid(i: usize) -> BitId {
        BitId(i)
    }

    #[test]
    fn test_gate_sequence_is_exact() {
        let circuit = build_circuit(true, true, true, true, false, false);
        let expected = vec![
            Gate::cx(qid(4), qid(6)),
            Gate::x(qid(6)),
            Gate::cx(qid(5), qid(7)),
            Gate::x(qid(7)),
            Gate::ccx(qid(0), qid(1), qid(8)),
            Gate::ccx(qid(8), qid(2), qid(9)),
            Gate::ccx(qid(9), qid(3), qid(10)),
            Gate::ccx(qid(10), qid(6), qid(11)),
            Gate::ccx(qid(11), qid(7), qid(12)),
            Gate::x(qid(1)),
            Gate::cx(qid(1), qid(13)),
            Gate::x(qid(1)),
            Gate::x(qid(2)),
            Gate::cx(qid(2), qid(13)),
            Gate::x(qid(2)),
            Gate::x(qid(3)),
            Gate::cx(qid(3), qid(13)),
            Gate::x(qid(3)),
            Gate::cx(qid(4), qid(13)),
            Gate::cx(qid(5), qid(13)),
        ];
        assert_eq!(circuit.gates(), expected.as_slice());
        assert_eq!(circuit.width(), 14);
        assert_eq!(circuit.outputs(), &[qid(12), qid(13)]);
        assert_eq!(circuit.inputs(), (0..6).map(qid).collect::<Vec<_>>());
    }

    #[test]
    fn test_relay_stage_is_the_builder_and_cascade() -> Result<(), crate::core::PumpqError> {
        let cascade = CircuitBuilder::new(REGISTER_WIDTH)
            .and_cascade(&RELAY_OPERANDS, &RELAY_ANCILLAS, A1_RELAY)?
            .build()?;
        let circuit = build_circuit(true, false, true, true, false, true);
        assert_eq!(&circuit.gates()[4..9], cascade.gates());
        Ok(())
    }

    #[test]
    fn test_topology_is_independent_of_inputs() {
        let a = build_circuit(true, true, true, true, false, false);
        let b = build_circuit(false, true, false, true, true, false);
        assert_eq!(a.gates(), b.gates());
        assert_ne!(a.encoding(), b.encoding());
        assert_eq!(b.initial_basis_index(), Some(0b01_1010));
    }

    #[test]
    fn test_every_pump_circuit_is_valid() {
        for readings in SensorReadings::all() {
            for alarm in [AlarmLogic::ParityCascade, AlarmLogic::DeMorgan] {
                let circuit = build_pump_circuit(&readings, alarm);
                assert!(validate_circuit(&circuit).is_ok(), "invalid circuit for {} ({})", readings, alarm);
            }
        }
    }

    #[test]
    fn test_demorgan_reuses_normalized_bits() {
        let circuit = build_pump_circuit(&SensorReadings::default(), AlarmLogic::DeMorgan);
        let alarm_gates = &circuit.gates()[9..];
        assert!(alarm_gates.contains(&Gate::ccx(qid(15), qid(6), qid(16))));
        assert!(alarm_gates.contains(&Gate::ccx(qid(16), qid(7), qid(17))));
        assert_eq!(alarm_gates.last(), Some(&Gate::cx(qid(18), qid(13))));
        assert_eq!(circuit.width(), 19);
    }

    #[test]
    fn test_alarm_logic_parsing() {
        assert_eq!("parity".parse::<AlarmLogic>(), Ok(AlarmLogic::ParityCascade));
        assert_eq!(" DeMorgan ".parse::<AlarmLogic>(), Ok(AlarmLogic::DeMorgan));
        assert!("nand".parse::<AlarmLogic>().is_err());
        assert_eq!(AlarmLogic::default(), AlarmLogic::ParityCascade);
    }

    #[test]
    fn test_schematic_labels_bits() {
        let text = build_circuit(true, true, true, true, false, false).to_string();
        assert!(text.starts_with("pumpq::Circuit[20 gates on 14 bits]"));
        assert!(text.contains("q12 A1: "));
        assert!(text.contains("q6 ¬S5: "));
    }
}
