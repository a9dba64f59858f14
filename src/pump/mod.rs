// src/pump/mod.rs

//! Domain model of the monitored pump: its six sensors, six actuators and the
//! overall state shown to operators.
//!
//! The circuit only computes the relay (A1) and alarm (A5) bits. Every other
//! actuator is a fixed function of those two.

use std::fmt;

/// Readings of the six binary pump sensors, S1..S6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SensorReadings {
    /// S1: motor current present.
    pub current: bool,
    /// S2: pressure within range.
    pub pressure: bool,
    /// S3: water level sufficient.
    pub level: bool,
    /// S4: flow detected.
    pub flow: bool,
    /// S5: motor over-temperature.
    pub temperature: bool,
    /// S6: abnormal vibration.
    pub vibration: bool,
}

impl SensorReadings {
    /// Builds readings from `[S1, S2, S3, S4, S5, S6]`.
    pub const fn from_bits(bits: [bool; 6]) -> Self {
        let [current, pressure, level, flow, temperature, vibration] = bits;
        Self { current, pressure, level, flow, temperature, vibration }
    }

    /// Returns `[S1, S2, S3, S4, S5, S6]`.
    pub fn bits(&self) -> [bool; 6] {
        [self.current, self.pressure, self.level, self.flow, self.temperature, self.vibration]
    }

    /// Readings for the 6-bit index `k`, where bit `i` of `k` is sensor `S(i+1)`.
    pub fn from_index(k: usize) -> Self {
        let mut bits = [false; 6];
        for (i, b) in bits.iter_mut().enumerate() {
            *b = (k >> i) & 1 == 1;
        }
        Self::from_bits(bits)
    }

    /// All 64 possible sensor combinations.
    pub fn all() -> impl Iterator<Item = SensorReadings> {
        (0..64).map(Self::from_index)
    }
}

impl fmt::Display for SensorReadings {
    /// Prints `S1 .. S6` as space-separated 0/1 digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.bits();
        for (i, b) in bits.iter().enumerate() {
            write!(f, "{}{}", if i > 0 { " " } else { "" }, u8::from(*b))?;
        }
        Ok(())
    }
}

/// Plain boolean reference for the two circuit outputs, `(A1, A5)`.
///
/// - `A1 = S1 ∧ S2 ∧ S3 ∧ S4 ∧ ¬S5 ∧ ¬S6`
/// - `A5 = ¬S2 ∨ ¬S3 ∨ ¬S4 ∨ S5 ∨ S6`
pub fn reference_outputs(s: &SensorReadings) -> (bool, bool) {
    let relay = s.current && s.pressure && s.level && s.flow && !s.temperature && !s.vibration;
    let alarm = !s.pressure || !s.level || !s.flow || s.temperature || s.vibration;
    (relay, alarm)
}

/// States of the six pump actuators, A1..A6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActuatorStates {
    /// A1: main relay.
    pub relay: bool,
    /// A2: motor, follows the relay.
    pub motor: bool,
    /// A3: valve, follows the relay.
    pub valve: bool,
    /// A4: indicator LED, lit while running or alarmed.
    pub indicator_led: bool,
    /// A5: alarm buzzer.
    pub alarm_buzzer: bool,
    /// A6: digital display, always on.
    pub digital_display: bool,
}

impl ActuatorStates {
    /// Derives every actuator from the decoded relay (A1) and alarm (A5) bits.
    pub fn from_outputs(relay: bool, alarm: bool) -> Self {
        Self {
            relay,
            motor: relay,
            valve: relay,
            indicator_led: relay || alarm,
            alarm_buzzer: alarm,
            digital_display: true,
        }
    }

    /// Returns `[A1, A2, A3, A4, A5, A6]`.
    pub fn bits(&self) -> [bool; 6] {
        [self.relay, self.motor, self.valve, self.indicator_led, self.alarm_buzzer, self.digital_display]
    }

    /// Overall state derived from the relay and alarm.
    pub fn system_state(&self) -> SystemState {
        if self.relay {
            SystemState::NormalOperation
        } else if self.alarm_buzzer {
            SystemState::FaultDetected
        } else {
            SystemState::StandbyOff
        }
    }
}

impl fmt::Display for ActuatorStates {
    /// Prints `A1:x A2:x ... A6:x`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.bits().iter().enumerate() {
            write!(f, "{}A{}:{}", if i > 0 { " " } else { "" }, i + 1, u8::from(*b))?;
        }
        Ok(())
    }
}

/// Operator-facing summary of the pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemState {
    /// Relay energized, pump running.
    NormalOperation,
    /// Relay open and alarm raised.
    FaultDetected,
    /// Relay open, no alarm.
    StandbyOff,
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemState::NormalOperation => write!(f, "NORMAL OPERATION"),
            SystemState::FaultDetected => write!(f, "FAULT DETECTED"),
            SystemState::StandbyOff => write!(f, "STANDBY/OFF"),
        }
    }
}
