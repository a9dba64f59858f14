//! Register layout of the pump relay/alarm circuit.

/// Bit positions used by the pump circuit.
pub mod pump_layout {
    use crate::core::BitId;

    /// Total number of bits in the pump register.
    pub const REGISTER_WIDTH: usize = 14;

    /// S1..S6 raw sensor inputs, in order.
    pub const SENSOR_BITS: [BitId; 6] = [BitId(0), BitId(1), BitId(2), BitId(3), BitId(4), BitId(5)];
    /// S1: motor current present.
    pub const S1_CURRENT: BitId = BitId(0);
    /// S2: pressure within range.
    pub const S2_PRESSURE: BitId = BitId(1);
    /// S3: water level sufficient.
    pub const S3_LEVEL: BitId = BitId(2);
    /// S4: flow detected.
    pub const S4_FLOW: BitId = BitId(3);
    /// S5: over-temperature.
    pub const S5_TEMPERATURE: BitId = BitId(4);
    /// S6: abnormal vibration.
    pub const S6_VIBRATION: BitId = BitId(5);

    /// NOT S5 ("temperature is safe").
    pub const S5_SAFE: BitId = BitId(6);
    /// NOT S6 ("vibration is safe").
    pub const S6_SAFE: BitId = BitId(7);

    /// Scratch bits holding the partial ANDs of the relay cascade.
    pub const RELAY_ANCILLAS: [BitId; 4] = [BitId(8), BitId(9), BitId(10), BitId(11)];

    /// A1: relay output.
    pub const A1_RELAY: BitId = BitId(12);
    /// A5: alarm output.
    pub const A5_ALARM: BitId = BitId(13);
}
