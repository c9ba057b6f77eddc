// src/node/ports.rs

//! Hardware the cycle controller borrows but does not implement.

use crate::common::types::SensorReading;

/// The node's water-quality probes.
///
/// Each read is called once per cycle and should return promptly; an adapter
/// that needs conversion time starts it in the previous cycle.
pub trait SensorPort {
    /// Water temperature in °C. A disconnected DS18B20 reads `-127`.
    fn read_temperature(&mut self) -> f32;

    /// Raw turbidity probe voltage.
    fn read_turbidity_voltage(&mut self) -> f32;

    fn read_ph(&mut self) -> f32;

    /// Temperature probes found on the bus, reported once at start-up.
    fn temperature_probe_count(&mut self) -> u8 {
        1
    }

    /// Samples all three probes into one reading.
    fn read(&mut self) -> SensorReading {
        let temperature_c = self.read_temperature();
        let turbidity_voltage = self.read_turbidity_voltage();
        let ph = self.read_ph();
        SensorReading::new(temperature_c, turbidity_voltage, ph)
    }
}

/// A two-line character display.
pub trait DisplayPort {
    fn show(&mut self, line0: &str, line1: &str);
}
