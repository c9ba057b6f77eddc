// src/sensor/mod.rs

//! Raw-to-physical conversions for the node's analog probes.
//!
//! The probes themselves sit behind [`crate::node::SensorPort`]; these helpers
//! are what a `SensorPort` implementation typically runs its ADC counts through.

/// Reading a DS18B20 reports when the probe is unplugged.
pub const DISCONNECTED_TEMP_C: f32 = -127.0;

/// Probe voltage at pH 7.
pub const PH_NEUTRAL_VOLTAGE: f32 = 2.5;

/// Probe slope in volts per pH unit.
pub const PH_VOLTS_PER_UNIT: f32 = 0.18;

/// Reference voltage and full-scale count of an ADC.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AdcScale {
    pub vref: f32,
    pub max_count: u16,
}

impl AdcScale {
    /// 10-bit converter referenced to 5 V (ATmega328P).
    pub const AVR_10BIT_5V: AdcScale = AdcScale {
        vref: 5.0,
        max_count: 1023,
    };

    /// 12-bit converter referenced to 3.3 V.
    pub const ADC_12BIT_3V3: AdcScale = AdcScale {
        vref: 3.3,
        max_count: 4095,
    };

    pub fn to_voltage(&self, raw: u16) -> f32 {
        adc_to_voltage(raw, self.vref, self.max_count)
    }
}

impl Default for AdcScale {
    fn default() -> Self {
        Self::AVR_10BIT_5V
    }
}

/// Converts an ADC count to volts. Counts above `max_count` clamp to `vref`.
pub fn adc_to_voltage(raw: u16, vref: f32, max_count: u16) -> f32 {
    if max_count == 0 {
        return 0.0;
    }
    raw.min(max_count) as f32 * (vref / max_count as f32)
}

/// pH from the probe's output voltage, linear around pH 7 at 2.5 V.
pub fn ph_from_voltage(voltage: f32) -> f32 {
    7.0 + (PH_NEUTRAL_VOLTAGE - voltage) / PH_VOLTS_PER_UNIT
}

/// True when `temperature_c` is the DS18B20 "no device" value.
pub fn is_probe_disconnected(temperature_c: f32) -> bool {
    (temperature_c - DISCONNECTED_TEMP_C).abs() < 0.5
}
