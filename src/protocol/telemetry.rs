// src/protocol/telemetry.rs

use crate::common::types::{GeoFix, SensorReading, MAX_RECIPIENT_LEN, MAX_SMS_LEN};
use core::fmt::Write;
use heapless::String;
use log::warn;

/// Capacity of one telemetry line. Sized for five worst-case `f32`/`f64`
/// renderings, so encoding never truncates.
pub const TELEMETRY_LINE_LEN: usize = 160;

/// Capacity of an `SMS_SENT` marker line (message newlines expand to `" | "`).
pub const MARKER_LINE_LEN: usize = MAX_SMS_LEN + MAX_RECIPIENT_LEN + 64;

/// Prefix of the diagnostic line emitted after a successful send.
pub const SMS_SENT_PREFIX: &str = "SMS_SENT:";

/// Literal emitted for each coordinate when there is no GPS fix.
pub const NO_FIX: &str = "NaN";

/// Field separator of the telemetry line.
pub const FIELD_SEPARATOR: char = ',';

/// Number of fields in every telemetry line.
pub const TELEMETRY_FIELDS: usize = 5;

pub type TelemetryLine = String<TELEMETRY_LINE_LEN>;
pub type MarkerLine = String<MARKER_LINE_LEN>;

/// Encodes `"<t>,<turbidity>,<ph>,<lat>,<lon>"`.
///
/// Sensor fields carry 2 decimals, coordinates 6. Without a valid fix the
/// coordinates are the literal `NaN,NaN`, so the host can always split into
/// exactly five fields.
pub fn encode(reading: &SensorReading, fix: &GeoFix) -> TelemetryLine {
    let mut line = TelemetryLine::new();
    let written = if fix.valid {
        write!(
            line,
            "{:.2},{:.2},{:.2},{:.6},{:.6}",
            reading.temperature_c, reading.turbidity_voltage, reading.ph, fix.latitude, fix.longitude
        )
    } else {
        write!(
            line,
            "{:.2},{:.2},{:.2},{},{}",
            reading.temperature_c, reading.turbidity_voltage, reading.ph, NO_FIX, NO_FIX
        )
    };
    if written.is_err() {
        warn!("telemetry line exceeded {} bytes", TELEMETRY_LINE_LEN);
    }
    line
}

/// Encodes the `SMS_SENT:<recipient>:<message>` confirmation marker.
///
/// The SMS body is multi-line; each line break becomes `" | "` so the marker
/// stays a single host line.
pub fn encode_sms_marker(recipient: &str, message: &str) -> MarkerLine {
    let mut line = MarkerLine::new();
    let mut ok = line.push_str(SMS_SENT_PREFIX).is_ok()
        && line.push_str(recipient).is_ok()
        && line.push(':').is_ok();

    for (i, segment) in message.split('\n').enumerate() {
        if !ok {
            break;
        }
        if i > 0 {
            ok = line.push_str(" | ").is_ok();
        }
        ok = ok && line.push_str(segment.trim_end_matches('\r')).is_ok();
    }

    if !ok {
        warn!("SMS_SENT marker truncated at {} bytes", MARKER_LINE_LEN);
    }
    line
}
