// src/protocol/host.rs

//! Host-side view of the node's outbound lines.
//!
//! The host bridge accepts three shapes: the 5-field telemetry line, the
//! legacy 3-field line from nodes without GPS, and the `SMS_SENT` marker.
//! Parsing them here keeps both ends of the serial link in one place.

use super::telemetry::{FIELD_SEPARATOR, SMS_SENT_PREFIX};
use crate::common::types::SensorReading;

/// One line received from the node, as the host interprets it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostLine<'a> {
    /// `t,turbidity,ph,lat,lon`; `position` is `None` for the `NaN,NaN` form.
    Telemetry {
        reading: SensorReading,
        position: Option<(f64, f64)>,
    },
    /// `t,turbidity,ph` from nodes without a GPS receiver.
    LegacyTelemetry { reading: SensorReading },
    /// `SMS_SENT:<recipient>:<message>`.
    SmsSent { recipient: &'a str, message: &'a str },
    /// Anything else (boot banners, garbage, non-numeric fields).
    Unrecognized(&'a str),
}

impl<'a> HostLine<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix(SMS_SENT_PREFIX) {
            let (recipient, message) = rest.split_once(':').unwrap_or((rest, ""));
            return HostLine::SmsSent { recipient, message };
        }

        let mut fields: [&str; 5] = [""; 5];
        let mut count = 0;
        for field in trimmed.split(FIELD_SEPARATOR) {
            if count == fields.len() {
                return HostLine::Unrecognized(trimmed);
            }
            fields[count] = field.trim();
            count += 1;
        }

        let reading = match parse_reading(&fields[..3]) {
            Some(reading) if count == 3 || count == 5 => reading,
            _ => return HostLine::Unrecognized(trimmed),
        };

        if count == 3 {
            return HostLine::LegacyTelemetry { reading };
        }

        match (fields[3].parse::<f64>(), fields[4].parse::<f64>()) {
            (Ok(lat), Ok(lon)) if lat.is_nan() && lon.is_nan() => HostLine::Telemetry {
                reading,
                position: None,
            },
            (Ok(lat), Ok(lon)) if lat.is_finite() && lon.is_finite() => HostLine::Telemetry {
                reading,
                position: Some((lat, lon)),
            },
            _ => HostLine::Unrecognized(trimmed),
        }
    }
}

fn parse_reading(fields: &[&str]) -> Option<SensorReading> {
    let mut values = [0.0f32; 3];
    for (slot, field) in values.iter_mut().zip(fields) {
        *slot = field.parse::<f32>().ok().filter(|v| v.is_finite())?;
    }
    Some(SensorReading::new(values[0], values[1], values[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::GeoFix;
    use crate::protocol::telemetry::{encode, encode_sms_marker};

    #[test]
    fn test_parse_encoded_telemetry() {
        let line = encode(&SensorReading::new(25.0, 3.2, 7.0), &GeoFix::new(-1.5, 36.25));
        assert_eq!(
            HostLine::parse(&line),
            HostLine::Telemetry {
                reading: SensorReading::new(25.0, 3.2, 7.0),
                position: Some((-1.5, 36.25)),
            }
        );
    }

    #[test]
    fn test_parse_no_fix_telemetry() {
        match HostLine::parse("25.00,3.20,7.00,NaN,NaN\r\n") {
            HostLine::Telemetry { position, .. } => assert_eq!(position, None),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_legacy_telemetry() {
        assert_eq!(
            HostLine::parse("24.50,1.10,6.90"),
            HostLine::LegacyTelemetry {
                reading: SensorReading::new(24.5, 1.1, 6.9)
            }
        );
    }

    #[test]
    fn test_parse_sms_marker() {
        let marker = encode_sms_marker("+255700000001", "ALERTS:\npH is too high (9.00)");
        assert_eq!(
            HostLine::parse(&marker),
            HostLine::SmsSent {
                recipient: "+255700000001",
                message: "ALERTS: | pH is too high (9.00)",
            }
        );
    }

    #[test]
    fn test_parse_unrecognized() {
        assert!(matches!(HostLine::parse("SchistoGuard Starting..."), HostLine::Unrecognized(_)));
        assert!(matches!(HostLine::parse("1,2"), HostLine::Unrecognized(_)));
        assert!(matches!(HostLine::parse("1,2,3,4"), HostLine::Unrecognized(_)));
        assert!(matches!(HostLine::parse("1,2,3,4,5,6"), HostLine::Unrecognized(_)));
        assert!(matches!(HostLine::parse("a,2,3"), HostLine::Unrecognized(_)));
        // Only one coordinate missing is not the no-fix form
        assert!(matches!(HostLine::parse("1,2,3,NaN,5"), HostLine::Unrecognized(_)));
    }
}
