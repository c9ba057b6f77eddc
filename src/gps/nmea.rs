// src/gps/nmea.rs

//! Minimal NMEA 0183 position decoder (RMC and GGA sentences only).
//!
//! Best effort: anything unexpected drops the sentence being assembled and
//! waits for the next `$`.

use super::PositionDecoder;
use core::str;
use heapless::Vec;

/// Longest legal NMEA sentence, `$` and CR LF excluded.
pub const MAX_SENTENCE_LEN: usize = 82;

#[derive(Debug, Default)]
pub struct NmeaDecoder {
    sentence: Vec<u8, MAX_SENTENCE_LEN>,
    in_sentence: bool,
}

impl NmeaDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.sentence.clear();
        self.in_sentence = false;
    }
}

impl PositionDecoder for NmeaDecoder {
    fn feed(&mut self, byte: u8) -> Option<(f64, f64)> {
        match byte {
            b'$' => {
                self.sentence.clear();
                self.in_sentence = true;
                None
            }
            b'\r' | b'\n' => {
                let position = if self.in_sentence {
                    parse_sentence(&self.sentence)
                } else {
                    None
                };
                self.reset();
                position
            }
            _ if self.in_sentence => {
                if self.sentence.push(byte).is_err() {
                    self.reset();
                }
                None
            }
            _ => None,
        }
    }
}

/// XOR of every byte between `$` and `*`.
pub fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(0, |acc, b| acc ^ b)
}

fn parse_sentence(raw: &[u8]) -> Option<(f64, f64)> {
    let raw = str::from_utf8(raw).ok()?;
    let body = match raw.split_once('*') {
        Some((body, sum)) => {
            let expected = u8::from_str_radix(sum.get(..2)?, 16).ok()?;
            if checksum(body.as_bytes()) != expected {
                return None;
            }
            body
        }
        None => raw,
    };

    let mut fields = body.split(',');
    let id = fields.next()?;
    if id.len() != 5 {
        return None;
    }

    // Skip the two-letter talker id (GP, GN, GL...)
    match id.get(2..)? {
        "RMC" => {
            let _time = fields.next()?;
            if fields.next()? != "A" {
                return None;
            }
            parse_position(&mut fields)
        }
        "GGA" => {
            let _time = fields.next()?;
            let position = parse_position(&mut fields)?;
            let quality: u8 = fields.next()?.parse().ok()?;
            if quality == 0 {
                return None;
            }
            Some(position)
        }
        _ => None,
    }
}

/// Reads `lat,N|S,lon,E|W` from the field iterator.
fn parse_position<'a>(fields: &mut impl Iterator<Item = &'a str>) -> Option<(f64, f64)> {
    let lat = parse_coordinate(fields.next()?)?;
    let lat = match fields.next()? {
        "N" => lat,
        "S" => -lat,
        _ => return None,
    };
    let lon = parse_coordinate(fields.next()?)?;
    let lon = match fields.next()? {
        "E" => lon,
        "W" => -lon,
        _ => return None,
    };
    Some((lat, lon))
}

/// `dddmm.mmmm` to decimal degrees.
fn parse_coordinate(field: &str) -> Option<f64> {
    let value: f64 = field.parse().ok()?;
    if !(value.is_finite() && value >= 0.0) {
        return None;
    }
    let degrees = (value / 100.0) as u32 as f64;
    let minutes = value - degrees * 100.0;
    if minutes >= 60.0 {
        return None;
    }
    Some(degrees + minutes / 60.0)
}
