// src/gps/mod.rs

//! Latest-known-good GPS position.

pub mod nmea;

pub use nmea::NmeaDecoder;

use crate::common::hal_traits::SerialLink;
use crate::common::types::GeoFix;
use log::{debug, info, warn};

/// Turns a raw GPS byte stream into positions.
///
/// Implementations absorb malformed input silently and only return a
/// position once a complete sentence/frame has been decoded.
pub trait PositionDecoder {
    /// Consumes one byte; returns `(latitude, longitude)` when it completes a fix.
    fn feed(&mut self, byte: u8) -> Option<(f64, f64)>;
}

/// Holds the most recent plausible fix.
///
/// Once a fix is valid it stays valid for the session; bad input can only
/// fail to update it.
#[derive(Debug, Default)]
pub struct GpsTracker<D = NmeaDecoder> {
    decoder: D,
    fix: GeoFix,
}

impl GpsTracker<NmeaDecoder> {
    pub fn new() -> Self {
        Self::with_decoder(NmeaDecoder::new())
    }
}

impl<D: PositionDecoder> GpsTracker<D> {
    pub fn with_decoder(decoder: D) -> Self {
        GpsTracker {
            decoder,
            fix: GeoFix::NONE,
        }
    }

    pub fn feed(&mut self, byte: u8) {
        let Some((latitude, longitude)) = self.decoder.feed(byte) else {
            return;
        };
        if !GeoFix::is_plausible(latitude, longitude) {
            debug!("discarding implausible position {}, {}", latitude, longitude);
            return;
        }
        if !self.fix.valid {
            info!("GPS fix acquired: {:.6}, {:.6}", latitude, longitude);
        }
        self.fix = GeoFix::new(latitude, longitude);
    }

    pub fn current_fix(&self) -> GeoFix {
        self.fix
    }

    /// Feeds everything the GPS link has buffered without waiting.
    ///
    /// Link errors are logged and end the pump; the fix is left untouched.
    pub fn pump<L: SerialLink>(&mut self, link: &mut L) -> usize {
        let mut fed = 0;
        loop {
            match link.read_byte() {
                Ok(byte) => {
                    self.feed(byte);
                    fed += 1;
                }
                Err(nb::Error::WouldBlock) => return fed,
                Err(nb::Error::Other(e)) => {
                    warn!("GPS link error: {:?}", e);
                    return fed;
                }
            }
        }
    }
}
