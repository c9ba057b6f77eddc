// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A point in time as reported by a [`NodeTimer`].
///
/// Only ordering and `Duration` arithmetic are needed, so anything from a
/// tick counter to `std::time::Instant` qualifies.
pub trait NodeInstant:
    Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> NodeInstant for T where
    T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for the delay/clock operations the node needs.
///
/// Every wait in the node (modem settle delays, the alert quiescence window,
/// the cycle period) goes through this trait, so tests drive time by hand.
pub trait NodeTimer {
    /// Monotonic instant type.
    type Instant: NodeInstant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Current instant.
    fn now(&self) -> Self::Instant;
}

/// Abstraction for a non-blocking byte-oriented serial link.
///
/// Used for the host link, the modem UART and the GPS UART alike.
pub trait SerialLink {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Ok(())` if the byte was accepted for transmission, or `Err(nb::Error::WouldBlock)`
    /// if the write buffer is full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer, ensuring all written bytes have been sent.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;
}

// --- Clock adapters ---

/// Monotonic tick count, in microseconds since the clock was created.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Ticks(pub u64);

impl Add<Duration> for Ticks {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        Ticks(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl Sub<Ticks> for Ticks {
    type Output = Duration;
    fn sub(self, rhs: Ticks) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

/// [`NodeTimer`] over any embedded-hal delay provider.
///
/// Boards without a free-running timer still get a usable clock: time is the
/// sum of all delays issued through this wrapper. That is exact for the node's
/// cooperative loop, where nothing else consumes time worth measuring.
#[cfg(feature = "embedded-hal")]
#[derive(Debug)]
pub struct DelayClock<D> {
    delay: D,
    elapsed_us: u64,
}

#[cfg(feature = "embedded-hal")]
impl<D: embedded_hal::delay::DelayNs> DelayClock<D> {
    pub fn new(delay: D) -> Self {
        DelayClock {
            delay,
            elapsed_us: 0,
        }
    }

    pub fn into_inner(self) -> D {
        self.delay
    }
}

#[cfg(feature = "embedded-hal")]
impl<D: embedded_hal::delay::DelayNs> NodeTimer for DelayClock<D> {
    type Instant = Ticks;

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
        self.elapsed_us = self.elapsed_us.saturating_add(us as u64);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
        self.elapsed_us = self.elapsed_us.saturating_add(ms as u64 * 1000);
    }

    fn now(&self) -> Ticks {
        Ticks(self.elapsed_us)
    }
}

/// Wall-clock [`NodeTimer`] for host builds.
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock;

#[cfg(feature = "std")]
impl NodeTimer for StdClock {
    type Instant = std::time::Instant;

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }
}
