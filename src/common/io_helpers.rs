// src/common/io_helpers.rs

//! Blocking helpers layered on the non-blocking [`SerialLink`] primitives.

use super::error::NodeError;
use super::hal_traits::{NodeTimer, SerialLink};
use super::timing;
use core::time::Duration;
use nb::Result as NbResult;

/// Executes a non-blocking I/O operation (`f`) repeatedly until it
/// stops returning `WouldBlock`, returning the final result or a timeout error.
pub fn execute_blocking_io_with_timeout<IF, FN, T>(
    iface: &mut IF,
    timeout: Duration,
    mut f: FN,
) -> Result<T, NodeError<IF::Error>>
where
    IF: SerialLink + NodeTimer,
    FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
{
    let deadline = iface.now() + timeout;

    loop {
        match f(iface) {
            Ok(result) => return Ok(result),
            Err(nb::Error::WouldBlock) => {
                if iface.now() >= deadline {
                    return Err(NodeError::Timeout);
                }
                iface.delay_us(timing::IDLE_POLL_INTERVAL_US);
            }
            Err(nb::Error::Other(e)) => return Err(NodeError::Io(e)),
        }
    }
}

/// Writes every byte of `bytes`, then flushes.
pub fn write_all<IF>(iface: &mut IF, bytes: &[u8]) -> Result<(), NodeError<IF::Error>>
where
    IF: SerialLink + NodeTimer,
{
    let write_timeout =
        timing::BYTE_WRITE_ALLOWANCE * bytes.len() as u32 + timing::WRITE_TIMEOUT_SLACK;
    let deadline = iface.now() + write_timeout;

    for byte in bytes {
        let remaining = deadline - iface.now();
        execute_blocking_io_with_timeout(iface, remaining, |link| link.write_byte(*byte))?;
    }

    execute_blocking_io_with_timeout(iface, timing::FLUSH_TIMEOUT, |link| link.flush())
}

/// Writes `line` followed by CR LF.
pub fn write_line<IF>(iface: &mut IF, line: &str) -> Result<(), NodeError<IF::Error>>
where
    IF: SerialLink + NodeTimer,
{
    write_all(iface, line.as_bytes())?;
    write_all(iface, b"\r\n")
}

/// Moves every byte the link has ready into `buffer` without waiting.
///
/// Bytes that do not fit are read and discarded so stale modem chatter never
/// lingers into the next exchange. Returns the number of bytes read.
pub fn drain_available<L, const N: usize>(
    link: &mut L,
    buffer: &mut heapless::Vec<u8, N>,
) -> Result<usize, NodeError<L::Error>>
where
    L: SerialLink,
{
    let mut count = 0;
    loop {
        match link.read_byte() {
            Ok(byte) => {
                count += 1;
                // Overflow drops the byte
                let _ = buffer.push(byte);
            }
            Err(nb::Error::WouldBlock) => return Ok(count),
            Err(nb::Error::Other(e)) => return Err(NodeError::Io(e)),
        }
    }
}
