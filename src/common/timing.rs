// src/common/timing.rs

use core::time::Duration;

// Nominal values. The modem delays are the settle times the SIM800-class modem
// on the node needs; none of them is confirmed by the modem itself unless
// `ConfirmPolicy::Strict` is selected.

// === Cycle Timing ===

/// Period of one sample/telemetry/alert cycle.
pub const CYCLE_PERIOD: Duration = Duration::from_millis(2000);
/// Inbound alert drain ends once the host has been silent this long.
pub const ALERT_QUIESCENCE: Duration = Duration::from_millis(100);
/// Upper bound on one alert drain, regardless of how chatty the host is.
pub const ALERT_DRAIN_LIMIT: Duration = Duration::from_millis(1000);
/// Sleep between polls of an idle link.
pub const IDLE_POLL_INTERVAL_US: u32 = 100;
/// GPS pump interval while waiting for the next cycle.
pub const GPS_IDLE_POLL_MS: u32 = 10;

// === Modem Settle Delays ===

/// Wait after the `AT` liveness probe.
pub const MODEM_PROBE_SETTLE: Duration = Duration::from_millis(1000);
/// Wait after selecting text-mode SMS (`AT+CMGF=1`).
pub const MODEM_TEXT_MODE_SETTLE: Duration = Duration::from_millis(1000);
/// Wait after `AT+CMGS` for the modem to open its `>` body prompt.
pub const MODEM_PROMPT_SETTLE: Duration = Duration::from_millis(1000);
/// Wait after the body bytes before terminating the message.
pub const MODEM_BODY_SETTLE: Duration = Duration::from_millis(100);
/// Wait after Ctrl-Z for the network to accept the message.
pub const MODEM_CONFIRM_WAIT: Duration = Duration::from_millis(3000);

// === Serial Byte Timing ===

/// Per-byte write allowance; one 10-bit frame at 9600 baud is ~1.04 ms.
pub const BYTE_WRITE_ALLOWANCE: Duration = Duration::from_micros(1100);
/// Fixed slack added to every write timeout.
pub const WRITE_TIMEOUT_SLACK: Duration = Duration::from_millis(20);
/// Timeout for flushing the transmit buffer.
pub const FLUSH_TIMEOUT: Duration = Duration::from_millis(50);
