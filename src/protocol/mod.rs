// src/protocol/mod.rs

//! Line protocol between the node and its host process.
//!
//! Node → host: one telemetry line per cycle plus an `SMS_SENT` marker after
//! each successful send. Host → node: zero or more alert lines per cycle.
//! Lines end in CR LF on the way out; either terminator is accepted inbound.

pub mod alert;
pub mod host;
pub mod telemetry;

pub use alert::{AlertBatch, AlertBatchDecoder, AlertLine};
pub use host::HostLine;
pub use telemetry::{encode, encode_sms_marker, MarkerLine, TelemetryLine};
