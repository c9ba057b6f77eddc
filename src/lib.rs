// src/lib.rs

#![cfg_attr(not(any(test, feature = "std")), no_std)] // std only for tests and host adapters

pub mod common;
pub mod gps;
pub mod modem;
pub mod node;
pub mod notify;
pub mod protocol;
pub mod sensor;

// Re-export key types for convenience
pub use common::{NodeConfig, NodeError, NodeTimer, SerialLink};
pub use modem::{ModemSequencer, ModemState};
pub use node::{CycleController, DisplayPort, SensorPort};
