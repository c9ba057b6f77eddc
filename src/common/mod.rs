// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod config;
pub mod error;
pub mod hal_traits;
pub mod io_helpers;
pub mod threshold;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From config.rs
pub use config::{ConfirmPolicy, ModemTiming, NodeConfig, SMS_RECIPIENT};

// From error.rs
pub use error::NodeError;

// From hal_traits.rs
pub use hal_traits::{NodeInstant, NodeTimer, SerialLink, Ticks};

#[cfg(feature = "embedded-hal")]
pub use hal_traits::DelayClock;
#[cfg(feature = "std")]
pub use hal_traits::StdClock;

// From threshold.rs
pub use threshold::{alerts, classify, rule_for, severity_for, ThresholdRule};

// From types.rs (capacity constants stay under common::types::*)
pub use types::{Category, ClassifiedValue, GeoFix, SensorReading, Severity};
