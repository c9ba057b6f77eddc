use crate::common::types::SensorReading;
use core::fmt::Write;
use heapless::String;
use log::warn;

/// Width of the node's 16x2 LCD.
pub const LCD_COLUMNS: usize = 16;

/// Capacity of a rendered line. Values wider than the panel are kept; the
/// panel clips them.
pub const DISPLAY_LINE_LEN: usize = 32;

/// Shown once at start-up.
pub const STARTUP_BANNER: &str = "System Ready";

pub type DisplayLine = String<DISPLAY_LINE_LEN>;

/// Renders `"T:<t>C pH:<p>"` and `"Tu:<v> NTU"`, padded to the panel width so a
/// shorter value overwrites a longer one.
pub fn render(reading: &SensorReading) -> (DisplayLine, DisplayLine) {
    let mut top = DisplayLine::new();
    let mut bottom = DisplayLine::new();
    let ok = write!(top, "T:{:.2}C pH:{:.2}", reading.temperature_c, reading.ph).is_ok()
        & write!(bottom, "Tu:{:.2} NTU", reading.turbidity_voltage).is_ok();
    if !ok {
        warn!("display line exceeded {} bytes", DISPLAY_LINE_LEN);
    }
    pad(&mut top);
    pad(&mut bottom);
    (top, bottom)
}

fn pad(line: &mut DisplayLine) {
    while line.len() < LCD_COLUMNS {
        let _ = line.push(' ');
    }
}
