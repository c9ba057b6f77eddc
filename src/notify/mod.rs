// src/notify/mod.rs

//! Turns an alert batch into SMS text.

use crate::common::threshold::rule_for;
use crate::common::types::{MAX_ALERT_LINES, MAX_SMS_LEN};
use crate::protocol::alert::{AlertBatch, AlertLine};
use core::fmt::Write;
use heapless::{String, Vec};
use log::warn;

/// First line of every notification.
pub const HEADER: &str = "ALERTS:";

/// Capacity of one rendered line; fits any `f32` at 2 decimals plus its phrase.
pub const SEGMENT_LEN: usize = 96;

pub type SmsText = String<MAX_SMS_LEN>;
type Segment = String<SEGMENT_LEN>;

/// Renders one alert line.
///
/// Lines with a known category and value are re-classified against the same
/// thresholds the node uses (`"Turbidity is too low (3.00 NTU)"`); anything
/// else is returned exactly as received.
pub fn render_line(line: &AlertLine) -> Segment {
    let mut segment = Segment::new();
    let rendered = match line.measurement() {
        Some((category, value)) => match rule_for(category) {
            Some(rule) => write!(
                segment,
                "{} {} ({:.2}{})",
                category,
                rule.severity(value).phrase(),
                value,
                rule.unit
            ),
            None => segment.push_str(line.as_str()).map_err(|_| core::fmt::Error),
        },
        None => segment.push_str(line.as_str()).map_err(|_| core::fmt::Error),
    };
    if rendered.is_err() {
        // Can only happen for a pathological value; fall back to the host's text
        segment.clear();
        let _ = segment.push_str(line.as_str());
    }
    segment
}

/// Formats a batch as `"ALERTS:"` followed by one line per entry, in batch order.
///
/// Lines that would push the text past `MAX_SMS_LEN` are left out whole.
pub fn format(batch: &AlertBatch) -> SmsText {
    let mut segments: Vec<Segment, { MAX_ALERT_LINES + 1 }> = Vec::new();
    let mut header = Segment::new();
    let _ = header.push_str(HEADER);
    let _ = segments.push(header);

    for line in batch {
        let _ = segments.push(render_line(line));
    }

    join_lines(&segments)
}

fn join_lines(segments: &[Segment]) -> SmsText {
    let mut text = SmsText::new();
    let mut omitted = 0;

    for segment in segments {
        let separator = if text.is_empty() { 0 } else { 1 };
        if text.len() + separator + segment.len() > MAX_SMS_LEN {
            omitted += 1;
            continue;
        }
        if separator == 1 {
            let _ = text.push('\n');
        }
        let _ = text.push_str(segment);
    }

    if omitted > 0 {
        warn!("{} alert line(s) left out of the SMS to fit {} bytes", omitted, MAX_SMS_LEN);
    }
    text
}
