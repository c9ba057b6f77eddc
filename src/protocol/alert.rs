// src/protocol/alert.rs

//! Host-to-node alert lines and the per-cycle batch decoder.
//!
//! The host writes zero or more `"<Category>:<value>"` lines per cycle. Nothing
//! here can fail on content: anything that does not parse is carried through
//! verbatim so the SMS still shows what the host sent.

use crate::common::error::NodeError;
use crate::common::hal_traits::{NodeTimer, SerialLink};
use crate::common::timing;
use crate::common::types::{Category, MAX_ALERT_LINES, MAX_LINE_LEN};
use core::str;
use core::time::Duration;
use heapless::{String, Vec};
use log::{debug, warn};

/// One alert line as received from the host.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertLine {
    pub category: Category,
    /// Parsed value; `None` when the prefix is unknown or the value is not a finite number.
    pub raw_value: Option<f32>,
    /// The trimmed line exactly as received (truncated to `MAX_LINE_LEN`).
    pub raw_text: String<MAX_LINE_LEN>,
}

impl AlertLine {
    /// Classifies a line by its category prefix and parses the value after it.
    pub fn parse(line: &str) -> Self {
        let text = line.trim();
        let raw_text = truncated(text);

        for category in Category::MEASURED {
            let Some(prefix) = category.prefix() else {
                continue;
            };
            if let Some(rest) = text.strip_prefix(prefix) {
                let raw_value = rest.trim().parse::<f32>().ok().filter(|v| v.is_finite());
                return AlertLine {
                    category,
                    raw_value,
                    raw_text,
                };
            }
        }

        AlertLine {
            category: Category::Other,
            raw_value: None,
            raw_text,
        }
    }

    /// Known category with a usable value; everything else is rendered verbatim.
    pub fn measurement(&self) -> Option<(Category, f32)> {
        match (self.category, self.raw_value) {
            (Category::Other, _) | (_, None) => None,
            (category, Some(value)) => Some((category, value)),
        }
    }

    pub fn as_str(&self) -> &str {
        self.raw_text.as_str()
    }
}

fn truncated(text: &str) -> String<MAX_LINE_LEN> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Ordered alert lines collected in one cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertBatch {
    lines: Vec<AlertLine, MAX_ALERT_LINES>,
    dropped: usize,
}

impl AlertBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line; once full, further lines are counted and dropped.
    pub fn push(&mut self, line: AlertLine) {
        if let Err(line) = self.lines.push(line) {
            warn!("alert batch full, dropping line: {}", line.as_str());
            self.dropped += 1;
        }
    }

    pub fn lines(&self) -> &[AlertLine] {
        &self.lines
    }

    pub fn iter(&self) -> core::slice::Iter<'_, AlertLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines lost to the batch capacity.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl<'a> IntoIterator for &'a AlertBatch {
    type Item = &'a AlertLine;
    type IntoIter = core::slice::Iter<'a, AlertLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Builds an [`AlertBatch`] from a raw byte stream.
#[derive(Debug, Default)]
pub struct AlertBatchDecoder {
    line: Vec<u8, MAX_LINE_LEN>,
    overlong: bool,
    batch: AlertBatch,
}

impl AlertBatchDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one byte. CR and LF both terminate a line; empty lines vanish.
    pub fn push_byte(&mut self, byte: u8) {
        match byte {
            b'\r' | b'\n' => self.end_line(),
            _ => {
                // Keep the line valid ASCII whatever the wire carries
                let byte = if byte.is_ascii() { byte } else { b'?' };
                if self.line.push(byte).is_err() {
                    self.overlong = true;
                }
            }
        }
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.push_byte(*byte);
        }
    }

    fn end_line(&mut self) {
        if self.overlong {
            warn!("alert line longer than {} bytes truncated", MAX_LINE_LEN);
            self.overlong = false;
        }
        // Only ASCII bytes are ever buffered
        let text = str::from_utf8(&self.line).unwrap_or("");
        if !text.trim().is_empty() {
            let line = AlertLine::parse(text);
            debug!("alert line: {:?} {:?}", line.category, line.raw_value);
            self.batch.push(line);
        }
        self.line.clear();
    }

    /// Flushes any unterminated line and hands back the batch, leaving the decoder empty.
    pub fn finish(&mut self) -> AlertBatch {
        self.end_line();
        core::mem::take(&mut self.batch)
    }

    /// Reads inbound bytes until the host has been quiet for `quiescence`,
    /// or `limit` has passed since the call, whichever comes first.
    ///
    /// A quiet host means its last line is complete, so a trailing partial line
    /// is flushed into the batch. Hitting `limit` mid-line keeps that line
    /// buffered; the next drain completes it.
    pub fn drain<IF>(
        &mut self,
        iface: &mut IF,
        quiescence: Duration,
        limit: Duration,
    ) -> Result<AlertBatch, NodeError<IF::Error>>
    where
        IF: SerialLink + NodeTimer,
    {
        let start = iface.now();
        let hard_deadline = start + limit;
        let mut quiet_deadline = start + quiescence;

        loop {
            match iface.read_byte() {
                Ok(byte) => {
                    self.push_byte(byte);
                    quiet_deadline = iface.now() + quiescence;
                }
                Err(nb::Error::WouldBlock) => {
                    let now = iface.now();
                    if now >= quiet_deadline {
                        break;
                    }
                    iface.delay_us(timing::IDLE_POLL_INTERVAL_US);
                }
                Err(nb::Error::Other(e)) => return Err(NodeError::Io(e)),
            }
            if iface.now() >= hard_deadline {
                debug!("alert drain hit its {:?} limit", limit);
                return Ok(core::mem::take(&mut self.batch));
            }
        }

        Ok(self.finish())
    }
}
