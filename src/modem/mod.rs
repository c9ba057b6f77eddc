// src/modem/mod.rs

pub mod command;
pub mod state;

pub use command::{ModemCommand, CTRL_Z};
pub use state::{EntryAction, ModemState};

use crate::common::{
    config::{ConfirmPolicy, ModemTiming, NodeConfig},
    error::NodeError,
    hal_traits::{NodeTimer, SerialLink},
    io_helpers::{drain_available, write_all},
    types::{MAX_RECIPIENT_LEN, MAX_SMS_LEN},
};
use core::time::Duration;
use heapless::{String, Vec};
use log::{debug, error, info, warn};

/// Modem answer bytes kept per state.
pub const RESPONSE_LEN: usize = 128;

/// What the modem said after the message was terminated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// `+CMGS: <mr>` or `OK`.
    Confirmed,
    /// `ERROR` / `+CMS ERROR`.
    Rejected,
    /// Bytes came back but none of the above.
    Unverified,
    /// Nothing came back before the confirm delay ran out.
    NoResponse,
}

impl Confirmation {
    fn from_response(response: &[u8]) -> Self {
        if contains(response, b"+CMGS") || contains(response, b"OK") {
            Confirmation::Confirmed
        } else if contains(response, b"ERROR") {
            Confirmation::Rejected
        } else if response.iter().all(u8::is_ascii_whitespace) {
            Confirmation::NoResponse
        } else {
            Confirmation::Unverified
        }
    }
}

/// Outcome of a completed send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub recipient: String<MAX_RECIPIENT_LEN>,
    /// Trimmed modem output after the message was terminated.
    pub response: String<RESPONSE_LEN>,
    pub confirmation: Confirmation,
    /// Time from submission to `Done`.
    pub elapsed: Duration,
}

/// Progress reported by [`ModemSequencer::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModemEvent {
    /// Initialization finished and no message is pending.
    Ready,
    /// The pending message went through the whole sequence.
    Sent(SendReceipt),
}

/// The message currently being sent.
#[derive(Debug, Clone)]
pub struct ModemSession<I> {
    recipient: String<MAX_RECIPIENT_LEN>,
    pending_message: String<MAX_SMS_LEN>,
    start_tick: I,
}

/// Drives a text-mode SMS modem through the AT command sequence.
///
/// Non-blocking at heart: [`submit`](Self::submit) opens a session and
/// [`poll`](Self::poll) advances whenever the current state's settle delay has
/// run out. [`send`](Self::send) and [`initialize`](Self::initialize) wrap
/// that in a blocking loop for the cooperative cycle.
pub struct ModemSequencer<IF>
where
    IF: SerialLink + NodeTimer,
{
    interface: IF,
    state: ModemState,
    session: Option<ModemSession<IF::Instant>>,
    deadline: Option<IF::Instant>,
    timing: ModemTiming,
    policy: ConfirmPolicy,
    response: Vec<u8, RESPONSE_LEN>,
    /// Verdict and modem output captured when `AwaitConfirm` ended.
    confirmation: Option<(Confirmation, String<RESPONSE_LEN>)>,
}

impl<IF> ModemSequencer<IF>
where
    IF: SerialLink + NodeTimer,
{
    pub fn new(interface: IF, timing: ModemTiming, policy: ConfirmPolicy) -> Self {
        ModemSequencer {
            interface,
            state: ModemState::Idle,
            session: None,
            deadline: None,
            timing,
            policy,
            response: Vec::new(),
            confirmation: None,
        }
    }

    pub fn from_config(interface: IF, config: &NodeConfig) -> Self {
        Self::new(interface, config.modem_timing, config.confirm_policy)
    }

    pub fn state(&self) -> ModemState {
        self.state
    }

    /// A message is pending or in flight.
    pub fn is_busy(&self) -> bool {
        self.session.is_some()
    }

    pub fn interface(&self) -> &IF {
        &self.interface
    }

    pub fn interface_mut(&mut self) -> &mut IF {
        &mut self.interface
    }

    // --- Non-blocking API ---

    /// Starts the probe/text-mode sequence if the modem is not initialized.
    pub fn begin_initialize(&mut self) -> Result<(), NodeError<IF::Error>> {
        if matches!(self.state, ModemState::Idle | ModemState::Error) {
            self.state = ModemState::Idle;
            self.enter(ModemState::Idle.next(false))?;
        }
        Ok(())
    }

    /// Opens a session for `message` to `recipient`.
    ///
    /// Rejects with [`NodeError::ModemBusy`] while another session exists.
    /// From `Idle` or `Error` the modem is (re)initialized first.
    pub fn submit(&mut self, recipient: &str, message: &str) -> Result<(), NodeError<IF::Error>> {
        if self.session.is_some() {
            return Err(NodeError::ModemBusy);
        }
        if !command::is_valid_recipient(recipient) || recipient.len() > MAX_RECIPIENT_LEN {
            return Err(NodeError::CommandFormat);
        }
        if message.len() > MAX_SMS_LEN {
            return Err(NodeError::BufferOverflow {
                needed: message.len(),
                got: MAX_SMS_LEN,
            });
        }

        let mut session = ModemSession {
            recipient: String::new(),
            pending_message: String::new(),
            start_tick: self.interface.now(),
        };
        // Lengths checked above
        let _ = session.recipient.push_str(recipient);
        let _ = session.pending_message.push_str(message);
        self.session = Some(session);

        self.begin_initialize()
    }

    /// Advances the sequence as far as elapsed time allows.
    ///
    /// Returns `WouldBlock` while waiting out a settle delay. Faults drop the
    /// session and leave the sequencer in `Error`.
    pub fn poll(&mut self) -> nb::Result<ModemEvent, NodeError<IF::Error>> {
        loop {
            match self.state {
                ModemState::Idle | ModemState::Error => {
                    return Err(nb::Error::Other(NodeError::NotReady { state: self.state }));
                }
                ModemState::Ready => {
                    if self.session.is_none() {
                        return Ok(ModemEvent::Ready);
                    }
                    self.enter(ModemState::Ready.next(true))?;
                }
                ModemState::Done => {
                    let receipt = self.complete_session();
                    self.state = ModemState::Done.next(false);
                    debug!("modem: Done -> {:?}", self.state);
                    return Ok(ModemEvent::Sent(receipt));
                }
                active => {
                    if let Some(deadline) = self.deadline {
                        if self.interface.now() < deadline {
                            return Err(nb::Error::WouldBlock);
                        }
                    }
                    self.finish_state(active)?;
                    self.enter(active.next(self.session.is_some()))?;
                }
            }
        }
    }

    // --- Blocking API ---

    /// Runs the probe/text-mode sequence to `Ready`.
    pub fn initialize(&mut self) -> Result<(), NodeError<IF::Error>> {
        if self.session.is_some() {
            return Err(NodeError::ModemBusy);
        }
        self.begin_initialize()?;
        loop {
            match self.poll() {
                Ok(_) => return Ok(()),
                Err(nb::Error::WouldBlock) => self.sleep_until_deadline(),
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }
    }

    /// Sends `message` to `recipient`, blocking until `Done` or a fault.
    pub fn send(
        &mut self,
        recipient: &str,
        message: &str,
    ) -> Result<SendReceipt, NodeError<IF::Error>> {
        self.submit(recipient, message)?;
        loop {
            match self.poll() {
                Ok(ModemEvent::Sent(receipt)) => return Ok(receipt),
                // Not reachable while our session is pending
                Ok(ModemEvent::Ready) => return Err(NodeError::NotReady { state: self.state }),
                Err(nb::Error::WouldBlock) => self.sleep_until_deadline(),
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }
    }

    // --- State Helpers (Private) ---

    /// Transitions to `next`, performs its entry action and arms its deadline.
    fn enter(&mut self, next: ModemState) -> Result<(), NodeError<IF::Error>> {
        debug!("modem: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.response.clear();

        if let Some(action) = next.entry_action() {
            if let Err(e) = self.perform(action) {
                return Err(self.fail(e));
            }
        }

        let settle = self.timing.settle_for(next);
        self.deadline = Some(self.interface.now() + settle);
        Ok(())
    }

    fn perform(&mut self, action: EntryAction) -> Result<(), NodeError<IF::Error>> {
        match action {
            EntryAction::Probe => self.write_command(ModemCommand::Probe),
            EntryAction::SelectTextMode => self.write_command(ModemCommand::SelectTextMode),
            EntryAction::Compose => {
                let session = self.session.as_ref().ok_or(NodeError::NotReady { state: self.state })?;
                let cmd = ModemCommand::Compose {
                    recipient: session.recipient.as_str(),
                }
                .format_into()
                .map_err(|_| NodeError::CommandFormat)?;
                info!("modem: sending SMS to {}", session.recipient.as_str());
                write_all(&mut self.interface, cmd.as_bytes())
            }
            EntryAction::Body => {
                let session = self.session.as_ref().ok_or(NodeError::NotReady { state: self.state })?;
                let mut body: Vec<u8, MAX_SMS_LEN> = Vec::new();
                for byte in session.pending_message.bytes() {
                    // Ctrl-Z/ESC inside the text would end or abort the message early
                    let byte = if byte.is_ascii_control() && byte != b'\n' && byte != b'\r' {
                        b'?'
                    } else {
                        byte
                    };
                    let _ = body.push(byte);
                }
                write_all(&mut self.interface, &body)
            }
            EntryAction::EndOfMessage => self.write_command(ModemCommand::EndOfMessage),
        }
    }

    fn write_command(&mut self, cmd: ModemCommand<'_>) -> Result<(), NodeError<IF::Error>> {
        let buffer = cmd.format_into().map_err(|_| NodeError::CommandFormat)?;
        write_all(&mut self.interface, buffer.as_bytes())
    }

    /// Collects the modem's answer for `state` and applies the confirm policy.
    fn finish_state(&mut self, state: ModemState) -> Result<(), NodeError<IF::Error>> {
        if let Err(e) = drain_available(&mut self.interface, &mut self.response) {
            return Err(self.fail(e));
        }

        match state {
            ModemState::AtProbe | ModemState::TextModeSet => {
                if self.policy == ConfirmPolicy::Strict && !contains(&self.response, b"OK") {
                    return Err(self.fail(NodeError::ModemTimeout { state }));
                }
            }
            ModemState::AwaitConfirm => {
                let confirmation = Confirmation::from_response(&self.response);
                match (self.policy, confirmation) {
                    (_, Confirmation::Confirmed) => {}
                    (ConfirmPolicy::Strict, Confirmation::Rejected) => {
                        return Err(self.fail(NodeError::ModemRejected));
                    }
                    (ConfirmPolicy::Strict, _) => {
                        return Err(self.fail(NodeError::ModemTimeout { state }));
                    }
                    (ConfirmPolicy::Optimistic, other) => {
                        warn!("modem: no confirmation ({:?}), assuming sent", other);
                    }
                }
                self.confirmation = Some((confirmation, printable(&self.response)));
            }
            _ => {}
        }
        Ok(())
    }

    fn complete_session(&mut self) -> SendReceipt {
        let now = self.interface.now();
        let (confirmation, response) = self
            .confirmation
            .take()
            .unwrap_or((Confirmation::NoResponse, String::new()));
        let (recipient, elapsed) = match self.session.take() {
            Some(session) => (session.recipient, now - session.start_tick),
            None => (String::new(), Duration::ZERO),
        };
        info!("modem: SMS to {} done ({:?})", recipient.as_str(), confirmation);
        SendReceipt {
            recipient,
            response,
            confirmation,
            elapsed,
        }
    }

    /// Drops the session and parks the sequencer in `Error`.
    fn fail(&mut self, e: NodeError<IF::Error>) -> NodeError<IF::Error> {
        error!("modem: {:?} failed: {}", self.state, e);
        self.state = ModemState::Error;
        self.session = None;
        self.deadline = None;
        self.confirmation = None;
        e
    }

    fn sleep_until_deadline(&mut self) {
        let Some(deadline) = self.deadline else {
            return;
        };
        let remaining = deadline - self.interface.now();
        let micros = remaining.as_micros().min(u32::MAX as u128) as u32;
        if micros >= 1000 {
            self.interface.delay_ms(micros / 1000);
        }
        if micros % 1000 > 0 {
            self.interface.delay_us(micros % 1000);
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

/// Modem output as trimmed printable ASCII.
fn printable(bytes: &[u8]) -> String<RESPONSE_LEN> {
    let mut out: String<RESPONSE_LEN> = String::new();
    for &byte in bytes {
        let c = match byte {
            b'\r' | b'\n' => byte as char,
            _ if byte.is_ascii_graphic() || byte == b' ' => byte as char,
            _ => '?',
        };
        let _ = out.push(c);
    }
    let trimmed = out.trim();
    let mut result = String::new();
    let _ = result.push_str(trimmed);
    result
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::hal_traits::Ticks;
    use std::vec::Vec as StdVec;

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    struct MockCommError;

    /// Scripted modem: replies become readable once a write containing the
    /// trigger has been seen.
    struct MockModem {
        now_us: u64,
        writes: StdVec<(u64, StdVec<u8>)>,
        current: StdVec<u8>,
        rx: StdVec<u8>,
        replies: StdVec<(&'static [u8], &'static [u8])>,
        fail_writes: bool,
    }

    impl MockModem {
        fn new() -> Self {
            MockModem {
                now_us: 0,
                writes: StdVec::new(),
                current: StdVec::new(),
                rx: StdVec::new(),
                replies: StdVec::new(),
                fail_writes: false,
            }
        }

        /// A well-behaved SIM800-style modem.
        fn cooperative() -> Self {
            let mut modem = Self::new();
            modem.reply(b"AT\r\n", b"AT\r\r\nOK\r\n");
            modem.reply(b"AT+CMGF=1\r\n", b"OK\r\n");
            modem.reply(b"AT+CMGS=", b"\r\n> ");
            modem.reply(&[CTRL_Z], b"\r\n+CMGS: 17\r\n\r\nOK\r\n");
            modem
        }

        fn reply(&mut self, trigger: &'static [u8], answer: &'static [u8]) {
            self.replies.push((trigger, answer));
        }

        fn written(&self) -> StdVec<StdVec<u8>> {
            self.writes.iter().map(|(_, bytes)| bytes.clone()).collect()
        }
    }

    impl NodeTimer for MockModem {
        type Instant = Ticks;
        fn delay_us(&mut self, us: u32) {
            self.now_us += us as u64;
        }
        fn delay_ms(&mut self, ms: u32) {
            self.now_us += ms as u64 * 1000;
        }
        fn now(&self) -> Ticks {
            Ticks(self.now_us)
        }
    }

    impl SerialLink for MockModem {
        type Error = MockCommError;
        fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
            if self.rx.is_empty() {
                Err(nb::Error::WouldBlock)
            } else {
                Ok(self.rx.remove(0))
            }
        }
        fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
            if self.fail_writes {
                return Err(nb::Error::Other(MockCommError));
            }
            self.current.push(byte);
            Ok(())
        }
        fn flush(&mut self) -> nb::Result<(), Self::Error> {
            // One flush per logical write
            let chunk = core::mem::take(&mut self.current);
            if let Some((_, answer)) = self
                .replies
                .iter()
                .find(|(trigger, _)| contains(&chunk, trigger))
            {
                self.rx.extend_from_slice(answer);
            }
            self.writes.push((self.now_us, chunk));
            Ok(())
        }
    }

    const RECIPIENT: &str = "+255700000001";
    const MESSAGE: &str = "ALERTS:\nTurbidity is too low (3.00 NTU)";

    fn sequencer(modem: MockModem, policy: ConfirmPolicy) -> ModemSequencer<MockModem> {
        ModemSequencer::new(modem, ModemTiming::standard(), policy)
    }

    fn ms(value: u64) -> u64 {
        value * 1000
    }

    #[test]
    fn test_initialize_reaches_ready() {
        let mut seq = sequencer(MockModem::cooperative(), ConfirmPolicy::Optimistic);
        assert_eq!(seq.state(), ModemState::Idle);
        seq.initialize().unwrap();
        assert_eq!(seq.state(), ModemState::Ready);
        assert_eq!(seq.interface.written(), [b"AT\r\n".to_vec(), b"AT+CMGF=1\r\n".to_vec()]);
        assert_eq!(seq.interface.now_us, ms(2000));
    }

    #[test]
    fn test_send_from_ready_emits_full_sequence() {
        let mut seq = sequencer(MockModem::cooperative(), ConfirmPolicy::Optimistic);
        seq.initialize().unwrap();
        let start = seq.interface.now_us;

        let receipt = seq.send(RECIPIENT, MESSAGE).unwrap();

        let writes = &seq.interface.writes[2..];
        assert_eq!(writes.len(), 3);
        assert_eq!(writes[0].1, b"AT+CMGS=\"+255700000001\"\r\n");
        assert_eq!(writes[1].1, MESSAGE.as_bytes());
        assert_eq!(writes[2].1, [CTRL_Z]);
        // Each step waits out the previous settle delay
        assert_eq!(writes[0].0, start);
        assert_eq!(writes[1].0, start + ms(1000));
        assert_eq!(writes[2].0, start + ms(1100));

        assert_eq!(receipt.recipient.as_str(), RECIPIENT);
        assert_eq!(receipt.confirmation, Confirmation::Confirmed);
        assert_eq!(receipt.response.as_str(), "+CMGS: 17\r\n\r\nOK");
        assert_eq!(receipt.elapsed, Duration::from_millis(4100));
        assert_eq!(seq.state(), ModemState::Ready);
        assert!(!seq.is_busy());
    }

    #[test]
    fn test_poll_walks_every_state_in_order() {
        let mut seq = sequencer(MockModem::cooperative(), ConfirmPolicy::Optimistic);
        seq.submit(RECIPIENT, MESSAGE).unwrap();

        let mut seen = StdVec::from([seq.state()]);
        loop {
            match seq.poll() {
                Ok(ModemEvent::Sent(_)) => break,
                Ok(ModemEvent::Ready) => panic!("ready before send"),
                Err(nb::Error::WouldBlock) => {
                    if seen.last() != Some(&seq.state()) {
                        seen.push(seq.state());
                    }
                    seq.interface.delay_ms(50);
                }
                Err(nb::Error::Other(e)) => panic!("{:?}", e),
            }
        }
        seen.push(seq.state());

        assert_eq!(
            seen,
            [
                ModemState::AtProbe,
                ModemState::TextModeSet,
                ModemState::SendingHeader,
                ModemState::SendingBody,
                ModemState::AwaitConfirm,
                ModemState::Ready,
            ]
        );
    }

    #[test]
    fn test_poll_would_block_until_deadline() {
        let mut seq = sequencer(MockModem::cooperative(), ConfirmPolicy::Optimistic);
        seq.begin_initialize().unwrap();
        assert_eq!(seq.state(), ModemState::AtProbe);
        seq.interface.delay_ms(999);
        assert!(matches!(seq.poll(), Err(nb::Error::WouldBlock)));
        assert_eq!(seq.state(), ModemState::AtProbe);
        seq.interface.delay_ms(1);
        assert!(matches!(seq.poll(), Err(nb::Error::WouldBlock)));
        assert_eq!(seq.state(), ModemState::TextModeSet);
    }

    #[test]
    fn test_submit_while_busy_is_rejected() {
        let mut seq = sequencer(MockModem::cooperative(), ConfirmPolicy::Optimistic);
        seq.submit(RECIPIENT, MESSAGE).unwrap();
        assert!(seq.is_busy());
        assert!(matches!(seq.submit(RECIPIENT, "second"), Err(NodeError::ModemBusy)));
        assert!(matches!(seq.initialize(), Err(NodeError::ModemBusy)));
    }

    #[test]
    fn test_submit_validates_inputs() {
        let mut seq = sequencer(MockModem::cooperative(), ConfirmPolicy::Optimistic);
        assert!(matches!(seq.submit("12\"3", MESSAGE), Err(NodeError::CommandFormat)));
        let long = [b'x'; MAX_SMS_LEN + 1];
        let long = core::str::from_utf8(&long).unwrap();
        assert!(matches!(
            seq.submit(RECIPIENT, long),
            Err(NodeError::BufferOverflow { needed: 321, got: 320 })
        ));
        assert!(!seq.is_busy());
        assert_eq!(seq.state(), ModemState::Idle);
    }

    #[test]
    fn test_optimistic_silent_modem_still_succeeds() {
        let mut seq = sequencer(MockModem::new(), ConfirmPolicy::Optimistic);
        let receipt = seq.send(RECIPIENT, MESSAGE).unwrap();
        assert_eq!(receipt.confirmation, Confirmation::NoResponse);
        assert!(receipt.response.is_empty());
        assert_eq!(seq.state(), ModemState::Ready);
    }

    #[test]
    fn test_optimistic_records_rejection() {
        let mut modem = MockModem::new();
        modem.reply(&[CTRL_Z], b"\r\n+CMS ERROR: 500\r\n");
        let mut seq = sequencer(modem, ConfirmPolicy::Optimistic);
        let receipt = seq.send(RECIPIENT, MESSAGE).unwrap();
        assert_eq!(receipt.confirmation, Confirmation::Rejected);
    }

    #[test]
    fn test_strict_probe_timeout() {
        let mut seq = sequencer(MockModem::new(), ConfirmPolicy::Strict);
        let result = seq.send(RECIPIENT, MESSAGE);
        assert!(matches!(
            result,
            Err(NodeError::ModemTimeout { state: ModemState::AtProbe })
        ));
        assert_eq!(seq.state(), ModemState::Error);
        assert!(!seq.is_busy());
        // Only the probe went out
        assert_eq!(seq.interface.written(), [b"AT\r\n".to_vec()]);
    }

    #[test]
    fn test_strict_confirm_timeout_and_rejection() {
        let mut modem = MockModem::cooperative();
        modem.replies.pop();
        let mut seq = sequencer(modem, ConfirmPolicy::Strict);
        assert!(matches!(
            seq.send(RECIPIENT, MESSAGE),
            Err(NodeError::ModemTimeout { state: ModemState::AwaitConfirm })
        ));

        let mut modem = MockModem::cooperative();
        modem.replies.pop();
        modem.reply(&[CTRL_Z], b"\r\n+CMS ERROR: 38\r\n");
        let mut seq = sequencer(modem, ConfirmPolicy::Strict);
        assert!(matches!(seq.send(RECIPIENT, MESSAGE), Err(NodeError::ModemRejected)));
        assert_eq!(seq.state(), ModemState::Error);
    }

    #[test]
    fn test_strict_cooperative_send() {
        let mut seq = sequencer(MockModem::cooperative(), ConfirmPolicy::Strict);
        let receipt = seq.send(RECIPIENT, MESSAGE).unwrap();
        assert_eq!(receipt.confirmation, Confirmation::Confirmed);
    }

    #[test]
    fn test_error_state_reinitializes_on_next_send() {
        let mut seq = sequencer(MockModem::new(), ConfirmPolicy::Strict);
        assert!(seq.send(RECIPIENT, MESSAGE).is_err());
        assert_eq!(seq.state(), ModemState::Error);

        // Modem comes back
        let replies = MockModem::cooperative().replies;
        seq.interface.replies = replies;
        seq.interface.writes.clear();
        seq.send(RECIPIENT, MESSAGE).unwrap();
        assert_eq!(seq.interface.writes[0].1, b"AT\r\n");
        assert_eq!(seq.interface.writes.len(), 5);
    }

    #[test]
    fn test_write_failure_ends_session() {
        let mut modem = MockModem::cooperative();
        modem.fail_writes = true;
        let mut seq = sequencer(modem, ConfirmPolicy::Optimistic);
        let result = seq.send(RECIPIENT, MESSAGE);
        assert!(matches!(result, Err(NodeError::Io(MockCommError))));
        assert_eq!(seq.state(), ModemState::Error);
        assert!(!seq.is_busy());
    }

    #[test]
    fn test_body_control_bytes_are_neutralized() {
        let mut seq = sequencer(MockModem::cooperative(), ConfirmPolicy::Optimistic);
        seq.send(RECIPIENT, "a\u{1a}b\u{1b}c\nd").unwrap();
        assert_eq!(seq.interface.writes[3].1, b"a?b?c\nd");
    }

    #[test]
    fn test_poll_when_idle_is_not_ready() {
        let mut seq = sequencer(MockModem::cooperative(), ConfirmPolicy::Optimistic);
        assert!(matches!(
            seq.poll(),
            Err(nb::Error::Other(NodeError::NotReady { state: ModemState::Idle }))
        ));
    }

    #[test]
    fn test_confirmation_classification() {
        assert_eq!(Confirmation::from_response(b"\r\n+CMGS: 3\r\n"), Confirmation::Confirmed);
        assert_eq!(Confirmation::from_response(b"OK"), Confirmation::Confirmed);
        assert_eq!(Confirmation::from_response(b"ERROR"), Confirmation::Rejected);
        assert_eq!(Confirmation::from_response(b" \r\n"), Confirmation::NoResponse);
        assert_eq!(Confirmation::from_response(b"RING"), Confirmation::Unverified);
    }
}
