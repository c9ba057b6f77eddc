// src/modem/state.rs

/// States of the SMS send sequence.
///
/// ```text
/// Idle -> AtProbe -> TextModeSet -> Ready -> SendingHeader -> SendingBody
///      -> AwaitConfirm -> Done -> Ready
/// ```
/// `Error` is reachable from `AtProbe`, `TextModeSet` and `AwaitConfirm`.
/// Every transition happens when the current state's settle delay runs out;
/// the driver in [`super::ModemSequencer`] owns the clock, this type only
/// knows the order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ModemState {
    Idle,
    AtProbe,
    TextModeSet,
    Ready,
    SendingHeader,
    SendingBody,
    AwaitConfirm,
    Done,
    Error,
}

/// What the sequencer emits on entering a state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryAction {
    Probe,
    SelectTextMode,
    Compose,
    Body,
    EndOfMessage,
}

impl ModemState {
    /// Successor once this state's settle delay has elapsed without a fault.
    ///
    /// `Ready` only moves on when a message is pending; `Done` always returns
    /// to `Ready`; `Error` falls back to `Idle` so the next request re-probes.
    pub const fn next(self, has_pending: bool) -> ModemState {
        match self {
            ModemState::Idle => ModemState::AtProbe,
            ModemState::AtProbe => ModemState::TextModeSet,
            ModemState::TextModeSet => ModemState::Ready,
            ModemState::Ready if has_pending => ModemState::SendingHeader,
            ModemState::Ready => ModemState::Ready,
            ModemState::SendingHeader => ModemState::SendingBody,
            ModemState::SendingBody => ModemState::AwaitConfirm,
            ModemState::AwaitConfirm => ModemState::Done,
            ModemState::Done => ModemState::Ready,
            ModemState::Error => ModemState::Idle,
        }
    }

    /// State entered when the modem fails to answer in this state.
    pub const fn on_timeout(self) -> ModemState {
        if self.can_time_out() {
            ModemState::Error
        } else {
            self
        }
    }

    /// States whose answer is checked under `ConfirmPolicy::Strict`.
    pub const fn can_time_out(self) -> bool {
        matches!(
            self,
            ModemState::AtProbe | ModemState::TextModeSet | ModemState::AwaitConfirm
        )
    }

    /// What the sequencer emits on entering this state, if anything.
    pub const fn entry_action(self) -> Option<EntryAction> {
        match self {
            ModemState::AtProbe => Some(EntryAction::Probe),
            ModemState::TextModeSet => Some(EntryAction::SelectTextMode),
            ModemState::SendingHeader => Some(EntryAction::Compose),
            ModemState::SendingBody => Some(EntryAction::Body),
            ModemState::AwaitConfirm => Some(EntryAction::EndOfMessage),
            ModemState::Idle | ModemState::Ready | ModemState::Done | ModemState::Error => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(from: ModemState, until: ModemState, has_pending: bool) -> heapless::Vec<ModemState, 16> {
        let mut path = heapless::Vec::new();
        let mut state = from;
        path.push(state).unwrap();
        while state != until {
            state = state.next(has_pending);
            path.push(state).unwrap();
        }
        path
    }

    #[test]
    fn test_full_send_sequence_from_idle() {
        let path = walk(ModemState::Idle, ModemState::Done, true);
        assert_eq!(
            &path[..],
            &[
                ModemState::Idle,
                ModemState::AtProbe,
                ModemState::TextModeSet,
                ModemState::Ready,
                ModemState::SendingHeader,
                ModemState::SendingBody,
                ModemState::AwaitConfirm,
                ModemState::Done,
            ]
        );
    }

    #[test]
    fn test_send_from_ready_never_skips_body() {
        let path = walk(ModemState::Ready, ModemState::Done, true);
        assert!(path.contains(&ModemState::SendingBody));
        assert_eq!(path.len(), 5);
        assert_eq!(ModemState::Done.next(false), ModemState::Ready);
    }

    #[test]
    fn test_ready_waits_without_pending_message() {
        assert_eq!(ModemState::Ready.next(false), ModemState::Ready);
    }

    #[test]
    fn test_timeouts() {
        assert_eq!(ModemState::AtProbe.on_timeout(), ModemState::Error);
        assert_eq!(ModemState::TextModeSet.on_timeout(), ModemState::Error);
        assert_eq!(ModemState::AwaitConfirm.on_timeout(), ModemState::Error);
        assert_eq!(ModemState::SendingBody.on_timeout(), ModemState::SendingBody);
        assert_eq!(ModemState::Error.next(false), ModemState::Idle);
    }

    #[test]
    fn test_entry_actions() {
        assert_eq!(ModemState::AtProbe.entry_action(), Some(EntryAction::Probe));
        assert_eq!(ModemState::SendingBody.entry_action(), Some(EntryAction::Body));
        assert_eq!(ModemState::AwaitConfirm.entry_action(), Some(EntryAction::EndOfMessage));
        assert_eq!(ModemState::Ready.entry_action(), None);
    }
}
