// src/common/config.rs

use super::timing;
use crate::modem::ModemState;
use core::time::Duration;

/// Placeholder recipient used when no number is baked in at build time.
pub const PLACEHOLDER_RECIPIENT: &str = "+10000000000";

/// SMS recipient, fixed at build time via `SCHISTOGUARD_SMS_RECIPIENT`.
pub const SMS_RECIPIENT: &str = match option_env!("SCHISTOGUARD_SMS_RECIPIENT") {
    Some(number) => number,
    None => PLACEHOLDER_RECIPIENT,
};

/// How much the modem sequencer trusts its fixed delays.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ConfirmPolicy {
    /// Never check modem answers; every send that gets through its delays is
    /// reported as successful. The receipt still records what came back.
    #[default]
    Optimistic,
    /// Require `OK` after the probe and text-mode commands and `+CMGS`/`OK`
    /// after the message; silence is a `ModemTimeout`, `ERROR` a rejection.
    Strict,
}

/// Settle delay for each modem state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ModemTiming {
    pub probe: Duration,
    pub text_mode: Duration,
    pub prompt: Duration,
    pub body: Duration,
    pub confirm: Duration,
}

impl Default for ModemTiming {
    fn default() -> Self {
        Self::standard()
    }
}

impl ModemTiming {
    pub const fn standard() -> Self {
        Self {
            probe: timing::MODEM_PROBE_SETTLE,
            text_mode: timing::MODEM_TEXT_MODE_SETTLE,
            prompt: timing::MODEM_PROMPT_SETTLE,
            body: timing::MODEM_BODY_SETTLE,
            confirm: timing::MODEM_CONFIRM_WAIT,
        }
    }

    /// How long the sequencer stays in `state` after performing its entry action.
    pub const fn settle_for(&self, state: ModemState) -> Duration {
        match state {
            ModemState::AtProbe => self.probe,
            ModemState::TextModeSet => self.text_mode,
            ModemState::SendingHeader => self.prompt,
            ModemState::SendingBody => self.body,
            ModemState::AwaitConfirm => self.confirm,
            ModemState::Idle | ModemState::Ready | ModemState::Done | ModemState::Error => {
                Duration::ZERO
            }
        }
    }

    /// Sum of all delays from `Idle` through `Done`.
    pub const fn full_sequence(&self) -> Duration {
        let ms = self.probe.as_millis()
            + self.text_mode.as_millis()
            + self.prompt.as_millis()
            + self.body.as_millis()
            + self.confirm.as_millis();
        Duration::from_millis(ms as u64)
    }
}

/// Node-wide configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub recipient: &'static str,
    pub cycle_period: Duration,
    /// Alert drain ends after this much host silence.
    pub alert_quiescence: Duration,
    /// Alert drain never runs longer than this.
    pub alert_drain_limit: Duration,
    pub modem_timing: ModemTiming,
    pub confirm_policy: ConfirmPolicy,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl NodeConfig {
    pub const fn standard() -> Self {
        Self {
            recipient: SMS_RECIPIENT,
            cycle_period: timing::CYCLE_PERIOD,
            alert_quiescence: timing::ALERT_QUIESCENCE,
            alert_drain_limit: timing::ALERT_DRAIN_LIMIT,
            modem_timing: ModemTiming::standard(),
            confirm_policy: ConfirmPolicy::Optimistic,
        }
    }

    pub const fn with_recipient(mut self, recipient: &'static str) -> Self {
        self.recipient = recipient;
        self
    }

    pub const fn with_confirm_policy(mut self, policy: ConfirmPolicy) -> Self {
        self.confirm_policy = policy;
        self
    }

    /// True when no recipient was baked in at build time.
    pub fn has_placeholder_recipient(&self) -> bool {
        self.recipient == PLACEHOLDER_RECIPIENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_for_active_states() {
        let timing = ModemTiming::standard();
        assert_eq!(timing.settle_for(ModemState::AtProbe), Duration::from_millis(1000));
        assert_eq!(timing.settle_for(ModemState::SendingBody), Duration::from_millis(100));
        assert_eq!(timing.settle_for(ModemState::AwaitConfirm), Duration::from_millis(3000));
        assert_eq!(timing.settle_for(ModemState::Ready), Duration::ZERO);
        assert_eq!(timing.full_sequence(), Duration::from_millis(6100));
    }

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.confirm_policy, ConfirmPolicy::Optimistic);
        assert!(config.alert_quiescence < config.alert_drain_limit);
        assert!(config.alert_drain_limit < config.cycle_period);
        assert!(!config.recipient.is_empty());
    }

    #[test]
    fn test_builders() {
        let config = NodeConfig::standard()
            .with_recipient("+255700000001")
            .with_confirm_policy(ConfirmPolicy::Strict);
        assert_eq!(config.recipient, "+255700000001");
        assert_eq!(config.confirm_policy, ConfirmPolicy::Strict);
        assert!(!config.has_placeholder_recipient());
    }

    #[test]
    fn test_placeholder_recipient_detected() {
        let config = NodeConfig::standard().with_recipient(PLACEHOLDER_RECIPIENT);
        assert!(config.has_placeholder_recipient());
    }
}
