//! AT commands used to send a text-mode SMS.
//!
//! Only the handful of commands the send sequence needs; see 3GPP TS 27.005
//! for `+CMGF`/`+CMGS`.

use arrayvec::ArrayString;
use core::fmt::{self, Write};

/// Capacity of a formatted command, sized for `AT+CMGS="<20 chars>"\r\n`.
pub const COMMAND_BUFFER_LEN: usize = 40;

/// Ctrl-Z, ends the message body in text mode.
pub const CTRL_Z: u8 = 0x1A;

pub type CommandBuffer = ArrayString<COMMAND_BUFFER_LEN>;

/// A modem command.
///
/// The `Display` implementation produces the exact bytes sent, terminator included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModemCommand<'a> {
    /// `AT` - liveness probe.
    Probe,
    /// `AT+CMGF=1` - select text-mode SMS.
    SelectTextMode,
    /// `AT+CMGS="<recipient>"` - open a message to `recipient`; the modem answers with a `>` prompt.
    Compose { recipient: &'a str },
    /// Ctrl-Z - end of message body.
    EndOfMessage,
}

/// Error returned when a command does not fit [`CommandBuffer`] or carries
/// characters the modem would misread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFormatError;

impl fmt::Display for ModemCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModemCommand::Probe => f.write_str("AT\r\n"),
            ModemCommand::SelectTextMode => f.write_str("AT+CMGF=1\r\n"),
            ModemCommand::Compose { recipient } => {
                // A quote or line break would end the command early
                if !is_valid_recipient(recipient) {
                    return Err(fmt::Error);
                }
                write!(f, "AT+CMGS=\"{}\"\r\n", recipient)
            }
            ModemCommand::EndOfMessage => f.write_char(CTRL_Z as char),
        }
    }
}

impl ModemCommand<'_> {
    /// Formats the command into a fixed-size buffer.
    pub fn format_into(&self) -> Result<CommandBuffer, CommandFormatError> {
        let mut buffer = CommandBuffer::new();
        write!(buffer, "{}", self).map_err(|_| CommandFormatError)?;
        Ok(buffer)
    }
}

/// Dial string accepted in `AT+CMGS`: optional leading `+`, then digits.
pub fn is_valid_recipient(recipient: &str) -> bool {
    let digits = recipient.strip_prefix('+').unwrap_or(recipient);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_commands() {
        assert_eq!(ModemCommand::Probe.format_into().unwrap().as_str(), "AT\r\n");
        assert_eq!(
            ModemCommand::SelectTextMode.format_into().unwrap().as_str(),
            "AT+CMGF=1\r\n"
        );
        assert_eq!(
            ModemCommand::EndOfMessage.format_into().unwrap().as_bytes(),
            &[CTRL_Z]
        );
    }

    #[test]
    fn test_compose_command() {
        let cmd = ModemCommand::Compose {
            recipient: "+255700000001",
        };
        assert_eq!(cmd.format_into().unwrap().as_str(), "AT+CMGS=\"+255700000001\"\r\n");
    }

    #[test]
    fn test_compose_rejects_bad_recipients() {
        for recipient in ["", "+", "07\"00", "0700\r\n", "+2557-0000"] {
            let cmd = ModemCommand::Compose { recipient };
            assert_eq!(cmd.format_into(), Err(CommandFormatError), "{:?}", recipient);
        }
    }

    #[test]
    fn test_compose_too_long_for_buffer() {
        let cmd = ModemCommand::Compose {
            recipient: "+123456789012345678901234567890",
        };
        assert_eq!(cmd.format_into(), Err(CommandFormatError));
    }
}
