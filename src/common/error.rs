// src/common/error.rs

use crate::modem::ModemState;

/// Errors raised by the node's I/O-facing components.
///
/// Parsing never produces one of these: malformed host lines fall back to
/// verbatim text instead. `E` is the error type of the underlying serial link.
#[derive(Debug, thiserror::Error)]
pub enum NodeError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I/O error from the HAL implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// A blocking serial operation did not complete in time.
    #[error("Operation timed out")]
    Timeout,

    /// The modem did not answer as expected while in `state`.
    #[error("Modem did not respond in state {state:?}")]
    ModemTimeout { state: ModemState },

    /// The modem answered `ERROR` to a send.
    #[error("Modem rejected the message")]
    ModemRejected,

    /// A send was submitted while another session was still in progress.
    #[error("Modem busy with another message")]
    ModemBusy,

    /// The sequencer was asked to act in a state that cannot accept the request.
    #[error("Modem not ready (state {state:?})")]
    NotReady { state: ModemState },

    /// An AT command did not fit its buffer (recipient too long).
    #[error("Failed to format modem command")]
    CommandFormat,

    /// Buffer provided was too small.
    #[error("Buffer overflow: needed {needed}, got {got}")]
    BufferOverflow { needed: usize, got: usize },
}

impl<E: core::fmt::Debug> NodeError<E> {
    /// True for failures where the modem itself misbehaved, as opposed to the link.
    pub fn is_modem_fault(&self) -> bool {
        matches!(
            self,
            NodeError::ModemTimeout { .. } | NodeError::ModemRejected
        )
    }
}

// Allow mapping from underlying HAL error if From is implemented
impl<E: core::fmt::Debug> From<E> for NodeError<E> {
    fn from(e: E) -> Self {
        NodeError::Io(e)
    }
}
