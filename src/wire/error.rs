//! Error types for the wire codec.

use std::io;
use thiserror::Error;

/// A violation of a semantic rule of the wire format.
///
/// Raised for things like an address count above [`MAX_ADDR_PER_MSG`],
/// an unknown command or a bad frame checksum. `func` names the
/// operation that refused the data.
///
/// [`MAX_ADDR_PER_MSG`]: crate::wire::constants::MAX_ADDR_PER_MSG
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{func}: {description}")]
pub struct MessageError {
    pub func: &'static str,
    pub description: String,
}

impl MessageError {
    pub fn new(func: &'static str, description: impl Into<String>) -> Self {
        Self {
            func,
            description: description.into(),
        }
    }
}

/// Everything that can go wrong while encoding or decoding a message.
///
/// Protocol violations and I/O failures are kept apart so callers can
/// pick a policy (ban the peer vs. drop the connection).
#[derive(Debug, Error)]
pub enum WireError {
    /// The bytes broke a rule of the protocol.
    #[error(transparent)]
    Message(#[from] MessageError),

    /// The underlying reader or writer failed. Passed through untouched.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl WireError {
    /// Returns the protocol error, if this is one.
    pub fn as_message(&self) -> Option<&MessageError> {
        match self {
            WireError::Message(e) => Some(e),
            WireError::Io(_) => None,
        }
    }

    /// Returns the kind of the underlying I/O error, if this is one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            WireError::Io(e) => Some(e.kind()),
            WireError::Message(_) => None,
        }
    }
}

/// Result type for wire operations.
pub type Result<T> = std::result::Result<T, WireError>;

pub(crate) fn message_error<T>(func: &'static str, description: impl Into<String>) -> Result<T> {
    Err(MessageError::new(func, description).into())
}
