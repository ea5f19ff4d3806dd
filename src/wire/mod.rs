//! Bitmessage P2P wire protocol.
//!
//! This module provides the byte-level codec for Bitmessage messages
//! over any [`std::io::Read`] / [`std::io::Write`].
//!
//! It implements:
//! - Big-endian varints and fixed-width fields
//! - The 38-byte network address record
//! - The `addr` and `verack` messages
//! - The 24-byte frame header (magic, command, length, checksum)
//!
//! Errors come in two kinds, see [`WireError`]: protocol violations
//! ([`MessageError`]) and I/O failures passed through from the caller's
//! reader or writer.
//!
//! Protocol reference:
//! https://wiki.bitmessage.org/index.php/Protocol_specification
pub mod codec;
pub mod common;
pub mod constants;
pub mod error;
pub mod message;
pub mod msgaddr;
pub mod netaddress;

pub use codec::{read_message, write_message};
pub use common::{read_var_int, var_int_serialize_size, write_var_int};
pub use constants::{MAX_ADDR_PER_MSG, MAX_MESSAGE_PAYLOAD, NET_ADDRESS_SIZE};
pub use error::{MessageError, Result, WireError};
pub use message::{AnyMessage, Command, Message, MsgVerAck, RawMessage};
pub use msgaddr::MsgAddr;
pub use netaddress::{NetAddress, ServiceFlag};
