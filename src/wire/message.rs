use std::fmt::{self, Display, Formatter};
use std::io::{Cursor, Read, Write};

use crate::wire::constants::{COMMAND_SIZE, MAX_MESSAGE_PAYLOAD};
use crate::wire::error::{message_error, MessageError, Result};
use crate::wire::msgaddr::MsgAddr;

/// A raw Bitmessage frame.
///
/// A frame consists of:
/// - 4-byte magic value (network identifier)
/// - 12-byte command
/// - 4-byte payload length
/// - 4-byte checksum
/// - variable-length payload (up to [`MAX_MESSAGE_PAYLOAD`])
///
/// `RawMessage` holds the header fields and the payload as read, after
/// the frame checks in [`read_message`](crate::wire::read_message) passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub command: Command,
    pub payload: Vec<u8>,
    pub magic: u32,
    pub checksum: [u8; 4],
}

/// Implemented by every message type of the protocol.
///
/// A message knows its command, the largest payload it may legally
/// produce, and how to move itself over a byte sink or source.
pub trait Message: Sized {
    /// Command this message is framed under.
    fn command(&self) -> Command;

    /// Upper bound on the encoded payload for the current protocol version.
    fn max_payload_length(&self) -> usize;

    /// Writes the payload. Protocol rules are checked before any byte is written.
    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()>;

    /// Reads a payload written by [`Message::encode`].
    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self>;
}

/// Bitmessage protocol commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Version,
    Verack,
    Addr,
    Inv,
    GetData,
    Object,

    Unknown,
}

impl From<&[u8; COMMAND_SIZE]> for Command {
    fn from(bytes: &[u8; COMMAND_SIZE]) -> Self {
        let cmd = std::str::from_utf8(bytes)
            .unwrap_or("")
            .trim_end_matches(char::from(0));

        match cmd {
            "version" => Command::Version,
            "verack" => Command::Verack,
            "addr" => Command::Addr,
            "inv" => Command::Inv,
            "getdata" => Command::GetData,
            "object" => Command::Object,
            _ => Command::Unknown,
        }
    }
}

impl Command {
    /// The ASCII command name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Version => "version",
            Command::Verack => "verack",
            Command::Addr => "addr",
            Command::Inv => "inv",
            Command::GetData => "getdata",
            Command::Object => "object",
            Command::Unknown => "",
        }
    }

    /// Returns the 12-byte command field of the frame header.
    ///
    /// The command string is ASCII and padded with zero bytes.
    pub fn as_bytes(&self) -> [u8; COMMAND_SIZE] {
        let name = self.as_str().as_bytes();

        let mut padded = [0u8; COMMAND_SIZE];
        padded[..name.len()].copy_from_slice(name);
        padded
    }

    /// Largest payload a frame carrying this command may declare.
    pub fn max_payload_length(&self) -> usize {
        match self {
            Command::Addr => MsgAddr::MAX_PAYLOAD_LENGTH,
            Command::Verack => 0,
            _ => MAX_MESSAGE_PAYLOAD,
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `verack` message. Acknowledges a `version`; carries no payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MsgVerAck;

impl Message for MsgVerAck {
    fn command(&self) -> Command {
        Command::Verack
    }

    fn max_payload_length(&self) -> usize {
        0
    }

    fn encode<W: Write + ?Sized>(&self, _w: &mut W) -> Result<()> {
        Ok(())
    }

    fn decode<R: Read + ?Sized>(_r: &mut R) -> Result<Self> {
        Ok(MsgVerAck)
    }
}

/// A frame whose payload has been decoded according to its command.
///
/// Commands without a typed message here keep their raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyMessage {
    Addr(MsgAddr),
    VerAck,

    Version(Vec<u8>),
    Inv(Vec<u8>),
    GetData(Vec<u8>),
    Object(Vec<u8>),
}

impl AnyMessage {
    pub fn command(&self) -> Command {
        match self {
            AnyMessage::Addr(_) => Command::Addr,
            AnyMessage::VerAck => Command::Verack,
            AnyMessage::Version(_) => Command::Version,
            AnyMessage::Inv(_) => Command::Inv,
            AnyMessage::GetData(_) => Command::GetData,
            AnyMessage::Object(_) => Command::Object,
        }
    }
}

impl TryFrom<RawMessage> for AnyMessage {
    type Error = crate::wire::WireError;

    fn try_from(raw: RawMessage) -> Result<Self> {
        match raw.command {
            Command::Addr => Ok(AnyMessage::Addr(MsgAddr::decode(&mut Cursor::new(
                raw.payload,
            ))?)),
            Command::Verack => Ok(AnyMessage::VerAck),

            Command::Version => Ok(AnyMessage::Version(raw.payload)),
            Command::Inv => Ok(AnyMessage::Inv(raw.payload)),
            Command::GetData => Ok(AnyMessage::GetData(raw.payload)),
            Command::Object => Ok(AnyMessage::Object(raw.payload)),

            Command::Unknown => message_error("AnyMessage::try_from", "unknown command"),
        }
    }
}

impl From<MsgAddr> for AnyMessage {
    fn from(msg: MsgAddr) -> Self {
        AnyMessage::Addr(msg)
    }
}

/// Builds the error returned for a payload above a message's limit.
pub(crate) fn payload_too_large(func: &'static str, len: usize, max: usize) -> MessageError {
    MessageError::new(
        func,
        format!("payload exceeds max length - indicates {len} bytes, but max is {max} bytes"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_bytes_are_nul_padded() {
        let bytes = Command::Addr.as_bytes();
        assert_eq!(&bytes[..4], b"addr");
        assert!(bytes[4..].iter().all(|&b| b == 0));
        assert_eq!(Command::from(&bytes), Command::Addr);
    }

    #[test]
    fn every_known_command_survives_the_header_field() {
        for cmd in [
            Command::Version,
            Command::Verack,
            Command::Addr,
            Command::Inv,
            Command::GetData,
            Command::Object,
        ] {
            assert_eq!(Command::from(&cmd.as_bytes()), cmd);
        }
    }

    #[test]
    fn unrecognised_command_maps_to_unknown() {
        let mut field = [0u8; COMMAND_SIZE];
        field[..6].copy_from_slice(b"pubkey");
        assert_eq!(Command::from(&field), Command::Unknown);
    }

    #[test]
    fn verack_is_empty() {
        let mut buf: Vec<u8> = vec![];
        MsgVerAck.encode(&mut buf).unwrap();
        assert!(buf.is_empty());
        assert_eq!(MsgVerAck.command().to_string(), "verack");
        assert_eq!(MsgVerAck.max_payload_length(), 0);
    }

    #[test]
    fn raw_without_typed_decoder_keeps_payload() {
        let raw = RawMessage {
            command: Command::Inv,
            payload: vec![0xAB, 0xCD],
            magic: crate::wire::constants::MAIN_NET_MAGIC,
            checksum: [0; 4],
        };
        assert_eq!(
            AnyMessage::try_from(raw).unwrap(),
            AnyMessage::Inv(vec![0xAB, 0xCD])
        );
    }

    #[test]
    fn raw_with_unknown_command_is_a_protocol_error() {
        let raw = RawMessage {
            command: Command::Unknown,
            payload: vec![],
            magic: crate::wire::constants::MAIN_NET_MAGIC,
            checksum: [0; 4],
        };
        let err = AnyMessage::try_from(raw).unwrap_err();
        assert!(err.as_message().is_some());
    }
}
