use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use sha2::{Digest, Sha512};
use tracing::trace;

use crate::wire::constants::{COMMAND_SIZE, MAIN_NET_MAGIC, MAX_MESSAGE_PAYLOAD, MESSAGE_HEADER_SIZE};
use crate::wire::error::{message_error, Result};
use crate::wire::message::{payload_too_large, Command, Message, RawMessage};

/// First 4 bytes of SHA-512 over the payload.
pub fn checksum(payload: &[u8]) -> [u8; 4] {
    let digest = Sha512::digest(payload);
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Reads one Bitmessage frame from any [`Read`] source.
///
/// This function:
/// 1. Reads the 24-byte header
/// 2. Checks the magic, the declared length and the command
/// 3. Reads the payload and verifies its checksum
///
/// The payload is always consumed once the length is accepted, so a
/// frame with an unknown command or a bad checksum leaves the stream
/// positioned at the next frame.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use bmutil::wire::{self, Command, MsgVerAck};
///
/// let mut bytes: Vec<u8> = Vec::new();
/// wire::write_message(&mut bytes, &MsgVerAck).unwrap();
///
/// let raw = wire::read_message(&mut Cursor::new(bytes)).unwrap();
/// assert_eq!(raw.command, Command::Verack);
/// assert!(raw.payload.is_empty());
/// ```
pub fn read_message<R: Read + ?Sized>(reader: &mut R) -> Result<RawMessage> {
    let magic = reader.read_u32::<BigEndian>()?;

    let mut cmd = [0u8; COMMAND_SIZE];
    reader.read_exact(&mut cmd)?;

    let length = reader.read_u32::<BigEndian>()? as usize;

    let mut checksum_field = [0u8; 4];
    reader.read_exact(&mut checksum_field)?;

    if magic != MAIN_NET_MAGIC {
        return message_error(
            "read_message",
            format!("message from other network [{magic:#010x}]"),
        );
    }

    if length > MAX_MESSAGE_PAYLOAD {
        return Err(payload_too_large("read_message", length, MAX_MESSAGE_PAYLOAD).into());
    }

    let command = Command::from(&cmd);
    let max = command.max_payload_length();
    if length > max {
        return Err(payload_too_large("read_message", length, max).into());
    }

    let mut payload = vec![0u8; length];
    reader.read_exact(&mut payload)?;

    if command == Command::Unknown {
        let name = String::from_utf8_lossy(&cmd);
        return message_error(
            "read_message",
            format!("unhandled command [{}]", name.trim_end_matches('\0')),
        );
    }

    let sum = checksum(&payload);
    if sum != checksum_field {
        return message_error(
            "read_message",
            format!(
                "payload checksum failed - header indicates {}, but actual checksum is {}",
                hex::encode(checksum_field),
                hex::encode(sum)
            ),
        );
    }

    trace!(%command, length, "read frame");

    Ok(RawMessage {
        command,
        payload,
        magic,
        checksum: checksum_field,
    })
}

/// Writes a complete Bitmessage frame for `msg`.
///
/// ```text
/// +------------+--------------+---------------+------------+
/// | magic (4)  | command (12) | length (4 BE) | checksum(4)|
/// +------------+--------------+---------------+------------+
/// | payload (variable)                                ...  |
/// +----------------------------------------------------------
/// ```
///
/// The payload is encoded into a buffer first, so nothing reaches the
/// writer when the message refuses to encode or is too large.
pub fn write_message<W: Write + ?Sized, M: Message>(writer: &mut W, msg: &M) -> Result<()> {
    let mut payload: Vec<u8> = Vec::new();
    msg.encode(&mut payload)?;

    let max = msg.max_payload_length().min(MAX_MESSAGE_PAYLOAD);
    if payload.len() > max {
        return Err(payload_too_large("write_message", payload.len(), max).into());
    }

    let command = msg.command();

    let mut header: Vec<u8> = Vec::with_capacity(MESSAGE_HEADER_SIZE);
    header.write_u32::<BigEndian>(MAIN_NET_MAGIC)?;
    header.extend_from_slice(&command.as_bytes());
    header.write_u32::<BigEndian>(payload.len() as u32)?;
    header.extend_from_slice(&checksum(&payload));

    writer.write_all(&header)?;
    writer.write_all(&payload)?;

    trace!(%command, length = payload.len(), "wrote frame");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::message::{AnyMessage, MsgVerAck};
    use crate::wire::msgaddr::MsgAddr;
    use crate::wire::netaddress::{NetAddress, ServiceFlag};
    use std::io::{Cursor, ErrorKind};

    /// Builds a full frame (header + payload) by hand.
    fn build_frame(cmd_str: &[u8], payload: &[u8]) -> Vec<u8> {
        let mut bytes = vec![];

        bytes.extend_from_slice(&MAIN_NET_MAGIC.to_be_bytes());

        let mut cmd = [0u8; 12];
        cmd[..cmd_str.len()].copy_from_slice(cmd_str);
        bytes.extend_from_slice(&cmd);

        bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&checksum(payload));
        bytes.extend_from_slice(payload);

        bytes
    }

    fn sample_addr() -> MsgAddr {
        let mut msg = MsgAddr::new();
        msg.add_address(NetAddress::new_with_timestamp(
            "127.0.0.1:8444".parse().unwrap(),
            0x495fab29,
            1,
            ServiceFlag::SF_NODE_NETWORK,
        ))
        .unwrap();
        msg
    }

    #[test]
    fn header_layout_matches_wire_format() {
        let mut buf: Vec<u8> = vec![];
        write_message(&mut buf, &MsgVerAck).unwrap();

        assert_eq!(buf.len(), MESSAGE_HEADER_SIZE);
        assert_eq!(&buf[0..4], &[0xE9, 0xBE, 0xB4, 0xD9]);
        assert_eq!(&buf[4..10], b"verack");
        assert_eq!(&buf[16..20], &[0, 0, 0, 0]);
        // SHA-512 of the empty string starts with cf83e135.
        assert_eq!(&buf[20..24], &[0xcf, 0x83, 0xe1, 0x35]);
    }

    #[test]
    fn addr_frame_round_trip() {
        let msg = sample_addr();

        let mut buf: Vec<u8> = vec![];
        write_message(&mut buf, &msg).unwrap();
        assert_eq!(buf.len(), MESSAGE_HEADER_SIZE + 1 + 38);

        let raw = read_message(&mut Cursor::new(buf)).unwrap();
        assert_eq!(raw.command, Command::Addr);
        assert_eq!(AnyMessage::try_from(raw).unwrap(), AnyMessage::Addr(msg));
    }

    #[test]
    fn read_message_rejects_other_network() {
        let mut frame = build_frame(b"verack", &[]);
        frame[0] = 0x00;

        let err = read_message(&mut Cursor::new(frame)).unwrap_err();
        assert!(err.as_message().is_some(), "{err}");
    }

    #[test]
    fn read_message_rejects_bad_checksum() {
        let mut frame = build_frame(b"inv", &[1, 2, 3]);
        frame[20] ^= 0xFF;

        let err = read_message(&mut Cursor::new(frame)).unwrap_err();
        assert!(err.as_message().is_some(), "{err}");
    }

    #[test]
    fn read_message_rejects_oversized_addr_before_reading_payload() {
        let mut frame = build_frame(b"addr", &[]);
        frame[16..20].copy_from_slice(&(MsgAddr::MAX_PAYLOAD_LENGTH as u32 + 1).to_be_bytes());

        let err = read_message(&mut Cursor::new(frame)).unwrap_err();
        assert!(err.as_message().is_some(), "{err}");
    }

    #[test]
    fn read_message_rejects_object_above_max_message_payload() {
        let mut frame = build_frame(b"object", &[]);
        frame[16..20].copy_from_slice(&(MAX_MESSAGE_PAYLOAD as u32 + 1).to_be_bytes());

        let err = read_message(&mut Cursor::new(frame)).unwrap_err();
        let msg = err.as_message().expect("protocol error");
        assert!(msg.description.contains("max"), "{msg}");
    }

    #[test]
    fn read_message_consumes_unknown_command() {
        let mut bytes = build_frame(b"pubkey", &[9, 9]);
        bytes.extend(build_frame(b"verack", &[]));
        let mut cursor = Cursor::new(bytes);

        let err = read_message(&mut cursor).unwrap_err();
        assert!(err.to_string().contains("pubkey"), "{err}");

        let raw = read_message(&mut cursor).unwrap();
        assert_eq!(raw.command, Command::Verack);
    }

    #[test]
    fn read_message_truncated_header_is_eof() {
        let frame = build_frame(b"verack", &[]);
        let err = read_message(&mut Cursor::new(&frame[..10])).unwrap_err();
        assert_eq!(err.io_kind(), Some(ErrorKind::UnexpectedEof));
    }

    #[test]
    fn write_message_emits_nothing_for_oversized_addr() {
        let mut msg = sample_addr();
        let addr = msg.addr_list[0];
        msg.addr_list = vec![addr; 1001];

        let mut buf: Vec<u8> = vec![];
        let err = write_message(&mut buf, &msg).unwrap_err();
        assert!(err.as_message().is_some());
        assert!(buf.is_empty());
    }
}
