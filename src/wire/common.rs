//! Byte-level primitives shared by every message.
//!
//! Bitmessage is big-endian throughout, including the varint payloads:
//!
//! ```text
//! value < 0xFD          ->  1 byte
//! value <= 0xFFFF       ->  0xFD + u16 BE
//! value <= 0xFFFF_FFFF  ->  0xFE + u32 BE
//! otherwise             ->  0xFF + u64 BE
//! ```

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::wire::error::{message_error, Result};

/// Reads a varint, consuming exactly the bytes of its encoding.
///
/// Encodings that use a wider form than the value needs are refused, so
/// every value has a single valid byte pattern.
pub fn read_var_int<R: Read + ?Sized>(r: &mut R) -> Result<u64> {
    let discriminant = r.read_u8()?;

    let (value, min) = match discriminant {
        0xFF => (r.read_u64::<BigEndian>()?, 0x1_0000_0000),
        0xFE => (u64::from(r.read_u32::<BigEndian>()?), 0x1_0000),
        0xFD => (u64::from(r.read_u16::<BigEndian>()?), 0xFD),
        n => return Ok(u64::from(n)),
    };

    if value < min {
        return message_error(
            "read_var_int",
            format!(
                "non-canonical varint {value:#x} - discriminant {discriminant:#x} \
                 must encode a value at least {min:#x}"
            ),
        );
    }

    Ok(value)
}

/// Writes `value` using the shortest varint form.
pub fn write_var_int<W: Write + ?Sized>(w: &mut W, value: u64) -> Result<()> {
    match value {
        0..=0xFC => w.write_u8(value as u8)?,
        0xFD..=0xFFFF => {
            w.write_u8(0xFD)?;
            w.write_u16::<BigEndian>(value as u16)?;
        }
        0x1_0000..=0xFFFF_FFFF => {
            w.write_u8(0xFE)?;
            w.write_u32::<BigEndian>(value as u32)?;
        }
        _ => {
            w.write_u8(0xFF)?;
            w.write_u64::<BigEndian>(value)?;
        }
    }
    Ok(())
}

/// Number of bytes `value` occupies once varint-encoded.
pub const fn var_int_serialize_size(value: u64) -> usize {
    match value {
        0..=0xFC => 1,
        0xFD..=0xFFFF => 3,
        0x1_0000..=0xFFFF_FFFF => 5,
        _ => 9,
    }
}

/// Reads a fixed 16-byte IP field.
pub fn read_ip<R: Read + ?Sized>(r: &mut R) -> Result<[u8; 16]> {
    let mut ip = [0u8; 16];
    r.read_exact(&mut ip)?;
    Ok(ip)
}

/// Writes a fixed 16-byte IP field.
pub fn write_ip<W: Write + ?Sized>(w: &mut W, ip: &[u8; 16]) -> Result<()> {
    w.write_all(ip)?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, ErrorKind};

    fn encode(value: u64) -> Vec<u8> {
        let mut buf: Vec<u8> = vec![];
        write_var_int(&mut buf, value).unwrap();
        buf
    }

    #[test]
    fn var_int_boundaries_use_big_endian_payloads() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(0xFC), vec![0xFC]);
        assert_eq!(encode(0xFD), vec![0xFD, 0x00, 0xFD]);
        assert_eq!(encode(1001), vec![0xFD, 0x03, 0xE9]);
        assert_eq!(encode(0xFFFF), vec![0xFD, 0xFF, 0xFF]);
        assert_eq!(encode(0x1_0000), vec![0xFE, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(
            encode(0x1_0000_0000),
            vec![0xFF, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn var_int_size_matches_encoding() {
        for v in [0, 0xFC, 0xFD, 0xFFFF, 0x1_0000, 0xFFFF_FFFF, u64::MAX] {
            assert_eq!(var_int_serialize_size(v), encode(v).len(), "value {v:#x}");
        }
    }

    #[test]
    fn read_var_int_consumes_only_its_bytes() {
        let mut c = Cursor::new(vec![0xFD, 0x03, 0xE9, 0xAA]);
        assert_eq!(read_var_int(&mut c).unwrap(), 1001);
        assert_eq!(c.position(), 3);

        let mut c = Cursor::new(vec![0xFE, 0x12, 0x34, 0x56, 0x78]);
        assert_eq!(read_var_int(&mut c).unwrap(), 0x1234_5678);
    }

    #[test]
    fn read_var_int_rejects_non_canonical_forms() {
        let cases: [&[u8]; 3] = [
            &[0xFD, 0x00, 0xFC],
            &[0xFE, 0x00, 0x00, 0xFF, 0xFF],
            &[0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF],
        ];
        for bytes in cases {
            let err = read_var_int(&mut Cursor::new(bytes)).unwrap_err();
            assert!(err.as_message().is_some(), "{bytes:x?}: {err}");
        }
    }

    #[test]
    fn read_var_int_on_exhausted_reader_is_eof() {
        let err = read_var_int(&mut Cursor::new(Vec::<u8>::new())).unwrap_err();
        assert_eq!(err.io_kind(), Some(ErrorKind::UnexpectedEof));

        let err = read_var_int(&mut Cursor::new(vec![0xFD, 0x03])).unwrap_err();
        assert_eq!(err.io_kind(), Some(ErrorKind::UnexpectedEof));
    }

    #[test]
    fn ip_field_is_fixed_width() {
        let ip = [7u8; 16];
        let mut buf: Vec<u8> = vec![];
        write_ip(&mut buf, &ip).unwrap();
        assert_eq!(buf.len(), 16);
        assert_eq!(read_ip(&mut Cursor::new(buf)).unwrap(), ip);
    }
}
