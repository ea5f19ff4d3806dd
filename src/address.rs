//! Bitmessage addresses (`BM-…`).
//!
//! An address is the base58 encoding of
//!
//! ```text
//! varint version | varint stream | ripe (leading zeros stripped) | checksum (4)
//! ```
//!
//! where the checksum is the first 4 bytes of SHA-512(SHA-512(body)) and
//! the ripe is RIPEMD-160(SHA-512(signing key || encryption key)) over
//! the uncompressed public keys.

use std::fmt::{self, Display, Formatter};
use std::io::Cursor;
use std::str::FromStr;

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use ripemd::Ripemd160;
use sha2::{Digest, Sha512};
use thiserror::Error;

use crate::wire::{read_var_int, write_var_int};

/// Prefix every human-readable address carries.
pub const ADDRESS_PREFIX: &str = "BM-";

/// Errors raised while decoding or encoding an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid base58: {0}")]
    Base58(String),

    #[error("address too short: {0} bytes")]
    TooShort(usize),

    #[error("address checksum mismatch")]
    ChecksumMismatch,

    #[error("malformed address: {0}")]
    Malformed(String),

    #[error("unsupported address version {0}")]
    UnsupportedVersion(u64),

    #[error("invalid ripe length {len} for address version {version}")]
    InvalidRipeLength { version: u64, len: usize },

    #[error("version 4 ripe must not start with a zero byte")]
    ZeroRipePrefix,

    #[error("stream number must not be zero")]
    ZeroStream,
}

/// Result type for address operations.
pub type Result<T> = std::result::Result<T, AddressError>;

/// A decoded Bitmessage address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    pub version: u64,
    pub stream: u64,
    pub ripe: [u8; 20],
}

impl Address {
    pub fn new(version: u64, stream: u64, ripe: [u8; 20]) -> Self {
        Self {
            version,
            stream,
            ripe,
        }
    }

    /// Parses an address, with or without the `BM-` prefix.
    pub fn decode(address: &str) -> Result<Self> {
        let encoded = address.strip_prefix(ADDRESS_PREFIX).unwrap_or(address);
        let data = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| AddressError::Base58(e.to_string()))?;

        // Two single-byte varints, a 4-byte ripe and the checksum.
        if data.len() < 10 {
            return Err(AddressError::TooShort(data.len()));
        }

        let (body, checksum) = data.split_at(data.len() - 4);
        if checksum != &double_sha512(body)[..4] {
            return Err(AddressError::ChecksumMismatch);
        }

        let mut r = Cursor::new(body);
        let version = read_var_int(&mut r).map_err(|e| AddressError::Malformed(e.to_string()))?;
        let stream = read_var_int(&mut r).map_err(|e| AddressError::Malformed(e.to_string()))?;
        let ripe = &body[r.position() as usize..];

        match version {
            2 | 3 => {
                if !(18..=20).contains(&ripe.len()) {
                    return Err(AddressError::InvalidRipeLength {
                        version,
                        len: ripe.len(),
                    });
                }
            }
            4 => {
                if ripe.first() == Some(&0) {
                    return Err(AddressError::ZeroRipePrefix);
                }
                if !(4..=20).contains(&ripe.len()) {
                    return Err(AddressError::InvalidRipeLength {
                        version,
                        len: ripe.len(),
                    });
                }
            }
            v => return Err(AddressError::UnsupportedVersion(v)),
        }

        if stream == 0 {
            return Err(AddressError::ZeroStream);
        }

        let mut padded = [0u8; 20];
        padded[20 - ripe.len()..].copy_from_slice(ripe);

        Ok(Self {
            version,
            stream,
            ripe: padded,
        })
    }

    /// Renders the address as `BM-…`.
    pub fn encode(&self) -> Result<String> {
        let ripe: &[u8] = match self.version {
            // At most two leading zero bytes are dropped.
            2 | 3 => match self.ripe {
                [0, 0, ..] => &self.ripe[2..],
                [0, ..] => &self.ripe[1..],
                _ => &self.ripe[..],
            },
            4 => {
                let start = self
                    .ripe
                    .iter()
                    .position(|&b| b != 0)
                    .unwrap_or(self.ripe.len());
                &self.ripe[start..]
            }
            v => return Err(AddressError::UnsupportedVersion(v)),
        };

        let mut body: Vec<u8> = Vec::with_capacity(2 + ripe.len() + 4);
        write_var_int(&mut body, self.version).map_err(|e| AddressError::Malformed(e.to_string()))?;
        write_var_int(&mut body, self.stream).map_err(|e| AddressError::Malformed(e.to_string()))?;
        body.extend_from_slice(ripe);

        let checksum = double_sha512(&body);
        body.extend_from_slice(&checksum[..4]);

        Ok(format!("{ADDRESS_PREFIX}{}", bs58::encode(body).into_string()))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self> {
        Address::decode(s)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.encode() {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(
                f,
                "Address(v{}, stream {}, ripe {})",
                self.version,
                self.stream,
                hex::encode(self.ripe)
            ),
        }
    }
}

/// RIPEMD-160(SHA-512(signing || encryption)) over uncompressed keys.
pub fn calc_ripe(signing_key: &PublicKey, encryption_key: &PublicKey) -> [u8; 20] {
    let mut sha = Sha512::new();
    sha.update(signing_key.to_encoded_point(false).as_bytes());
    sha.update(encryption_key.to_encoded_point(false).as_bytes());

    let digest = Ripemd160::digest(sha.finalize());
    let mut ripe = [0u8; 20];
    ripe.copy_from_slice(&digest);
    ripe
}

pub(crate) fn double_sha512(data: &[u8]) -> [u8; 64] {
    let digest = Sha512::digest(Sha512::digest(data));
    let mut out = [0u8; 64];
    out.copy_from_slice(&digest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const V4_ADDRESS: &str = "BM-2cXm1jokUVp9Nn1kBtkeMjpxaLJuP3FwET";

    #[test]
    fn decodes_version_4_address() {
        let addr = Address::decode(V4_ADDRESS).unwrap();
        assert_eq!(addr.version, 4);
        assert_eq!(addr.stream, 1);
        assert_ne!(addr.ripe, [0u8; 20]);
        assert_eq!(addr.encode().unwrap(), V4_ADDRESS);
    }

    #[test]
    fn prefix_is_optional() {
        let with = Address::decode(V4_ADDRESS).unwrap();
        let without: Address = V4_ADDRESS[3..].parse().unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn corrupted_address_fails_checksum() {
        // Swap one base58 digit for another.
        let mut corrupted = V4_ADDRESS.to_string();
        let last = corrupted.pop().unwrap();
        corrupted.push(if last == 'T' { 'U' } else { 'T' });
        assert_eq!(
            Address::decode(&corrupted),
            Err(AddressError::ChecksumMismatch)
        );
    }

    #[test]
    fn invalid_base58_is_reported() {
        assert!(matches!(
            Address::decode("BM-0OIl"),
            Err(AddressError::Base58(_))
        ));
    }

    #[test]
    fn short_input_is_rejected() {
        assert!(matches!(
            Address::decode("BM-2c"),
            Err(AddressError::TooShort(_))
        ));
    }

    #[test]
    fn version_3_keeps_up_to_two_leading_zero_bytes_implicit() {
        let mut ripe = [0xAB; 20];
        ripe[0] = 0;
        ripe[1] = 0;
        let addr = Address::new(3, 1, ripe);
        let decoded = Address::decode(&addr.encode().unwrap()).unwrap();
        assert_eq!(decoded, addr);
    }

    #[test]
    fn version_4_strips_every_leading_zero() {
        let mut ripe = [0x11; 20];
        ripe[..5].fill(0);
        let addr = Address::new(4, 2, ripe);
        let encoded = addr.encode().unwrap();
        assert!(encoded.starts_with(ADDRESS_PREFIX));
        assert_eq!(Address::decode(&encoded).unwrap(), addr);
    }

    #[test]
    fn version_4_shortest_ripe_round_trips() {
        let mut ripe = [0u8; 20];
        ripe[16..].copy_from_slice(&[1, 2, 3, 4]);
        let addr = Address::new(4, 1, ripe);
        let encoded = addr.encode().unwrap();
        assert_eq!(Address::decode(&encoded).unwrap(), addr);
    }

    #[test]
    fn unsupported_version_does_not_encode() {
        let addr = Address::new(1, 1, [1; 20]);
        assert_eq!(addr.encode(), Err(AddressError::UnsupportedVersion(1)));
        assert!(addr.to_string().starts_with("Address(v1"));
    }

    #[test]
    fn zero_stream_is_rejected() {
        let addr = Address::new(4, 0, [0x22; 20]);
        let encoded = addr.encode().unwrap();
        assert_eq!(Address::decode(&encoded), Err(AddressError::ZeroStream));
    }
}
