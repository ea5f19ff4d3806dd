//! Wallet import format for secp256k1 private keys.
//!
//! ```text
//! base58( 0x80 | scalar (32) | [0x01 if compressed] | checksum (4) )
//! ```
//!
//! The checksum is the first 4 bytes of SHA-256(SHA-256(prefix..)).

use k256::{FieldBytes, SecretKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Version byte of private keys in wallet import format.
pub const WIF_VERSION: u8 = 0x80;

const COMPRESS_MAGIC: u8 = 0x01;
const UNCOMPRESSED_LEN: usize = 1 + 32 + 4;
const COMPRESSED_LEN: usize = UNCOMPRESSED_LEN + 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WifError {
    #[error("invalid base58: {0}")]
    Base58(String),

    #[error("invalid WIF length {0}")]
    InvalidLength(usize),

    #[error("unexpected WIF version byte {0:#04x}")]
    InvalidVersion(u8),

    #[error("WIF checksum mismatch")]
    ChecksumMismatch,

    #[error("malformed compression flag {0:#04x}")]
    InvalidCompressionFlag(u8),

    #[error("scalar is not a valid secp256k1 private key")]
    InvalidKey,
}

pub type Result<T> = std::result::Result<T, WifError>;

/// A decoded private key together with its compression flag.
#[derive(Debug, Clone)]
pub struct Wif {
    pub key: SecretKey,
    pub compressed: bool,
}

/// Decodes a WIF string.
pub fn decode(wif: &str) -> Result<Wif> {
    let data = bs58::decode(wif)
        .into_vec()
        .map_err(|e| WifError::Base58(e.to_string()))?;

    let compressed = match data.len() {
        UNCOMPRESSED_LEN => false,
        COMPRESSED_LEN => true,
        len => return Err(WifError::InvalidLength(len)),
    };

    let (body, checksum) = data.split_at(data.len() - 4);
    if checksum != &double_sha256(body)[..4] {
        return Err(WifError::ChecksumMismatch);
    }

    if body[0] != WIF_VERSION {
        return Err(WifError::InvalidVersion(body[0]));
    }
    if compressed && body[33] != COMPRESS_MAGIC {
        return Err(WifError::InvalidCompressionFlag(body[33]));
    }

    let key = SecretKey::from_bytes(FieldBytes::from_slice(&body[1..33]))
        .map_err(|_| WifError::InvalidKey)?;

    Ok(Wif { key, compressed })
}

/// Encodes a private key in the uncompressed form Bitmessage uses.
pub fn encode(key: &SecretKey) -> String {
    let mut data: Vec<u8> = Vec::with_capacity(UNCOMPRESSED_LEN);
    data.push(WIF_VERSION);
    data.extend_from_slice(&key.to_bytes());

    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum[..4]);

    bs58::encode(data).into_string()
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}
