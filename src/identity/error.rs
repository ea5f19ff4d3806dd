//! Error types for identity operations.

use thiserror::Error;

use crate::address::AddressError;
use crate::wif::WifError;

/// Errors that can occur while importing or exporting an identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The Bitmessage address failed to decode.
    #[error("address decode failed: {0}")]
    Address(#[from] AddressError),

    /// The signing key failed to decode.
    #[error("signing key decode failed: {0}")]
    SigningKey(WifError),

    /// The encryption key failed to decode.
    #[error("encryption key decode failed: {0}")]
    EncryptionKey(WifError),

    /// Address version must be non-zero.
    #[error("address version must not be zero")]
    ZeroAddressVersion,

    /// Stream number must be non-zero.
    #[error("stream number must not be zero")]
    ZeroStream,

    /// The keys hash to a different ripe than the address carries.
    #[error("address does not correspond to private keys")]
    AddressMismatch,
}

/// A specialized Result type for identity operations.
pub type Result<T> = std::result::Result<T, IdentityError>;
