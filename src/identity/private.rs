use k256::{PublicKey, SecretKey};

use crate::address::{Address, AddressError};
use crate::identity::error::{IdentityError, Result};
use crate::identity::public::PublicId;
use crate::wif;

/// A Bitmessage identity with both private keys.
///
/// Immutable once built; [`PrivateId::to_public`] copies out the public view.
#[derive(Debug, Clone)]
pub struct PrivateId {
    signing_key: SecretKey,
    encryption_key: SecretKey,
    nonce_trials_per_byte: u64,
    extra_bytes: u64,
    address_version: u64,
    stream: u64,
}

impl PrivateId {
    /// Builds an identity from two private keys and its metadata.
    ///
    /// Refuses a zero address version or stream.
    pub fn new(
        signing_key: SecretKey,
        encryption_key: SecretKey,
        nonce_trials_per_byte: u64,
        extra_bytes: u64,
        address_version: u64,
        stream: u64,
    ) -> Result<Self> {
        if address_version == 0 {
            return Err(IdentityError::ZeroAddressVersion);
        }
        if stream == 0 {
            return Err(IdentityError::ZeroStream);
        }

        Ok(Self {
            signing_key,
            encryption_key,
            nonce_trials_per_byte,
            extra_bytes,
            address_version,
            stream,
        })
    }

    /// Imports an identity from its address and two WIF-encoded keys.
    ///
    /// Version and stream come from the address. The keys must hash to
    /// the address' ripe.
    pub fn import_wif(
        address: &str,
        signing_wif: &str,
        encryption_wif: &str,
        nonce_trials_per_byte: u64,
        extra_bytes: u64,
    ) -> Result<Self> {
        let addr = Address::decode(address)?;

        let signing_key = wif::decode(signing_wif)
            .map_err(IdentityError::SigningKey)?
            .key;
        let encryption_key = wif::decode(encryption_wif)
            .map_err(IdentityError::EncryptionKey)?
            .key;

        let id = Self::new(
            signing_key,
            encryption_key,
            nonce_trials_per_byte,
            extra_bytes,
            addr.version,
            addr.stream,
        )?;

        if id.to_public().hash() != addr.ripe {
            return Err(IdentityError::AddressMismatch);
        }

        Ok(id)
    }

    /// Exports `(address, signing WIF, encryption WIF)`.
    pub fn export_wif(&self) -> std::result::Result<(String, String, String), AddressError> {
        Ok((
            self.address().encode()?,
            wif::encode(&self.signing_key),
            wif::encode(&self.encryption_key),
        ))
    }

    /// Projects the public view: both public keys and the metadata.
    #[must_use]
    pub fn to_public(&self) -> PublicId {
        PublicId::new(
            self.signing_key.public_key(),
            self.encryption_key.public_key(),
            self.nonce_trials_per_byte,
            self.extra_bytes,
            self.address_version,
            self.stream,
        )
    }

    pub fn address(&self) -> Address {
        self.to_public().address()
    }

    pub fn signing_key(&self) -> &SecretKey {
        &self.signing_key
    }

    pub fn encryption_key(&self) -> &SecretKey {
        &self.encryption_key
    }

    pub fn signing_public_key(&self) -> PublicKey {
        self.signing_key.public_key()
    }

    pub fn encryption_public_key(&self) -> PublicKey {
        self.encryption_key.public_key()
    }

    pub fn nonce_trials_per_byte(&self) -> u64 {
        self.nonce_trials_per_byte
    }

    pub fn extra_bytes(&self) -> u64 {
        self.extra_bytes
    }

    pub fn address_version(&self) -> u64 {
        self.address_version
    }

    pub fn stream(&self) -> u64 {
        self.stream
    }
}
