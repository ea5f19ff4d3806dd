use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;

use crate::address::{calc_ripe, Address, AddressError};
use crate::pow::Policy;

/// The public half of a Bitmessage identity.
///
/// Holds what other nodes need to send to this participant: the two
/// public keys, the proof-of-work policy and the address metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicId {
    signing_key: PublicKey,
    encryption_key: PublicKey,
    nonce_trials_per_byte: u64,
    extra_bytes: u64,
    address_version: u64,
    stream: u64,
}

impl PublicId {
    /// Builds a public identity from its parts.
    #[must_use]
    pub fn new(
        signing_key: PublicKey,
        encryption_key: PublicKey,
        nonce_trials_per_byte: u64,
        extra_bytes: u64,
        address_version: u64,
        stream: u64,
    ) -> Self {
        Self {
            signing_key,
            encryption_key,
            nonce_trials_per_byte,
            extra_bytes,
            address_version,
            stream,
        }
    }

    pub fn signing_key(&self) -> &PublicKey {
        &self.signing_key
    }

    pub fn encryption_key(&self) -> &PublicKey {
        &self.encryption_key
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

    pub fn pow_policy(&self) -> Policy {
        Policy::new(self.nonce_trials_per_byte, self.extra_bytes)
    }

    /// RIPEMD-160(SHA-512(signing || encryption)) of the uncompressed keys.
    pub fn hash(&self) -> [u8; 20] {
        calc_ripe(&self.signing_key, &self.encryption_key)
    }

    /// The address these keys and metadata hash to.
    pub fn address(&self) -> Address {
        Address::new(self.address_version, self.stream, self.hash())
    }

    /// The address rendered as `BM-…`.
    pub fn address_string(&self) -> Result<String, AddressError> {
        self.address().encode()
    }

    /// 65-byte `04 || X || Y` encoding of the signing key.
    pub fn signing_key_bytes(&self) -> Vec<u8> {
        self.signing_key.to_encoded_point(false).as_bytes().to_vec()
    }

    /// 65-byte `04 || X || Y` encoding of the encryption key.
    pub fn encryption_key_bytes(&self) -> Vec<u8> {
        self.encryption_key.to_encoded_point(false).as_bytes().to_vec()
    }
}
