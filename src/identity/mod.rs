//! Bitmessage identities.
//!
//! A participant owns two secp256k1 key pairs, one for signing and one
//! for encryption, plus a proof-of-work policy and the address metadata
//! (version, stream).
//!
//! - [`PrivateId`] holds the private keys.
//! - [`PublicId`] is the projection other nodes see.
//!
//! Projecting a private identity and building the public one directly
//! from the same parts give equal values.
//!
//! ## Example
//!
//! ```rust
//! use bmutil::identity::{PrivateId, PublicId};
//! use bmutil::pow::{DEFAULT_EXTRA_BYTES, DEFAULT_NONCE_TRIALS_PER_BYTE};
//!
//! let id = PrivateId::import_wif(
//!     "BM-2cXm1jokUVp9Nn1kBtkeMjpxaLJuP3FwET",
//!     "5K3oNuMzVEWdrtyBAZXrPQwQTSmCGrAZS1groRDQVGDeccLim15",
//!     "5HzhkuimkuizxJyw9b7qnFEMtUrAXD25Y5AV1sZ964dSSXReKnb",
//!     DEFAULT_NONCE_TRIALS_PER_BYTE,
//!     DEFAULT_EXTRA_BYTES,
//! )
//! .unwrap();
//!
//! let public = PublicId::new(
//!     id.signing_public_key(),
//!     id.encryption_public_key(),
//!     DEFAULT_NONCE_TRIALS_PER_BYTE,
//!     DEFAULT_EXTRA_BYTES,
//!     4,
//!     1,
//! );
//! assert_eq!(id.to_public(), public);
//! ```

mod error;
mod private;
mod public;

pub use error::{IdentityError, Result};
pub use private::PrivateId;
pub use public::PublicId;
