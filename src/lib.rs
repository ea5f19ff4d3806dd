//! # bmutil
//!
//! Bitmessage building blocks:
//!
//! - [`wire`]: the bit-exact codec for peer-to-peer messages, with the
//!   `addr` message and its 38-byte network address records.
//! - [`identity`]: private and public identities, each bound to two
//!   secp256k1 keys and a proof-of-work policy.
//! - [`address`], [`wif`] and [`pow`]: the encodings and policy the
//!   identities are built from.
//!
//! Everything here is synchronous and works over any
//! [`std::io::Read`] / [`std::io::Write`]; sockets, storage and peer
//! policy belong to the caller.

pub mod address;
pub mod identity;
pub mod pow;
pub mod wif;
pub mod wire;
