//! Cryptographic primitives for the duel.
//!
//! This module provides:
//! - SecretKey, Digest and Commitment for the commit-reveal scheme
//! - KeyedHash and its HMAC-SHA256 implementation
//! - Entropy, the secure random source for commitment material

mod commitment;
mod entropy;
mod mac;

pub use commitment::{encode_value, Commitment, Digest, Opening, SecretKey};
pub use entropy::{Entropy, EntropyError, OsEntropy};
pub use mac::{HmacSha256, KeyedHash};
