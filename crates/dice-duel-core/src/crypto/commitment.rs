//! Secret keys, digests and the commitment to a value in `[0, m)`.

use super::mac::KeyedHash;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One-time key sealing a committed value
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; 32]);

impl SecretKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(..)")
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

/// MAC of a committed value under its secret key; safe to publish
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", hex::encode_upper(&self.0[..8]))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

/// Bytes fed to the MAC for a committed value
pub fn encode_value(value: u32) -> Vec<u8> {
    value.to_string().into_bytes()
}

/// A sealed value. Only the digest may leave before [`Commitment::reveal`].
pub struct Commitment {
    bound: u32,
    value: u32,
    key: SecretKey,
    digest: Digest,
}

impl Commitment {
    /// Seal `value` under `key`
    pub fn seal<K: KeyedHash + ?Sized>(bound: u32, value: u32, key: SecretKey, mac: &K) -> Self {
        let digest = mac.digest(&key, &encode_value(value));
        Self {
            bound,
            value,
            key,
            digest,
        }
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Disclose value and key. Consumes the commitment, so it can be
    /// opened once and never reused.
    pub fn reveal(self) -> Opening {
        Opening {
            value: self.value,
            key: self.key,
        }
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commitment")
            .field("bound", &self.bound)
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

/// A revealed commitment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opening {
    pub value: u32,
    pub key: SecretKey,
}

impl Opening {
    /// Check that this opening produces `digest`
    pub fn verify<K: KeyedHash + ?Sized>(&self, digest: &Digest, mac: &K) -> bool {
        mac.digest(&self.key, &encode_value(self.value)) == *digest
    }
}

mod hex_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode_upper(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let hex_str = String::deserialize(d)?;
        let bytes = hex::decode(&hex_str).map_err(serde::de::Error::custom)?;
        if bytes.len() != 32 {
            return Err(serde::de::Error::custom("expected 32 bytes"));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(arr)
    }
}

impl Serialize for SecretKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        hex_serde::serialize(&self.0, s)
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        hex_serde::deserialize(d).map(Self)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        hex_serde::serialize(&self.0, s)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        hex_serde::deserialize(d).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::HmacSha256;

    #[test]
    fn test_commitment_verification() {
        let key = SecretKey::from_bytes([9; 32]);
        let commitment = Commitment::seal(6, 4, key, &HmacSha256);
        let digest = *commitment.digest();
        let opening = commitment.reveal();

        assert_eq!(opening.value, 4);
        assert!(opening.verify(&digest, &HmacSha256));
    }

    #[test]
    fn test_different_values_different_digests() {
        let key = SecretKey::from_bytes([3; 32]);
        let c1 = Commitment::seal(6, 1, key.clone(), &HmacSha256);
        let c2 = Commitment::seal(6, 2, key, &HmacSha256);

        assert_ne!(c1.digest(), c2.digest());
    }

    #[test]
    fn test_altered_value_fails_verification() {
        let commitment = Commitment::seal(6, 5, SecretKey::from_bytes([1; 32]), &HmacSha256);
        let digest = *commitment.digest();
        let mut opening = commitment.reveal();
        opening.value = 0;

        assert!(!opening.verify(&digest, &HmacSha256));
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let commitment = Commitment::seal(2, 1, SecretKey::from_bytes([1; 32]), &HmacSha256);
        let digest = *commitment.digest();
        let mut opening = commitment.reveal();
        opening.key = SecretKey::from_bytes([2; 32]);

        assert!(!opening.verify(&digest, &HmacSha256));
    }

    #[test]
    fn test_digest_matches_reference_hmac() {
        let commitment = Commitment::seal(6, 1, SecretKey::from_bytes([1; 32]), &HmacSha256);
        assert_eq!(
            commitment.digest().to_string(),
            "510C690AA87A900FEE5F4F2B0515495997BA303BBB6D48012430ACE006115C7E"
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let commitment = Commitment::seal(6, 3, SecretKey::from_bytes([0xaa; 32]), &HmacSha256);
        let debug = format!("{:?}", commitment);
        assert!(!debug.contains("AAAA"));
        assert!(!debug.contains("value"));
        assert_eq!(format!("{:?}", SecretKey::from_bytes([0xaa; 32])), "SecretKey(..)");
    }

    #[test]
    fn test_hex_serialization() {
        let key = SecretKey::from_bytes([0xab; 32]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", "AB".repeat(32)));
        let back: SecretKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
