//! Keyed MAC used to seal committed values.

use super::commitment::{Digest, SecretKey};
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Keyed hash with hiding and binding properties
pub trait KeyedHash {
    fn digest(&self, key: &SecretKey, message: &[u8]) -> Digest;
}

/// HMAC-SHA256
#[derive(Clone, Copy, Debug, Default)]
pub struct HmacSha256;

impl KeyedHash for HmacSha256 {
    fn digest(&self, key: &SecretKey, message: &[u8]) -> Digest {
        // HMAC takes keys of any length
        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(key.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(message);
        Digest::from_bytes(mac.finalize().into_bytes().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        let key = SecretKey::from_bytes([0x0b; 32]);
        assert_eq!(
            HmacSha256.digest(&key, b"3").to_string(),
            "4697A9E18ED78AB20CF1FE3A278AB0FF04BDBBE73FAA2F2B3FFAEB70532164FF"
        );
    }

    #[test]
    fn test_message_changes_digest() {
        let key = SecretKey::from_bytes([7; 32]);
        assert_ne!(HmacSha256.digest(&key, b"0"), HmacSha256.digest(&key, b"1"));
    }

    #[test]
    fn test_key_changes_digest() {
        let a = SecretKey::from_bytes([1; 32]);
        let b = SecretKey::from_bytes([2; 32]);
        assert_ne!(HmacSha256.digest(&a, b"4"), HmacSha256.digest(&b, b"4"));
    }
}
