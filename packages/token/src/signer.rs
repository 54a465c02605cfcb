//! HMAC-SHA256 (HS256) signing and verification

use crate::key::SecretKey;
use hmac::digest::{Key, KeyInit};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of an HS256 tag
pub const MAC_LEN: usize = 32;

/// Keyed MAC over the encoded `header.claims` signing input
///
/// The keyed HMAC state is prepared once and cloned for every call.
#[derive(Clone)]
pub struct Hs256Signer {
    keyed: HmacSha256,
    key_len: usize,
}

impl Hs256Signer {
    /// Create a signer for the given secret
    #[must_use]
    pub fn new(key: &SecretKey) -> Self {
        let bytes = key.as_bytes();

        // Keys longer than the block are hashed first; shorter ones are
        // zero-padded to a full block.
        let mut block = Key::<HmacSha256>::default();
        if bytes.len() > block.len() {
            let digest = Sha256::digest(bytes);
            block[..digest.len()].copy_from_slice(&digest);
        } else {
            block[..bytes.len()].copy_from_slice(bytes);
        }

        let keyed = <HmacSha256 as KeyInit>::new(&block);
        block.as_mut_slice().zeroize();

        Self {
            keyed,
            key_len: key.len(),
        }
    }

    /// Compute the tag for `message`
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> [u8; MAC_LEN] {
        let mut mac = self.keyed.clone();
        mac.update(message);
        let mut tag = [0u8; MAC_LEN];
        tag.copy_from_slice(&mac.finalize().into_bytes());
        tag
    }

    /// Recompute the tag for `message` and compare it with `tag` in constant time
    #[must_use]
    pub fn verify(&self, message: &[u8], tag: &[u8]) -> bool {
        let expected = self.sign(message);
        expected[..].ct_eq(tag).into()
    }

    /// Header `alg` value
    #[inline]
    #[must_use]
    pub const fn alg(&self) -> &'static str {
        "HS256"
    }
}

impl fmt::Debug for Hs256Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hs256Signer")
            .field("alg", &self.alg())
            .field("key_len", &self.key_len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn signer(byte: u8) -> Hs256Signer {
        Hs256Signer::new(&SecretKey::new(vec![byte; 32]).unwrap())
    }

    #[test]
    fn rfc4231_large_key() {
        // RFC 4231 test case 6
        let key = SecretKey::new(vec![0xaa; 131]).unwrap();
        let tag = Hs256Signer::new(&key)
            .sign(b"Test Using Larger Than Block-Size Key - Hash Key First");
        assert_eq!(
            tag,
            hex!("60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54")
        );
    }

    #[test]
    fn block_sized_key_matches_reference() {
        let key = SecretKey::new(vec![0x0b; 32]).unwrap();
        let tag = Hs256Signer::new(&key).sign(b"header.claims");
        assert_eq!(
            tag,
            hex!("93ebb54d6fcff55cdf9de769fc8f98ffe22def22b5455b0a16a2cc58b8de45f5")
        );
    }

    #[test]
    fn deterministic() {
        let s = signer(1);
        assert_eq!(s.sign(b"header.claims"), s.sign(b"header.claims"));
    }

    #[test]
    fn verify_accepts_own_tag() {
        let s = signer(1);
        let tag = s.sign(b"header.claims");
        assert!(s.verify(b"header.claims", &tag));
    }

    #[test]
    fn verify_rejects_other_message() {
        let s = signer(1);
        let tag = s.sign(b"header.claims");
        assert!(!s.verify(b"header.claimz", &tag));
    }

    #[test]
    fn verify_rejects_other_key() {
        let tag = signer(1).sign(b"header.claims");
        assert!(!signer(2).verify(b"header.claims", &tag));
    }

    #[test]
    fn verify_rejects_truncated_tag() {
        let s = signer(1);
        let tag = s.sign(b"header.claims");
        assert!(!s.verify(b"header.claims", &tag[..MAC_LEN - 1]));
        assert!(!s.verify(b"header.claims", &[]));
    }
}
