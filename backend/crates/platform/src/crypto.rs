//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256, Sha512};

type HmacSha256 = Hmac<Sha256>;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Lowercase hex SHA-512 digest
pub fn sha512_hex(data: &[u8]) -> String {
    let digest = Sha512::digest(data);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Sign a payload: `payload.base64url(hmac_sha256(payload))`
///
/// The payload must not contain `.`.
pub fn sign_value(secret: &[u8], payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!(
        "{}.{}",
        payload,
        general_purpose::URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Verify a value produced by [`sign_value`] and return its payload
pub fn verify_value<'a>(secret: &[u8], signed: &'a str) -> Option<&'a str> {
    let (payload, signature_b64) = signed.rsplit_once('.')?;
    let signature = general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .ok()?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(payload)
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha512_known_values() {
        assert_eq!(
            sha512_hex(b"abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
        assert_eq!(
            sha512_hex(b"hello"),
            "9b71d224bd62f3785d96d46ad3ea3d73319bfbc2890caadae2dff72519673ca7\
             2323c3d99ba5c11d7c7acc6e14b8c5da0c4663475c2e5c3adef46f73bcdec043"
        );
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_sign_and_verify_value() {
        let secret = [7u8; 32];
        let signed = sign_value(&secret, "12:1700000000000");
        assert_eq!(verify_value(&secret, &signed), Some("12:1700000000000"));
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let secret = [7u8; 32];
        let signed = sign_value(&secret, "12:1700000000000");
        let tampered = signed.replacen("12:", "13:", 1);

        assert_eq!(verify_value(&secret, &tampered), None);
        assert_eq!(verify_value(&[8u8; 32], &signed), None);
        assert_eq!(verify_value(&secret, "no-signature"), None);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abcd", b"abcd"));
        assert!(!constant_time_eq(b"abcd", b"abce"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
