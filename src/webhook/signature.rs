//! Signature encoding and comparison
//!
//! The provider signs every webhook delivery with
//! `base64(lowercase_hex(HMAC-SHA1(canonical_string, secret)))`. The base64
//! step runs over the hex string, not the raw digest; both stages are part
//! of the compatibility contract and must not be collapsed.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Computes and compares provider-compatible signatures
#[derive(Clone)]
pub struct SignatureCodec {
    secret: SecretString,
}

impl SignatureCodec {
    /// Create a codec with the given shared secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into().into()),
        }
    }

    /// Encode a signature over `data`
    ///
    /// Deterministic and side-effect free; the same input always produces
    /// the same signature.
    pub fn encode(&self, data: &str) -> String {
        let mut mac = HmacSha1::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC can take any size key");
        mac.update(data.as_bytes());
        let digest = hex::encode(mac.finalize().into_bytes());
        STANDARD.encode(digest)
    }

    /// Check a presented signature against the one computed over `data`
    pub fn matches(&self, data: &str, signature: &str) -> bool {
        constant_time_compare(&self.encode(data), signature)
    }
}

impl std::fmt::Debug for SignatureCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureCodec")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
