//! Webhook signature check: base64(HMAC-SHA256(channel secret, raw body)).

use base64::Engine;
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header LINE puts the body signature in.
pub const SIGNATURE_HEADER: &str = "X-Line-Signature";

/// Decides whether an inbound body really came from the platform.
pub trait Verifier: Send + Sync {
    fn validate(&self, body: &[u8], signature: &str) -> bool;
}

/// Verifier backed by the channel secret.
#[derive(Clone)]
pub struct HmacVerifier {
    secret: String,
}

impl HmacVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Verifier for HmacVerifier {
    /// Decodes the signature and compares it to the HMAC of the body in constant time.
    /// An empty or undecodable signature never validates.
    fn validate(&self, body: &[u8], signature: &str) -> bool {
        let signature = signature.trim();
        if signature.is_empty() {
            return false;
        }
        let Ok(expected) = base64::engine::general_purpose::STANDARD.decode(signature) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(self.secret.as_bytes()) else {
            return false;
        };
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }
}

/// Compute the signature LINE would send for `body`. Used by tests and local tooling.
pub fn sign(secret: &str, body: &[u8]) -> Result<String, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;
    mac.update(body);
    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}
