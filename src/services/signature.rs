// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Webhook signature verification.
//!
//! The platform signs every webhook body with HMAC-SHA256 keyed by the channel
//! secret and sends the base64 digest in the `X-Line-Signature` header.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Header carrying the body signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

type HmacSha256 = Hmac<Sha256>;

/// Verifies webhook bodies against a channel secret.
#[derive(Clone)]
pub struct SignatureVerifier {
    channel_secret: String,
}

impl SignatureVerifier {
    pub fn new(channel_secret: impl Into<String>) -> Self {
        Self {
            channel_secret: channel_secret.into(),
        }
    }

    /// Compute the base64 signature for a body.
    pub fn sign(&self, body: &[u8]) -> String {
        STANDARD.encode(self.mac(body).finalize().into_bytes())
    }

    /// Check `signature` against the body. Comparison is constant-time.
    pub fn verify(&self, body: &[u8], signature: &str) -> bool {
        let Ok(expected) = STANDARD.decode(signature.trim()) else {
            return false;
        };
        self.mac(body).verify_slice(&expected).is_ok()
    }

    fn mac(&self, body: &[u8]) -> HmacSha256 {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(self.channel_secret.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        mac.update(body);
        mac
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("channel_secret", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"destination":"U0000","events":[]}"#;

    #[test]
    fn test_sign_then_verify() {
        let verifier = SignatureVerifier::new("channel-secret");
        let signature = verifier.sign(BODY);
        assert!(verifier.verify(BODY, &signature));
    }

    #[test]
    fn test_known_vector() {
        // RFC 4231 test case 2: key "Jefe", data "what do ya want for nothing?"
        let verifier = SignatureVerifier::new("Jefe");
        let expected = STANDARD.encode(
            [
                0x5b, 0xdc, 0xc1, 0x46, 0xbf, 0x60, 0x75, 0x4e, 0x6a, 0x04, 0x24, 0x26, 0x08,
                0x95, 0x75, 0xc7, 0x5a, 0x00, 0x3f, 0x08, 0x9d, 0x27, 0x39, 0x83, 0x9d, 0xec,
                0x58, 0xb9, 0x64, 0xec, 0x38, 0x43,
            ]
            .as_slice(),
        );
        assert_eq!(verifier.sign(b"what do ya want for nothing?"), expected);
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let signature = SignatureVerifier::new("other-secret").sign(BODY);
        assert!(!SignatureVerifier::new("channel-secret").verify(BODY, &signature));
    }

    #[test]
    fn test_rejects_tampered_body() {
        let verifier = SignatureVerifier::new("channel-secret");
        let signature = verifier.sign(BODY);
        assert!(!verifier.verify(br#"{"destination":"U0001","events":[]}"#, &signature));
    }

    #[test]
    fn test_rejects_malformed_signature() {
        let verifier = SignatureVerifier::new("channel-secret");
        assert!(!verifier.verify(BODY, "not base64!!"));
        assert!(!verifier.verify(BODY, ""));
    }

    #[test]
    fn test_debug_hides_secret() {
        let verifier = SignatureVerifier::new("channel-secret");
        assert!(!format!("{:?}", verifier).contains("channel-secret"));
    }
}
