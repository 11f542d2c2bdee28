//! Webhook delivery authentication.
//!
//! GitHub signs each delivery with HMAC-SHA256 over the raw body and
//! sends the tag in `X-Hub-Signature-256` as `sha256=<hex>`. Every
//! delivery must carry a valid tag before any payload parsing happens.

use crate::foundation::{BountyError, Result};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_PREFIX: &str = "sha256=";

pub struct SignatureValidator {
    secret: SecretString,
}

impl SignatureValidator {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    pub fn verify(&self, body: &[u8], signature_header: &str) -> Result<()> {
        let hex_tag = signature_header
            .strip_prefix(SIGNATURE_PREFIX)
            .ok_or_else(|| BountyError::signature_rejected("signature header is not sha256"))?;
        let claimed = hex::decode(hex_tag)
            .map_err(|_| BountyError::signature_rejected("signature is not valid hex"))?;

        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| BountyError::signature_rejected("webhook secret is unusable"))?;
        mac.update(body);
        let expected = mac.finalize().into_bytes();

        if expected.ct_eq(claimed.as_slice()).into() {
            Ok(())
        } else {
            Err(BountyError::signature_rejected("signature mismatch"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature_for(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn accepts_a_valid_signature() {
        let validator = SignatureValidator::new(SecretString::from("hook-secret"));
        let body = br#"{"action":"labeled"}"#;
        let header = signature_for("hook-secret", body);

        assert!(validator.verify(body, &header).is_ok());
    }

    #[test]
    fn rejects_a_signature_under_the_wrong_secret() {
        let validator = SignatureValidator::new(SecretString::from("hook-secret"));
        let body = br#"{"action":"labeled"}"#;
        let header = signature_for("other-secret", body);

        assert!(validator.verify(body, &header).is_err());
    }

    #[test]
    fn rejects_a_tampered_body() {
        let validator = SignatureValidator::new(SecretString::from("hook-secret"));
        let header = signature_for("hook-secret", br#"{"action":"labeled"}"#);

        assert!(validator.verify(br#"{"action":"closed"}"#, &header).is_err());
    }

    #[test]
    fn rejects_malformed_headers() {
        let validator = SignatureValidator::new(SecretString::from("hook-secret"));

        assert!(validator.verify(b"body", "sha1=abcdef").is_err());
        assert!(validator.verify(b"body", "sha256=zz-not-hex").is_err());
        assert!(validator.verify(b"body", "").is_err());
    }
}
