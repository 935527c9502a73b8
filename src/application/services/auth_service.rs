//! Bearer-token authentication for the admin API.

use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Verifies presented Bearer tokens against the configured admin token.
///
/// Tokens are compared through their HMAC-SHA256 tags under the signing
/// secret so the comparison is constant-time and the raw token never needs
/// to be kept around after startup.
pub struct AuthService {
    signing_secret: Vec<u8>,
    expected_tag: Vec<u8>,
}

impl AuthService {
    pub fn new(admin_token: &str, signing_secret: &str) -> Self {
        let expected_tag = compute_tag(signing_secret.as_bytes(), admin_token.as_bytes());
        Self {
            signing_secret: signing_secret.as_bytes().to_vec(),
            expected_tag,
        }
    }

    /// Checks a presented token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the token does not match.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        let mut mac = HmacSha256::new_from_slice(&self.signing_secret)
            .expect("HMAC accepts keys of any size");
        mac.update(token.as_bytes());

        mac.verify_slice(&self.expected_tag).map_err(|_| {
            AppError::unauthorized("Unauthorized", json!({ "reason": "Invalid token" }))
        })
    }

    /// Short hex fingerprint of the expected tag, safe to log.
    pub fn token_fingerprint(&self) -> String {
        hex::encode(&self.expected_tag[..4])
    }
}

fn compute_tag(secret: &[u8], token: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any size");
    mac.update(token);
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_configured_token() {
        let auth = AuthService::new("super-secret-token", "signing-secret");
        assert!(auth.authenticate("super-secret-token").is_ok());
    }

    #[test]
    fn test_rejects_wrong_token() {
        let auth = AuthService::new("super-secret-token", "signing-secret");
        let result = auth.authenticate("wrong-token");
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_rejects_empty_token() {
        let auth = AuthService::new("super-secret-token", "signing-secret");
        assert!(auth.authenticate("").is_err());
    }

    #[test]
    fn test_same_token_different_secret_rejected() {
        let auth = AuthService::new("token", "secret-a");
        let other = AuthService::new("token", "secret-b");
        assert_ne!(auth.expected_tag, other.expected_tag);
    }

    #[test]
    fn test_fingerprint_is_short_hex() {
        let auth = AuthService::new("token", "secret");
        let fp = auth.token_fingerprint();
        assert_eq!(fp.len(), 8);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
