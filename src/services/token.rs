// SPDX-License-Identifier: MIT

//! Session token signing and verification.
//!
//! Tokens are HS256 JWTs keyed by a process-wide secret. The algorithm is
//! pinned on the verify side: a token claiming any other algorithm in its
//! header is rejected outright, never honored (prevents
//! algorithm-substitution attacks).
//!
//! The codec itself has no notion of expiry. The embedded Strava
//! credential carries its own `expires_at`, which the session middleware
//! enforces.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::models::SessionClaims;

/// The one algorithm we sign and accept.
const AUTH_ALGORITHM: Algorithm = Algorithm::HS256;

/// Signs and verifies session tokens with a symmetric secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    /// Create a codec from the configured signing secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Serialize and sign `claims` into an opaque token string.
    pub fn sign(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        encode(&Header::new(AUTH_ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token's signature and deserialize its claims.
    ///
    /// Fails on signature mismatch, malformed structure, or an algorithm
    /// header other than the pinned one. All failures collapse into
    /// [`TokenError::Invalid`]; callers must not distinguish them to
    /// clients.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(AUTH_ALGORITHM);
        // Session claims carry no registered JWT claims; expiry lives in
        // the embedded Strava credential and is checked by the middleware.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}

/// Codec-level errors. Surfaced to clients only as a generic 401 or an
/// `auth_error` redirect flag, never with detail.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to sign session token: {0}")]
    Signing(String),

    #[error("Invalid session token")]
    Invalid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SessionClaims, StravaAuthentication, StravaSession};

    fn test_claims() -> SessionClaims {
        SessionClaims {
            strava: StravaSession {
                authentication: StravaAuthentication {
                    expires_at: 2_000_000_000,
                    refresh_token: "refresh_secret".to_string(),
                    access_token: "access_secret".to_string(),
                },
                athlete: serde_json::json!({ "id": 1337, "firstname": "Test" }),
            },
        }
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let codec = TokenCodec::new(b"roundtrip_secret");
        let claims = test_claims();

        let token = codec.sign(&claims).unwrap();
        let decoded = codec.verify(&token).unwrap();

        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let signer = TokenCodec::new(b"secret_one");
        let verifier = TokenCodec::new(b"secret_two");

        let token = signer.sign(&test_claims()).unwrap();
        assert!(matches!(verifier.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_rejects_other_algorithm() {
        // Same secret, different algorithm header: must be rejected because
        // the verify side pins HS256 instead of trusting the token header.
        let secret = b"pinned_algorithm_secret";
        let token = encode(
            &Header::new(Algorithm::HS384),
            &test_claims(),
            &EncodingKey::from_secret(secret),
        )
        .unwrap();

        let codec = TokenCodec::new(secret);
        assert!(matches!(codec.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let codec = TokenCodec::new(b"tamper_secret");
        let token = codec.sign(&test_claims()).unwrap();

        // Flip one byte in the payload segment.
        let mut bytes = token.into_bytes();
        let payload_start = bytes.iter().position(|&b| b == b'.').unwrap() + 1;
        bytes[payload_start] = if bytes[payload_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(codec.verify(&tampered), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let codec = TokenCodec::new(b"garbage_secret");
        assert!(matches!(
            codec.verify("not-a-jwt-at-all"),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(codec.verify(""), Err(TokenError::Invalid)));
    }
}
