//! JWT encoding and decoding with the HS256 algorithm.
//!
//! Access tokens are signed with a shared HMAC secret loaded from
//! configuration.

use crate::claims::Claims;
use crate::error::AuthError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Configuration for JWT validation.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Leeway in seconds for exp/iat validation (clock skew tolerance).
    pub leeway: u64,
    /// Whether to validate expiration.
    pub validate_exp: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            leeway: 60, // 60 seconds clock skew tolerance
            validate_exp: true,
        }
    }
}

impl ValidationConfig {
    /// Create a new validation config with custom leeway.
    #[must_use]
    pub fn with_leeway(leeway: u64) -> Self {
        Self {
            leeway,
            ..Default::default()
        }
    }

    /// Disable expiration validation (use with caution).
    #[must_use]
    pub fn skip_exp_validation(mut self) -> Self {
        self.validate_exp = false;
        self
    }
}

/// Encode JWT claims into a signed token string using HS256.
///
/// # Arguments
///
/// * `claims` - The JWT claims to encode
/// * `secret` - The HMAC signing secret
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if encoding fails.
pub fn encode_token(claims: &Claims, secret: &[u8]) -> Result<String, AuthError> {
    let key = EncodingKey::from_secret(secret);
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &key)
        .map_err(|e| AuthError::InvalidToken(format!("Encoding failed: {e}")))
}

/// Decode and validate a JWT token string.
///
/// # Arguments
///
/// * `token` - The JWT token string
/// * `secret` - The HMAC signing secret
///
/// # Errors
///
/// - `AuthError::TokenExpired` if the token's exp claim is in the past
/// - `AuthError::InvalidSignature` if the signature does not verify
/// - `AuthError::InvalidToken` for any other malformation
pub fn decode_token(token: &str, secret: &[u8]) -> Result<Claims, AuthError> {
    decode_token_with_config(token, secret, &ValidationConfig::default())
}

/// Decode and validate a JWT token string with custom validation settings.
pub fn decode_token_with_config(
    token: &str,
    secret: &[u8],
    config: &ValidationConfig,
) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(secret);

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = config.leeway;
    validation.validate_exp = config.validate_exp;
    // The claims struct carries no aud claim
    validation.validate_aud = false;
    validation.set_required_spec_claims(&["exp"]);

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::InvalidToken(e.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-signing-secret";

    #[test]
    fn test_encode_decode_roundtrip() {
        let claims = Claims::new("user@example.com", 900);
        let token = encode_token(&claims, SECRET).unwrap();

        let decoded = decode_token(&token, SECRET).unwrap();
        assert_eq!(decoded.email, "user@example.com");
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn test_token_has_three_segments() {
        let claims = Claims::new("user@example.com", 900);
        let token = encode_token(&claims, SECRET).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_decode_with_wrong_secret_fails() {
        let claims = Claims::new("user@example.com", 900);
        let token = encode_token(&claims, SECRET).unwrap();

        let result = decode_token(&token, b"other-secret");
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_decode_expired_token_fails() {
        // Expired well past the default leeway
        let claims = Claims {
            email: "user@example.com".to_string(),
            iat: chrono::Utc::now().timestamp() - 1000,
            exp: chrono::Utc::now().timestamp() - 500,
        };
        let token = encode_token(&claims, SECRET).unwrap();

        let result = decode_token(&token, SECRET);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_decode_expired_token_with_exp_validation_disabled() {
        let claims = Claims {
            email: "user@example.com".to_string(),
            iat: chrono::Utc::now().timestamp() - 1000,
            exp: chrono::Utc::now().timestamp() - 500,
        };
        let token = encode_token(&claims, SECRET).unwrap();

        let config = ValidationConfig::default().skip_exp_validation();
        let decoded = decode_token_with_config(&token, SECRET, &config).unwrap();
        assert_eq!(decoded.email, "user@example.com");
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_token("not-a-jwt", SECRET);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }
}
