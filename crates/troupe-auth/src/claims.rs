//! JWT claims for access tokens.
//!
//! Access tokens carry the account's email as their identity claim, plus the
//! standard RFC 7519 timestamp claims.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by a troupe access token.
///
/// The account email is the identity claim; controllers resolve it back to an
/// account record on each authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Account email address (identity claim).
    pub email: String,

    /// Issued-at time (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Create claims for an account email, expiring after `expiry_seconds`.
    #[must_use]
    pub fn new(email: impl Into<String>, expiry_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            email: email.into(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry_seconds)).timestamp(),
        }
    }

    /// Check whether the claims have expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_expiry_relative_to_now() {
        let claims = Claims::new("a@example.com", 900);
        assert_eq!(claims.exp - claims.iat, 900);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_claims() {
        let claims = Claims {
            email: "a@example.com".to_string(),
            iat: Utc::now().timestamp() - 1000,
            exp: Utc::now().timestamp() - 100,
        };
        assert!(claims.is_expired());
    }

    #[test]
    fn test_serde_roundtrip() {
        let claims = Claims::new("a@example.com", 900);
        let json = serde_json::to_string(&claims).unwrap();
        let parsed: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(claims, parsed);
    }
}
