//! Async wrappers around the Argon2 password hasher.
//!
//! Password hashing is deliberately expensive (tunable work factor), so it
//! runs on the blocking thread pool instead of stalling the async executor
//! for tens of milliseconds per call.

use crate::error::ApiAuthError;
use troupe_auth::PasswordHasher;

/// Hash a password off the async executor.
pub async fn hash_password(
    hasher: &PasswordHasher,
    password: &str,
) -> Result<String, ApiAuthError> {
    let hasher = hasher.clone();
    let password = password.to_string();

    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| ApiAuthError::Internal(format!("Hashing task failed: {e}")))?
        .map_err(|e| ApiAuthError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash off the async executor.
pub async fn verify_password(
    hasher: &PasswordHasher,
    password: &str,
    hash: &str,
) -> Result<bool, ApiAuthError> {
    let hasher = hasher.clone();
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| ApiAuthError::Internal(format!("Hashing task failed: {e}")))?
        .map_err(|e| ApiAuthError::Internal(format!("Password verification failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        // Small work factors keep the test quick
        PasswordHasher::with_params(4096, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let hash = hash_password(&hasher, "secret-password").await.unwrap();

        assert!(verify_password(&hasher, "secret-password", &hash)
            .await
            .unwrap());
        assert!(!verify_password(&hasher, "wrong-password", &hash)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_verify_malformed_hash_is_internal_error() {
        let hasher = fast_hasher();
        let result = verify_password(&hasher, "password", "not-a-hash").await;
        assert!(matches!(result, Err(ApiAuthError::Internal(_))));
    }
}
