//! Refresh token service.
//!
//! Generates, validates, rotates, and revokes the opaque refresh tokens
//! bound to an account. Tokens are single-use: rotation consumes the
//! presented token and issues a brand-new access/refresh pair.

use crate::error::ApiAuthError;
use crate::models::AuthTokens;
use crate::services::token_service::check_usable;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use troupe_auth::{derive_token_hash, encode_token, generate_opaque_token, Claims};
use troupe_core::AccountId;
use troupe_db::{Account, RefreshToken};
use uuid::Uuid;

/// JWT signing configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC signing secret.
    pub secret: String,

    /// Access token lifetime in seconds.
    pub expiry_seconds: i64,
}

/// Refresh token configuration.
#[derive(Debug, Clone)]
pub struct RefreshTokenConfig {
    /// Refresh token lifetime in seconds.
    pub expiry_seconds: i64,

    /// Plaintext token length and derived hash length in bytes.
    pub length: usize,

    /// PBKDF2 rounds for the storage hash.
    ///
    /// Kept low on purpose: the hash exists for exact-match lookup, not as
    /// an adaptive work factor.
    pub rounds: u32,
}

impl Default for RefreshTokenConfig {
    fn default() -> Self {
        Self {
            expiry_seconds: 7 * 24 * 60 * 60,
            length: 64,
            rounds: 1000,
        }
    }
}

/// Service for refresh token lifecycle management.
#[derive(Clone)]
pub struct RefreshTokenService {
    pool: PgPool,
    jwt: JwtConfig,
    config: RefreshTokenConfig,
}

impl RefreshTokenService {
    /// Create a new refresh token service.
    #[must_use]
    pub fn new(pool: PgPool, jwt: JwtConfig, config: RefreshTokenConfig) -> Self {
        Self { pool, jwt, config }
    }

    /// Access token lifetime in seconds.
    #[must_use]
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.jwt.expiry_seconds
    }

    /// Generate a refresh token for an account.
    ///
    /// Only the derived hash is persisted; the plaintext is returned once
    /// and never stored.
    pub async fn generate(&self, account_id: Uuid) -> Result<String, ApiAuthError> {
        let plaintext = generate_opaque_token(self.config.length);
        let hash = derive_token_hash(
            &plaintext,
            &account_id,
            self.config.rounds,
            self.config.length,
        );
        let expires_at = Utc::now() + Duration::seconds(self.config.expiry_seconds);

        RefreshToken::create(&self.pool, account_id, &hash, expires_at).await?;

        Ok(plaintext)
    }

    /// Look up a stored token from its plaintext value.
    ///
    /// The derived hash is deterministic per (token, account), so this is a
    /// single exact-match query.
    pub async fn lookup(
        &self,
        account_id: Uuid,
        plaintext: &str,
    ) -> Result<Option<RefreshToken>, ApiAuthError> {
        let hash = derive_token_hash(
            plaintext,
            &account_id,
            self.config.rounds,
            self.config.length,
        );

        Ok(RefreshToken::find_by_hash(&self.pool, account_id, &hash).await?)
    }

    /// Issue a full token bundle (JWT access token + fresh refresh token)
    /// for an account.
    pub async fn create_auth_tokens(&self, account: &Account) -> Result<AuthTokens, ApiAuthError> {
        let claims = Claims::new(account.email.clone(), self.jwt.expiry_seconds);
        let access_token = encode_token(&claims, self.jwt.secret.as_bytes())?;
        let refresh_token = self.generate(account.id).await?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            expires_in: self.jwt.expiry_seconds,
            account_id: AccountId::from_uuid(account.id),
        })
    }

    /// Rotate a refresh token: consume the presented token and issue a new
    /// access/refresh pair.
    ///
    /// Rotation is single-winner: the conditional `used_at` stamp admits
    /// exactly one of any concurrent callers; the rest fail with
    /// "already used". A replayed token after rotation fails the same way.
    pub async fn rotate(
        &self,
        account_id: Uuid,
        plaintext: &str,
    ) -> Result<AuthTokens, ApiAuthError> {
        let found = self.lookup(account_id, plaintext).await?;
        check_usable(found.as_ref(), "Refresh token")?;
        let Some(found) = found else {
            return Err(ApiAuthError::TokenMissing {
                subject: "Refresh token",
            });
        };

        if !RefreshToken::mark_used(&self.pool, found.id).await? {
            tracing::warn!(
                account_id = %account_id,
                token_id = %found.id,
                "Lost rotation race for refresh token"
            );
            return Err(ApiAuthError::TokenUsed {
                subject: "Refresh token",
            });
        }

        let account = Account::find_by_id(&self.pool, account_id)
            .await?
            .ok_or_else(|| {
                ApiAuthError::Internal(format!("Account missing for refresh token {}", found.id))
            })?;

        self.create_auth_tokens(&account).await
    }

    /// Revoke a refresh token.
    ///
    /// Unknown tokens are a silent no-op so the endpoint cannot be used to
    /// probe which tokens exist. Idempotent for already-revoked tokens.
    pub async fn revoke(&self, account_id: Uuid, plaintext: &str) -> Result<(), ApiAuthError> {
        let Some(found) = self.lookup(account_id, plaintext).await? else {
            tracing::debug!(account_id = %account_id, "Revoke for unknown refresh token ignored");
            return Ok(());
        };

        RefreshToken::invalidate(&self.pool, found.id).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RefreshTokenConfig::default();
        assert_eq!(config.expiry_seconds, 604_800); // 7 days
        assert_eq!(config.length, 64);
    }

    #[test]
    fn test_hash_derivation_matches_lookup_inputs() {
        // The same (token, account, config) always derives the same hash;
        // generate/lookup rely on this for exact-match queries.
        let config = RefreshTokenConfig::default();
        let account_id = Uuid::new_v4();
        let token = generate_opaque_token(config.length);

        let h1 = derive_token_hash(&token, &account_id, config.rounds, config.length);
        let h2 = derive_token_hash(&token, &account_id, config.rounds, config.length);
        assert_eq!(h1, h2);
    }
}
