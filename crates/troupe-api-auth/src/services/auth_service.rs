//! Authentication service.
//!
//! Orchestrates login, token issuance, and password changes.

use crate::error::ApiAuthError;
use crate::models::AuthTokens;
use crate::services::hashing;
use crate::services::refresh_token_service::RefreshTokenService;
use crate::services::validation::normalize_email;
use sqlx::PgPool;
use troupe_auth::PasswordHasher;
use troupe_db::Account;

/// Service for authentication operations.
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    password_hasher: PasswordHasher,
    refresh_tokens: RefreshTokenService,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(
        pool: PgPool,
        password_hasher: PasswordHasher,
        refresh_tokens: RefreshTokenService,
    ) -> Self {
        Self {
            pool,
            password_hasher,
            refresh_tokens,
        }
    }

    /// The configured password hasher.
    #[must_use]
    pub fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    /// Authenticate an account with email and password.
    ///
    /// Unknown email and wrong password yield the identical error, so the
    /// response never reveals whether an address is registered.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, ApiAuthError> {
        let normalized_email = normalize_email(email);

        let account = Account::find_by_email(&self.pool, &normalized_email)
            .await?
            .ok_or_else(|| {
                tracing::debug!(email = %normalized_email, "Login attempt for unknown email");
                ApiAuthError::InvalidCredentials
            })?;

        let stored_hash = Account::password_hash(&self.pool, account.id)
            .await?
            .ok_or_else(|| {
                ApiAuthError::Internal(format!("Password hash missing for account {}", account.id))
            })?;

        let valid = hashing::verify_password(&self.password_hasher, password, &stored_hash).await?;
        if !valid {
            tracing::debug!(account_id = %account.id, "Invalid password attempt");
            return Err(ApiAuthError::InvalidCredentials);
        }

        // Track the last time the account signed in (helpful for support)
        Account::touch_last_login(&self.pool, account.id).await?;

        tracing::info!(account_id = %account.id, "Account logged in");

        self.create_auth_tokens(&account).await
    }

    /// Issue a token bundle for an already-authenticated account.
    pub async fn create_auth_tokens(&self, account: &Account) -> Result<AuthTokens, ApiAuthError> {
        self.refresh_tokens.create_auth_tokens(account).await
    }

    /// Change an authenticated account's password.
    ///
    /// The old password must verify against the stored hash, and the new
    /// password must not. Reuse is detected through hash verification rather
    /// than by comparing salt mechanics, so hashes produced under older work
    /// factors still participate correctly.
    pub async fn change_password(
        &self,
        account: &Account,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiAuthError> {
        if new_password.is_empty() {
            return Err(ApiAuthError::Validation(
                "Password cannot be empty".to_string(),
            ));
        }

        let stored_hash = Account::password_hash(&self.pool, account.id)
            .await?
            .ok_or_else(|| {
                ApiAuthError::Internal(format!("Password hash missing for account {}", account.id))
            })?;

        let old_matches =
            hashing::verify_password(&self.password_hasher, old_password, &stored_hash).await?;
        if !old_matches {
            return Err(ApiAuthError::WrongOldPassword);
        }

        let new_matches_old =
            hashing::verify_password(&self.password_hasher, new_password, &stored_hash).await?;
        if new_matches_old {
            return Err(ApiAuthError::PasswordMatchesOld);
        }

        self.store_password(account, new_password).await
    }

    /// Set an account's password without an old-password check.
    ///
    /// Used by the forgot-password flow: the caller has already proven
    /// identity by consuming a reset code. The reuse rule still applies.
    pub async fn set_password(
        &self,
        account: &Account,
        password: &str,
    ) -> Result<(), ApiAuthError> {
        if password.is_empty() {
            return Err(ApiAuthError::Validation(
                "Password cannot be empty".to_string(),
            ));
        }

        let stored_hash = Account::password_hash(&self.pool, account.id)
            .await?
            .ok_or_else(|| {
                ApiAuthError::Internal(format!("Password hash missing for account {}", account.id))
            })?;

        let matches_old =
            hashing::verify_password(&self.password_hasher, password, &stored_hash).await?;
        if matches_old {
            return Err(ApiAuthError::PasswordMatchesOld);
        }

        self.store_password(account, password).await
    }

    /// Hash and persist a new password.
    async fn store_password(&self, account: &Account, password: &str) -> Result<(), ApiAuthError> {
        let hash = hashing::hash_password(&self.password_hasher, password).await?;
        Account::update_password_hash(&self.pool, account.id, &hash).await?;

        tracing::info!(account_id = %account.id, "Password updated");

        Ok(())
    }
}
