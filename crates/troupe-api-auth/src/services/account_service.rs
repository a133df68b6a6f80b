//! Account service.
//!
//! Account CRUD plus the verification flows layered on top of the
//! verification code service.

use crate::error::ApiAuthError;
use crate::models::{AccountProfile, AuthTokens, EmailResendResponse};
use crate::services::auth_service::AuthService;
use crate::services::hashing;
use crate::services::mailer::Mailer;
use crate::services::token_service::{TokenService, DEFAULT_CODE_THROTTLE_SECONDS};
use crate::services::validation::normalize_email;
use sqlx::PgPool;
use std::sync::Arc;
use troupe_db::{Account, VerificationKind};

/// Service for account management operations.
#[derive(Clone)]
pub struct AccountService {
    pool: PgPool,
    auth: AuthService,
    tokens: TokenService,
    mailer: Arc<dyn Mailer>,
    web_app_url: String,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub fn new(
        pool: PgPool,
        auth: AuthService,
        tokens: TokenService,
        mailer: Arc<dyn Mailer>,
        web_app_url: String,
    ) -> Self {
        Self {
            pool,
            auth,
            tokens,
            mailer,
            web_app_url,
        }
    }

    /// Register a new account.
    ///
    /// Issues a verification code (delivered out-of-band) and a full token
    /// bundle: accounts may use the app before verifying.
    pub async fn create_account(
        &self,
        email: &str,
        name: Option<&str>,
        password: &str,
    ) -> Result<AuthTokens, ApiAuthError> {
        let email = normalize_email(email);
        let name = name.map(str::trim).filter(|n| !n.is_empty());

        if Account::find_by_email(&self.pool, &email).await?.is_some() {
            return Err(ApiAuthError::EmailInUse);
        }

        let password_hash = hashing::hash_password(self.auth.password_hasher(), password).await?;
        let account = Account::create(&self.pool, &email, name, &password_hash).await?;

        tracing::info!(account_id = %account.id, "Account registered");

        let code = self
            .tokens
            .create_code(account.id, VerificationKind::AccountVerification)
            .await?;
        self.mailer
            .send_account_verification(&account.email, &code.code, &self.verification_url(&code.code))
            .await;

        self.auth.create_auth_tokens(&account).await
    }

    /// Find an account by email, compared case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ApiAuthError> {
        Ok(Account::find_by_email(&self.pool, &normalize_email(email)).await?)
    }

    /// An account's own profile view.
    #[must_use]
    pub fn private_profile(&self, account: &Account) -> AccountProfile {
        AccountProfile::from(account)
    }

    /// Update an account's display name.
    pub async fn update_profile(
        &self,
        account: &Account,
        name: Option<&str>,
    ) -> Result<AccountProfile, ApiAuthError> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let updated = Account::update_name(&self.pool, account.id, name).await?;

        Ok(AccountProfile::from(&updated))
    }

    /// Verify a newly created account with an emailed code.
    ///
    /// Accounts can only be verified once; the conflict is reported before
    /// the code is consumed so a stray re-submit does not burn it.
    pub async fn verify_account(&self, code: &str) -> Result<AuthTokens, ApiAuthError> {
        let kind = VerificationKind::AccountVerification;

        let found = self
            .tokens
            .get_code(code, kind)
            .await?
            .ok_or(ApiAuthError::TokenMissing {
                subject: "Verification code",
            })?;

        let account = Account::find_by_id(&self.pool, found.account_id)
            .await?
            .ok_or_else(|| {
                ApiAuthError::Internal(format!("Account missing for code {}", found.id))
            })?;

        if account.is_verified() {
            return Err(ApiAuthError::AlreadyVerified);
        }

        let account = self.tokens.consume(code, kind).await?;
        Account::mark_verified(&self.pool, account.id).await?;

        tracing::info!(account_id = %account.id, "Account verified");

        // Caller may or may not already hold tokens; issue a fresh bundle
        // either way
        self.auth.create_auth_tokens(&account).await
    }

    /// Re-issue an account verification code, subject to throttling.
    ///
    /// Unknown emails are a NotFound here (unlike forgot-password): this
    /// endpoint is only reachable for addresses the caller already proved
    /// knowledge of at registration, so masking buys nothing.
    pub async fn verify_account_resend(
        &self,
        email: &str,
    ) -> Result<EmailResendResponse, ApiAuthError> {
        let kind = VerificationKind::AccountVerification;

        let account = self
            .find_by_email(email)
            .await?
            .ok_or(ApiAuthError::NotFound("Account"))?;

        if account.is_verified() {
            return Err(ApiAuthError::AlreadyVerified);
        }

        let throttle = self
            .tokens
            .check_throttle(account.id, kind, DEFAULT_CODE_THROTTLE_SECONDS)
            .await?;
        if !throttle.valid {
            return Err(ApiAuthError::Throttled {
                wait: throttle.delay,
            });
        }

        let code = self.tokens.create_code(account.id, kind).await?;
        self.mailer
            .send_account_verification(&account.email, &code.code, &self.verification_url(&code.code))
            .await;

        Ok(EmailResendResponse {
            expiry: kind.expiry_seconds(),
            wait: DEFAULT_CODE_THROTTLE_SECONDS,
        })
    }

    fn verification_url(&self, code: &str) -> String {
        format!("{}/verify/{code}", self.web_app_url)
    }
}
