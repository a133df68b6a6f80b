//! Forgot-password service.
//!
//! Two-step flow: request a reset code by email, then redeem the code with a
//! new password.

use crate::error::ApiAuthError;
use crate::models::EmailResendResponse;
use crate::services::auth_service::AuthService;
use crate::services::mailer::Mailer;
use crate::services::token_service::{TokenService, DEFAULT_CODE_THROTTLE_SECONDS};
use crate::services::validation::normalize_email;
use sqlx::PgPool;
use std::sync::Arc;
use troupe_db::{Account, VerificationKind};

/// Service for the forgot-password flow.
#[derive(Clone)]
pub struct ForgotPasswordService {
    pool: PgPool,
    auth: AuthService,
    tokens: TokenService,
    mailer: Arc<dyn Mailer>,
}

impl ForgotPasswordService {
    /// Create a new forgot-password service.
    #[must_use]
    pub fn new(
        pool: PgPool,
        auth: AuthService,
        tokens: TokenService,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            pool,
            auth,
            tokens,
            mailer,
        }
    }

    /// Request a password reset code.
    ///
    /// An unknown email gets the same response shape as a known one, and no
    /// code row is created: this endpoint is an open enumeration oracle
    /// otherwise. Known emails are throttled on the reset-code interval.
    pub async fn request(&self, email: &str) -> Result<EmailResendResponse, ApiAuthError> {
        let kind = VerificationKind::PasswordReset;

        let response = EmailResendResponse {
            expiry: kind.expiry_seconds(),
            wait: DEFAULT_CODE_THROTTLE_SECONDS,
        };

        let normalized_email = normalize_email(email);
        let Some(account) = Account::find_by_email(&self.pool, &normalized_email).await? else {
            tracing::debug!(
                email = %normalized_email,
                "Password reset requested for unknown email; faking success"
            );
            return Ok(response);
        };

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
            .send_password_reset(&account.email, &code.code)
            .await;

        Ok(response)
    }

    /// Reset a password with an emailed code.
    ///
    /// Consuming the code proves identity; the new password then goes
    /// through the standard reuse rule.
    pub async fn reset(&self, code: &str, password: &str) -> Result<(), ApiAuthError> {
        let account = self
            .tokens
            .consume(code, VerificationKind::PasswordReset)
            .await?;

        self.auth.set_password(&account, password).await?;

        tracing::info!(account_id = %account.id, "Password reset completed");

        Ok(())
    }
}
