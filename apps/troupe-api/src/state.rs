//! Service wiring for the troupe API.
//!
//! Builds the full service stack from configuration and the connection
//! pool. Construction order follows the dependency graph: refresh tokens →
//! auth → verification codes → accounts/forgot-password, so there are no
//! circular references to patch up at runtime.

use crate::config::Config;
use sqlx::PgPool;
use std::sync::Arc;
use troupe_api_auth::{
    AccountService, AuthService, AuthState, ForgotPasswordService, JwtConfig, JwtSecret,
    LogMailer, RefreshTokenConfig, RefreshTokenService, TokenService,
};
use troupe_api_groups::{GroupService, GroupsState, InvitationService};
use troupe_auth::PasswordHasher;

/// Fully wired application services.
pub struct AppServices {
    /// State for the auth/account routers.
    pub auth_state: AuthState,

    /// State for the groups router.
    pub groups_state: GroupsState,
}

/// Wire up every service against the pool and configuration.
///
/// # Errors
///
/// Returns an error message when the Argon2 parameters are invalid.
pub fn build_services(config: &Config, pool: PgPool) -> Result<AppServices, String> {
    let hasher = PasswordHasher::with_params(
        config.password_hash_memory_kib,
        config.password_hash_iterations,
        config.password_hash_parallelism,
    )
    .map_err(|e| format!("Invalid password hash parameters: {e}"))?;

    let jwt = JwtConfig {
        secret: config.jwt_secret.clone(),
        expiry_seconds: config.jwt_expiry_seconds,
    };
    let refresh_config = RefreshTokenConfig {
        expiry_seconds: config.refresh_token_expiry_seconds,
        length: config.refresh_token_length,
        rounds: config.refresh_token_rounds,
    };

    let refresh_token_service = RefreshTokenService::new(pool.clone(), jwt, refresh_config);
    let auth_service = AuthService::new(pool.clone(), hasher, refresh_token_service.clone());
    let token_service = TokenService::new(pool.clone());
    let mailer = Arc::new(LogMailer);

    let account_service = AccountService::new(
        pool.clone(),
        auth_service.clone(),
        token_service.clone(),
        mailer.clone(),
        config.web_app_url.clone(),
    );
    let forgot_password_service = ForgotPasswordService::new(
        pool.clone(),
        auth_service.clone(),
        token_service,
        mailer,
    );

    let group_service = GroupService::new(pool.clone());
    let invitation_service = InvitationService::new(pool.clone(), group_service.clone());

    Ok(AppServices {
        auth_state: AuthState {
            pool: pool.clone(),
            jwt_secret: JwtSecret::new(config.jwt_secret.clone()),
            account_service: Arc::new(account_service),
            auth_service: Arc::new(auth_service),
            refresh_token_service: Arc::new(refresh_token_service),
            forgot_password_service: Arc::new(forgot_password_service),
        },
        groups_state: GroupsState {
            pool,
            group_service: Arc::new(group_service),
            invitation_service: Arc::new(invitation_service),
        },
    })
}
