//! Authentication and account router configuration.
//!
//! Configures routes for:
//! - POST /auth/login
//! - PATCH /auth/password/change (authenticated)
//! - POST /auth/password/forget
//! - POST /auth/password/reset
//! - POST /auth/refresh-token
//! - DELETE /auth/refresh-token
//! - POST /account
//! - GET /account (authenticated)
//! - PATCH /account (authenticated)
//! - PATCH /account/verify
//! - POST /account/verify/resend
//!
//! Authenticated handlers pull the account through the [`CurrentAccount`]
//! extractor, so public and protected methods can share a path.
//!
//! [`CurrentAccount`]: crate::middleware::CurrentAccount

use crate::handlers::{
    change_password_handler, create_account_handler, forgot_password_handler, get_profile_handler,
    login_handler, refresh_handler, reset_password_handler, revoke_handler,
    update_profile_handler, verify_account_handler, verify_resend_handler,
};
use crate::middleware::JwtSecret;
use crate::services::{AccountService, AuthService, ForgotPasswordService, RefreshTokenService};
use axum::routing::{patch, post};
use axum::{Extension, Router};
use sqlx::PgPool;
use std::sync::Arc;

/// Application state for authentication and account routes.
#[derive(Clone)]
pub struct AuthState {
    /// Database connection pool.
    pub pool: PgPool,
    /// JWT signing secret for authenticated extractors/middleware.
    pub jwt_secret: JwtSecret,
    /// Account service.
    pub account_service: Arc<AccountService>,
    /// Authentication service.
    pub auth_service: Arc<AuthService>,
    /// Refresh token service.
    pub refresh_token_service: Arc<RefreshTokenService>,
    /// Forgot-password service.
    pub forgot_password_service: Arc<ForgotPasswordService>,
}

/// Create the `/auth` router.
pub fn auth_router(state: AuthState) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/password/change", patch(change_password_handler))
        .route("/password/forget", post(forgot_password_handler))
        .route("/password/reset", post(reset_password_handler))
        .route(
            "/refresh-token",
            post(refresh_handler).delete(revoke_handler),
        )
        .layer(Extension(state.pool))
        .layer(Extension(state.jwt_secret))
        .layer(Extension(state.auth_service))
        .layer(Extension(state.refresh_token_service))
        .layer(Extension(state.forgot_password_service))
}

/// Create the `/account` router.
pub fn account_router(state: AuthState) -> Router {
    Router::new()
        .route(
            "/",
            post(create_account_handler)
                .get(get_profile_handler)
                .patch(update_profile_handler),
        )
        .route("/verify", patch(verify_account_handler))
        .route("/verify/resend", post(verify_resend_handler))
        .layer(Extension(state.pool))
        .layer(Extension(state.jwt_secret))
        .layer(Extension(state.account_service))
}
