//! Account and authentication API for troupe.
//!
//! This crate provides the REST endpoints and services for:
//! - Registration (POST /account) and email verification
//! - Login (POST /auth/login) with JWT access tokens
//! - Refresh token rotation (POST /auth/refresh-token) and revocation
//! - Password change and the forgot-password flow
//!
//! # Example
//!
//! ```rust,ignore
//! use troupe_api_auth::{account_router, auth_router, AuthState};
//! use axum::Router;
//!
//! let app = Router::new()
//!     .nest("/auth", auth_router(state.clone()))
//!     .nest("/account", account_router(state));
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;

// Re-export public API
pub use error::{ApiAuthError, ProblemDetails};
pub use middleware::{jwt_auth_middleware, CurrentAccount, JwtSecret};
pub use models::{
    AccountCreateRequest, AccountProfile, AccountUpdateRequest, AccountVerifyRequest,
    AccountVerifyResendRequest, AuthTokens, ChangePasswordRequest, EmailResendResponse,
    ForgotPasswordRequest, ForgotPasswordResetRequest, LoginRequest, RefreshTokenRequest,
    RefreshTokenRevokeRequest,
};
pub use router::{account_router, auth_router, AuthState};
pub use services::{
    check_usable, normalize_email, validate_request, AccountService, AuthService,
    ForgotPasswordService, JwtConfig, LogMailer, Mailer, RefreshTokenConfig, RefreshTokenService,
    Throttle, TokenService, DEFAULT_CODE_THROTTLE_SECONDS,
};
