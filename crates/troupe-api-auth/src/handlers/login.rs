//! Login endpoint handler.
//!
//! POST /auth/login - Authenticate an account and issue tokens.

use crate::error::ApiAuthError;
use crate::models::{AuthTokens, LoginRequest};
use crate::services::{validate_request, AuthService};
use axum::{Extension, Json};
use std::sync::Arc;

/// Handle account login.
///
/// Authenticates the account with email and password and issues an access
/// and refresh token pair. Unknown email and wrong password are
/// indistinguishable in the response.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthTokens),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Authentication"
)]
pub async fn login_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthTokens>, ApiAuthError> {
    validate_request(&request)?;

    let tokens = auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(tokens))
}
