//! Account registration endpoint handler.
//!
//! POST /account - Create a new account.

use crate::error::ApiAuthError;
use crate::models::{AccountCreateRequest, AuthTokens};
use crate::services::{validate_request, AccountService};
use axum::{http::StatusCode, Extension, Json};
use std::sync::Arc;

/// Handle account registration.
///
/// Creates the account, emails a verification code, and returns a full
/// token bundle so the new account is signed in immediately.
#[utoipa::path(
    post,
    path = "/account",
    request_body = AccountCreateRequest,
    responses(
        (status = 201, description = "Account created", body = AuthTokens),
        (status = 409, description = "Email is already registered"),
    ),
    tag = "Account"
)]
pub async fn create_account_handler(
    Extension(account_service): Extension<Arc<AccountService>>,
    Json(request): Json<AccountCreateRequest>,
) -> Result<(StatusCode, Json<AuthTokens>), ApiAuthError> {
    validate_request(&request)?;

    let tokens = account_service
        .create_account(&request.email, request.name.as_deref(), &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(tokens)))
}
