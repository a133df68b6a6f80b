//! Account verification endpoint handlers.
//!
//! PATCH /account/verify - Verify a registered account with an emailed code.
//! POST /account/verify/resend - Re-issue the verification code.

use crate::error::ApiAuthError;
use crate::models::{
    AccountVerifyRequest, AccountVerifyResendRequest, AuthTokens, EmailResendResponse,
};
use crate::services::{validate_request, AccountService};
use axum::{Extension, Json};
use std::sync::Arc;

/// Handle account verification.
#[utoipa::path(
    patch,
    path = "/account/verify",
    request_body = AccountVerifyRequest,
    responses(
        (status = 200, description = "Account verified", body = AuthTokens),
        (status = 401, description = "Invalid, expired, invalidated, or already used code"),
        (status = 409, description = "Account is already verified"),
    ),
    tag = "Account"
)]
pub async fn verify_account_handler(
    Extension(account_service): Extension<Arc<AccountService>>,
    Json(request): Json<AccountVerifyRequest>,
) -> Result<Json<AuthTokens>, ApiAuthError> {
    validate_request(&request)?;

    let tokens = account_service.verify_account(&request.code).await?;

    Ok(Json(tokens))
}

/// Handle verification code resend.
#[utoipa::path(
    post,
    path = "/account/verify/resend",
    request_body = AccountVerifyResendRequest,
    responses(
        (status = 200, description = "Verification code re-sent", body = EmailResendResponse),
        (status = 404, description = "No account for this email"),
        (status = 409, description = "Account is already verified"),
        (status = 429, description = "Requested again before the resend interval elapsed"),
    ),
    tag = "Account"
)]
pub async fn verify_resend_handler(
    Extension(account_service): Extension<Arc<AccountService>>,
    Json(request): Json<AccountVerifyResendRequest>,
) -> Result<Json<EmailResendResponse>, ApiAuthError> {
    validate_request(&request)?;

    let response = account_service.verify_account_resend(&request.email).await?;

    Ok(Json(response))
}
