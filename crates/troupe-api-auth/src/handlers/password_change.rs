//! Password change endpoint handler.
//!
//! PATCH /auth/password/change - Change the authenticated account's password.

use crate::error::ApiAuthError;
use crate::middleware::CurrentAccount;
use crate::models::ChangePasswordRequest;
use crate::services::{validate_request, AuthService};
use axum::{http::StatusCode, Extension, Json};
use std::sync::Arc;

/// Handle password change for the authenticated account.
#[utoipa::path(
    patch,
    path = "/auth/password/change",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Wrong old password or new password matches the old one"),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "Authentication"
)]
pub async fn change_password_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    CurrentAccount(account): CurrentAccount,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiAuthError> {
    validate_request(&request)?;

    auth_service
        .change_password(&account, &request.old_password, &request.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
