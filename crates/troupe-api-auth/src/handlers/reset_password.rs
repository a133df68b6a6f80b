//! Password reset endpoint handler.
//!
//! POST /auth/password/reset - Complete a password reset with an emailed code.

use crate::error::ApiAuthError;
use crate::models::ForgotPasswordResetRequest;
use crate::services::{validate_request, ForgotPasswordService};
use axum::{http::StatusCode, Extension, Json};
use std::sync::Arc;

/// Handle the password reset step.
///
/// Consuming the code proves identity; the reuse rule still rejects a new
/// password equal to the current one.
#[utoipa::path(
    post,
    path = "/auth/password/reset",
    request_body = ForgotPasswordResetRequest,
    responses(
        (status = 204, description = "Password reset"),
        (status = 400, description = "New password matches the old one"),
        (status = 401, description = "Invalid, expired, invalidated, or already used code"),
    ),
    tag = "Authentication"
)]
pub async fn reset_password_handler(
    Extension(forgot_service): Extension<Arc<ForgotPasswordService>>,
    Json(request): Json<ForgotPasswordResetRequest>,
) -> Result<StatusCode, ApiAuthError> {
    validate_request(&request)?;

    forgot_service
        .reset(&request.code, &request.password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
