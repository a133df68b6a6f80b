//! Forgot-password request endpoint handler.
//!
//! POST /auth/password/forget - Request a password reset code by email.

use crate::error::ApiAuthError;
use crate::models::{EmailResendResponse, ForgotPasswordRequest};
use crate::services::{validate_request, ForgotPasswordService};
use axum::{Extension, Json};
use std::sync::Arc;

/// Handle a password reset request.
///
/// Responds with the same shape whether or not the email is registered;
/// unknown addresses simply never receive a code.
#[utoipa::path(
    post,
    path = "/auth/password/forget",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset code sent if the email is registered", body = EmailResendResponse),
        (status = 429, description = "Requested again before the resend interval elapsed"),
    ),
    tag = "Authentication"
)]
pub async fn forgot_password_handler(
    Extension(forgot_service): Extension<Arc<ForgotPasswordService>>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<EmailResendResponse>, ApiAuthError> {
    validate_request(&request)?;

    let response = forgot_service.request(&request.email).await?;

    Ok(Json(response))
}
