//! Refresh token revocation endpoint handler.
//!
//! DELETE /auth/refresh-token - Ensure a refresh token is revoked.

use crate::error::ApiAuthError;
use crate::models::RefreshTokenRevokeRequest;
use crate::services::{validate_request, RefreshTokenService};
use axum::{http::StatusCode, Extension, Json};
use std::sync::Arc;

/// Handle refresh token revocation.
///
/// Idempotent: unknown or already-revoked tokens return success, so the
/// endpoint leaks nothing about which tokens exist.
#[utoipa::path(
    delete,
    path = "/auth/refresh-token",
    request_body = RefreshTokenRevokeRequest,
    responses(
        (status = 204, description = "Token revoked (or was never valid)"),
    ),
    tag = "Authentication"
)]
pub async fn revoke_handler(
    Extension(refresh_service): Extension<Arc<RefreshTokenService>>,
    Json(request): Json<RefreshTokenRevokeRequest>,
) -> Result<StatusCode, ApiAuthError> {
    validate_request(&request)?;

    // Best-effort: a logout must succeed even if the revocation write fails
    if let Err(e) = refresh_service
        .revoke(*request.account_id.as_uuid(), &request.refresh_token)
        .await
    {
        tracing::warn!("Discarding refresh token revocation failure: {e}");
    }

    Ok(StatusCode::NO_CONTENT)
}
