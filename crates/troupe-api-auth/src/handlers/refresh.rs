//! Token refresh endpoint handler.
//!
//! POST /auth/refresh-token - Rotate a refresh token into a new token pair.

use crate::error::ApiAuthError;
use crate::models::{AuthTokens, RefreshTokenRequest};
use crate::services::{validate_request, RefreshTokenService};
use axum::{Extension, Json};
use std::sync::Arc;

/// Handle token refresh.
///
/// Consumes the presented refresh token (single use) and issues a brand-new
/// access/refresh pair. Replaying a rotated token fails with 401.
#[utoipa::path(
    post,
    path = "/auth/refresh-token",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens rotated", body = AuthTokens),
        (status = 401, description = "Invalid, expired, revoked, or already used refresh token"),
    ),
    tag = "Authentication"
)]
pub async fn refresh_handler(
    Extension(refresh_service): Extension<Arc<RefreshTokenService>>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<AuthTokens>, ApiAuthError> {
    validate_request(&request)?;

    let tokens = refresh_service
        .rotate(*request.account_id.as_uuid(), &request.refresh_token)
        .await?;

    Ok(Json(tokens))
}
