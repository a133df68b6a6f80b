//! Account profile endpoint handlers.
//!
//! GET /account - Current account's profile.
//! PATCH /account - Update the current account's profile.

use crate::error::ApiAuthError;
use crate::middleware::CurrentAccount;
use crate::models::{AccountProfile, AccountUpdateRequest};
use crate::services::{validate_request, AccountService};
use axum::{Extension, Json};
use std::sync::Arc;

/// Get the authenticated account's profile.
#[utoipa::path(
    get,
    path = "/account",
    responses(
        (status = 200, description = "Account profile", body = AccountProfile),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "Account"
)]
pub async fn get_profile_handler(
    Extension(account_service): Extension<Arc<AccountService>>,
    CurrentAccount(account): CurrentAccount,
) -> Result<Json<AccountProfile>, ApiAuthError> {
    Ok(Json(account_service.private_profile(&account)))
}

/// Update the authenticated account's profile.
#[utoipa::path(
    patch,
    path = "/account",
    request_body = AccountUpdateRequest,
    responses(
        (status = 200, description = "Updated account profile", body = AccountProfile),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "Account"
)]
pub async fn update_profile_handler(
    Extension(account_service): Extension<Arc<AccountService>>,
    CurrentAccount(account): CurrentAccount,
    Json(request): Json<AccountUpdateRequest>,
) -> Result<Json<AccountProfile>, ApiAuthError> {
    validate_request(&request)?;

    let profile = account_service
        .update_profile(&account, request.name.as_deref())
        .await?;

    Ok(Json(profile))
}
