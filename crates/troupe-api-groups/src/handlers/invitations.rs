//! Group invitation endpoint handlers.
//!
//! POST /group/:id/invitation - Invite an account into a group.
//! POST /group/invitation/respond - Accept or reject an invitation.

use crate::error::ApiGroupsError;
use crate::models::{
    CreateInvitationRequest, InvitationDetail, MemberDetail, RespondInvitationRequest,
};
use crate::services::InvitationService;
use crate::validation::validate_request;
use axum::{extract::Path, http::StatusCode, Extension, Json};
use std::sync::Arc;
use troupe_db::Account;
use uuid::Uuid;

/// Invite an account into a group (admin or manager).
///
/// The returned token is delivered to the invitee out-of-band by the
/// inviter.
#[utoipa::path(
    post,
    path = "/group/{group_id}/invitation",
    request_body = CreateInvitationRequest,
    responses(
        (status = 201, description = "Invitation issued", body = InvitationDetail),
        (status = 403, description = "Insufficient group role"),
        (status = 404, description = "Group or account not found"),
        (status = 409, description = "Account is already a member"),
    ),
    tag = "Groups"
)]
pub async fn create_invitation_handler(
    Extension(invitation_service): Extension<Arc<InvitationService>>,
    Extension(account): Extension<Account>,
    Path(group_id): Path<Uuid>,
    Json(request): Json<CreateInvitationRequest>,
) -> Result<(StatusCode, Json<InvitationDetail>), ApiGroupsError> {
    validate_request(&request)?;

    let invitation = invitation_service
        .invite(&account, group_id, &request.email)
        .await?;

    let detail = InvitationDetail {
        id: invitation.id,
        group_id: invitation.group_id,
        account_id: invitation.account_id,
        token: invitation.token,
        expires_at: invitation.expires_at,
    };

    Ok((StatusCode::CREATED, Json(detail)))
}

/// Answer an invitation as the invited account.
///
/// Accepting returns the activated membership; rejecting returns 204.
#[utoipa::path(
    post,
    path = "/group/invitation/respond",
    request_body = RespondInvitationRequest,
    responses(
        (status = 200, description = "Invitation accepted", body = MemberDetail),
        (status = 204, description = "Invitation rejected"),
        (status = 401, description = "Invalid, expired, invalidated, or already used invitation"),
        (status = 403, description = "Invitation belongs to a different account"),
    ),
    tag = "Groups"
)]
pub async fn respond_invitation_handler(
    Extension(invitation_service): Extension<Arc<InvitationService>>,
    Extension(account): Extension<Account>,
    Json(request): Json<RespondInvitationRequest>,
) -> Result<axum::response::Response, ApiGroupsError> {
    use axum::response::IntoResponse;

    validate_request(&request)?;

    let member = invitation_service
        .respond(&account, &request.token, request.accept)
        .await?;

    Ok(match member {
        Some(member) => Json(MemberDetail::from(&member)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}
