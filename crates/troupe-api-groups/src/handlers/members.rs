//! Group member endpoint handlers.
//!
//! GET /group/:id/member - List active members.
//! PATCH /group/:id/member/:account_id - Change role and/or tags.
//! DELETE /group/:id/member/:account_id - Remove a member.

use crate::error::ApiGroupsError;
use crate::models::{MemberDetail, UpdateMemberRequest};
use crate::services::GroupService;
use axum::{extract::Path, http::StatusCode, Extension, Json};
use std::sync::Arc;
use troupe_db::Account;
use uuid::Uuid;

/// List a group's active members.
#[utoipa::path(
    get,
    path = "/group/{group_id}/member",
    responses(
        (status = 200, description = "Active members", body = [MemberDetail]),
        (status = 403, description = "Not a member of this group"),
        (status = 404, description = "Group not found"),
    ),
    tag = "Groups"
)]
pub async fn list_members_handler(
    Extension(group_service): Extension<Arc<GroupService>>,
    Extension(account): Extension<Account>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<MemberDetail>>, ApiGroupsError> {
    let members = group_service.list_members(&account, group_id).await?;

    Ok(Json(members.iter().map(MemberDetail::from).collect()))
}

/// Update a member's role (admin) and/or tag assignment (admin or manager).
#[utoipa::path(
    patch,
    path = "/group/{group_id}/member/{account_id}",
    request_body = UpdateMemberRequest,
    responses(
        (status = 200, description = "Updated member", body = MemberDetail),
        (status = 403, description = "Insufficient group role"),
        (status = 404, description = "Group, member, or tag not found"),
    ),
    tag = "Groups"
)]
pub async fn update_member_handler(
    Extension(group_service): Extension<Arc<GroupService>>,
    Extension(account): Extension<Account>,
    Path((group_id, account_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<Json<MemberDetail>, ApiGroupsError> {
    let member = group_service
        .update_member(
            &account,
            group_id,
            account_id,
            request.role.map(Into::into),
            request.tag_ids.as_deref(),
        )
        .await?;

    Ok(Json(MemberDetail::from(&member)))
}

/// Remove a member from a group (managers, or the member themselves).
#[utoipa::path(
    delete,
    path = "/group/{group_id}/member/{account_id}",
    responses(
        (status = 204, description = "Member removed"),
        (status = 403, description = "Insufficient group role"),
        (status = 404, description = "Group or member not found"),
    ),
    tag = "Groups"
)]
pub async fn remove_member_handler(
    Extension(group_service): Extension<Arc<GroupService>>,
    Extension(account): Extension<Account>,
    Path((group_id, account_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiGroupsError> {
    group_service
        .remove_member(&account, group_id, account_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
