//! Group CRUD endpoint handlers.
//!
//! POST /group - Create a group.
//! GET /group/:id - Get a group.
//! PATCH /group/:id - Update a group.
//! DELETE /group/:id - Archive a group.

use crate::error::ApiGroupsError;
use crate::models::{CreateGroupRequest, GroupDetail, UpdateGroupRequest};
use crate::services::GroupService;
use crate::validation::validate_request;
use axum::{extract::Path, http::StatusCode, Extension, Json};
use std::sync::Arc;
use troupe_db::Account;
use uuid::Uuid;

/// Create a new group. The creator becomes its first admin member.
#[utoipa::path(
    post,
    path = "/group",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created", body = GroupDetail),
        (status = 409, description = "Slug is already taken"),
    ),
    tag = "Groups"
)]
pub async fn create_group_handler(
    Extension(group_service): Extension<Arc<GroupService>>,
    Extension(account): Extension<Account>,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupDetail>), ApiGroupsError> {
    validate_request(&request)?;

    let group = group_service
        .create_group(
            &account,
            &request.slug,
            &request.name,
            request.description.as_deref(),
            &request.color,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(GroupDetail::from(&group))))
}

/// Get a single group by ID.
#[utoipa::path(
    get,
    path = "/group/{group_id}",
    responses(
        (status = 200, description = "Group", body = GroupDetail),
        (status = 404, description = "Group not found"),
    ),
    tag = "Groups"
)]
pub async fn get_group_handler(
    Extension(group_service): Extension<Arc<GroupService>>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupDetail>, ApiGroupsError> {
    let group = group_service.get_group(group_id).await?;

    Ok(Json(GroupDetail::from(&group)))
}

/// Update a group's display fields (admin or manager).
#[utoipa::path(
    patch,
    path = "/group/{group_id}",
    request_body = UpdateGroupRequest,
    responses(
        (status = 200, description = "Updated group", body = GroupDetail),
        (status = 403, description = "Insufficient group role"),
        (status = 404, description = "Group not found"),
    ),
    tag = "Groups"
)]
pub async fn update_group_handler(
    Extension(group_service): Extension<Arc<GroupService>>,
    Extension(account): Extension<Account>,
    Path(group_id): Path<Uuid>,
    Json(request): Json<UpdateGroupRequest>,
) -> Result<Json<GroupDetail>, ApiGroupsError> {
    validate_request(&request)?;

    let group = group_service
        .update_group(
            &account,
            group_id,
            &request.name,
            request.description.as_deref(),
            &request.color,
        )
        .await?;

    Ok(Json(GroupDetail::from(&group)))
}

/// Archive a group (admin only).
#[utoipa::path(
    delete,
    path = "/group/{group_id}",
    responses(
        (status = 204, description = "Group archived"),
        (status = 403, description = "Insufficient group role"),
        (status = 404, description = "Group not found"),
    ),
    tag = "Groups"
)]
pub async fn archive_group_handler(
    Extension(group_service): Extension<Arc<GroupService>>,
    Extension(account): Extension<Account>,
    Path(group_id): Path<Uuid>,
) -> Result<StatusCode, ApiGroupsError> {
    group_service.archive_group(&account, group_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
