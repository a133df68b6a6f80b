//! Group tag endpoint handlers.
//!
//! GET /group/:id/tag - List tags.
//! POST /group/:id/tag - Create a tag.
//! PATCH /group/:id/tag/:name - Update a tag.
//! DELETE /group/:id/tag/:name - Archive a tag.

use crate::error::ApiGroupsError;
use crate::models::{CreateTagRequest, TagDetail, UpdateTagRequest};
use crate::services::GroupService;
use crate::validation::validate_request;
use axum::{extract::Path, http::StatusCode, Extension, Json};
use std::sync::Arc;
use troupe_db::Account;
use uuid::Uuid;

/// List a group's tags.
#[utoipa::path(
    get,
    path = "/group/{group_id}/tag",
    responses(
        (status = 200, description = "Tags", body = [TagDetail]),
        (status = 403, description = "Not a member of this group"),
        (status = 404, description = "Group not found"),
    ),
    tag = "Groups"
)]
pub async fn list_tags_handler(
    Extension(group_service): Extension<Arc<GroupService>>,
    Extension(account): Extension<Account>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<TagDetail>>, ApiGroupsError> {
    let tags = group_service.list_tags(&account, group_id).await?;

    Ok(Json(tags.iter().map(TagDetail::from).collect()))
}

/// Create a tag (admin only).
#[utoipa::path(
    post,
    path = "/group/{group_id}/tag",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created", body = TagDetail),
        (status = 403, description = "Insufficient group role"),
        (status = 409, description = "Tag name already exists"),
    ),
    tag = "Groups"
)]
pub async fn create_tag_handler(
    Extension(group_service): Extension<Arc<GroupService>>,
    Extension(account): Extension<Account>,
    Path(group_id): Path<Uuid>,
    Json(request): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagDetail>), ApiGroupsError> {
    validate_request(&request)?;

    let tag = group_service
        .create_tag(
            &account,
            group_id,
            &request.name,
            request.description.as_deref(),
            request.color.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(TagDetail::from(&tag))))
}

/// Update a tag (admin only).
#[utoipa::path(
    patch,
    path = "/group/{group_id}/tag/{name}",
    request_body = UpdateTagRequest,
    responses(
        (status = 200, description = "Updated tag", body = TagDetail),
        (status = 403, description = "Insufficient group role"),
        (status = 404, description = "Group or tag not found"),
    ),
    tag = "Groups"
)]
pub async fn update_tag_handler(
    Extension(group_service): Extension<Arc<GroupService>>,
    Extension(account): Extension<Account>,
    Path((group_id, name)): Path<(Uuid, String)>,
    Json(request): Json<UpdateTagRequest>,
) -> Result<Json<TagDetail>, ApiGroupsError> {
    validate_request(&request)?;

    let tag = group_service
        .update_tag(
            &account,
            group_id,
            &name,
            request.description.as_deref(),
            request.color.as_deref(),
        )
        .await?;

    Ok(Json(TagDetail::from(&tag)))
}

/// Archive a tag (admin only).
#[utoipa::path(
    delete,
    path = "/group/{group_id}/tag/{name}",
    responses(
        (status = 204, description = "Tag archived"),
        (status = 403, description = "Insufficient group role"),
        (status = 404, description = "Group or tag not found"),
    ),
    tag = "Groups"
)]
pub async fn archive_tag_handler(
    Extension(group_service): Extension<Arc<GroupService>>,
    Extension(account): Extension<Account>,
    Path((group_id, name)): Path<(Uuid, String)>,
) -> Result<StatusCode, ApiGroupsError> {
    group_service.archive_tag(&account, group_id, &name).await?;

    Ok(StatusCode::NO_CONTENT)
}
