//! Groups router configuration.
//!
//! Configures routes for:
//! - POST /group
//! - GET /group/:group_id
//! - PATCH /group/:group_id
//! - DELETE /group/:group_id
//! - GET /group/:group_id/member
//! - PATCH /group/:group_id/member/:account_id
//! - DELETE /group/:group_id/member/:account_id
//! - POST /group/:group_id/invitation
//! - POST /group/invitation/respond
//! - GET /group/:group_id/tag
//! - POST /group/:group_id/tag
//! - PATCH /group/:group_id/tag/:name
//! - DELETE /group/:group_id/tag/:name
//!
//! Every route expects an authenticated account; the application wires the
//! JWT middleware around this router.

use crate::handlers::{
    archive_group_handler, archive_tag_handler, create_group_handler, create_invitation_handler,
    create_tag_handler, get_group_handler, list_members_handler, list_tags_handler,
    remove_member_handler, respond_invitation_handler, update_group_handler,
    update_member_handler, update_tag_handler,
};
use crate::services::{GroupService, InvitationService};
use axum::routing::{delete, get, patch, post};
use axum::{Extension, Router};
use sqlx::PgPool;
use std::sync::Arc;

/// Application state for group routes.
#[derive(Clone)]
pub struct GroupsState {
    /// Database connection pool.
    pub pool: PgPool,
    /// Group service.
    pub group_service: Arc<GroupService>,
    /// Invitation service.
    pub invitation_service: Arc<InvitationService>,
}

/// Create the `/group` router.
pub fn groups_router(state: GroupsState) -> Router {
    Router::new()
        .route("/", post(create_group_handler))
        .route("/:group_id", get(get_group_handler))
        .route("/:group_id", patch(update_group_handler))
        .route("/:group_id", delete(archive_group_handler))
        .route("/:group_id/member", get(list_members_handler))
        .route("/:group_id/member/:account_id", patch(update_member_handler))
        .route(
            "/:group_id/member/:account_id",
            delete(remove_member_handler),
        )
        .route("/:group_id/invitation", post(create_invitation_handler))
        .route("/invitation/respond", post(respond_invitation_handler))
        .route("/:group_id/tag", get(list_tags_handler))
        .route("/:group_id/tag", post(create_tag_handler))
        .route("/:group_id/tag/:name", patch(update_tag_handler))
        .route("/:group_id/tag/:name", delete(archive_tag_handler))
        .layer(Extension(state.pool))
        .layer(Extension(state.group_service))
        .layer(Extension(state.invitation_service))
}
