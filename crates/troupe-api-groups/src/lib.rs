//! Groups API for troupe.
//!
//! A thin CRUD layer over groups, membership, invitations, and tags.
//! Invitations reuse the shared usable-token lifecycle from `troupe-db`.

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
mod validation;

// Re-export public API
pub use error::ApiGroupsError;
pub use models::{
    CreateGroupRequest, CreateInvitationRequest, CreateTagRequest, GroupDetail, InvitationDetail,
    MemberDetail, MemberRole, RespondInvitationRequest, TagDetail, UpdateGroupRequest,
    UpdateMemberRequest, UpdateTagRequest,
};
pub use router::{groups_router, GroupsState};
pub use services::{GroupService, InvitationService};
