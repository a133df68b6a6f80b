//! Request and response DTOs for the groups API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use troupe_db::{Group, GroupApplicationStatus, GroupMember, GroupMemberRole, GroupTag};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Group creation request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    /// Group URL slug (lowercase letters, digits, hyphens).
    #[validate(length(min = 3, max = 64, message = "Slug must be 3-64 characters"))]
    pub slug: String,

    /// Group display name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Group description/purpose.
    #[validate(length(max = 2000, message = "Description too long"))]
    pub description: Option<String>,

    /// Group colour (visual distinction).
    #[validate(length(min = 1, max = 32, message = "Color is required"))]
    pub color: String,
}

/// Group update request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    /// Group display name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Group description/purpose.
    #[validate(length(max = 2000, message = "Description too long"))]
    pub description: Option<String>,

    /// Group colour.
    #[validate(length(min = 1, max = 32, message = "Color is required"))]
    pub color: String,
}

/// Member update request payload (role and/or tag assignment).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    /// New role for the member.
    pub role: Option<MemberRole>,

    /// Replacement tag assignment (None leaves tags untouched).
    pub tag_ids: Option<Vec<String>>,
}

/// Invitation creation request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitationRequest {
    /// Email of the account to invite.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Invitation response request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondInvitationRequest {
    /// Invitation token.
    #[validate(length(min = 1, message = "Invitation token is required"))]
    pub token: String,

    /// Whether the invitation is accepted (false rejects it).
    pub accept: bool,
}

/// Tag creation request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    /// Tag name (unique per group, must be URL-safe).
    #[validate(length(min = 1, max = 64, message = "Tag name must be 1-64 characters"))]
    pub name: String,

    /// Tag description/purpose.
    #[validate(length(max = 500, message = "Description too long"))]
    pub description: Option<String>,

    /// Tag colour.
    #[validate(length(max = 32, message = "Color too long"))]
    pub color: Option<String>,
}

/// Tag update request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagRequest {
    /// Tag description/purpose.
    #[validate(length(max = 500, message = "Description too long"))]
    pub description: Option<String>,

    /// Tag colour.
    #[validate(length(max = 32, message = "Color too long"))]
    pub color: Option<String>,
}

/// Serializable mirror of the member role enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Admin,
    Manager,
    Member,
}

impl From<MemberRole> for GroupMemberRole {
    fn from(role: MemberRole) -> Self {
        match role {
            MemberRole::Admin => GroupMemberRole::Admin,
            MemberRole::Manager => GroupMemberRole::Manager,
            MemberRole::Member => GroupMemberRole::Member,
        }
    }
}

impl From<GroupMemberRole> for MemberRole {
    fn from(role: GroupMemberRole) -> Self {
        match role {
            GroupMemberRole::Admin => MemberRole::Admin,
            GroupMemberRole::Manager => MemberRole::Manager,
            GroupMemberRole::Member => MemberRole::Member,
        }
    }
}

/// A group, as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetail {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub creator_account_id: Uuid,
    /// "pending", "approved", or "rejected".
    pub application_status: String,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&Group> for GroupDetail {
    fn from(group: &Group) -> Self {
        let application_status = match group.application_status {
            GroupApplicationStatus::Pending => "pending",
            GroupApplicationStatus::Approved => "approved",
            GroupApplicationStatus::Rejected => "rejected",
        };

        Self {
            id: group.id,
            slug: group.slug.clone(),
            name: group.name.clone(),
            description: group.description.clone(),
            color: group.color.clone(),
            creator_account_id: group.creator_account_id,
            application_status: application_status.to_string(),
            archived_at: group.archived_at,
            created_at: group.created_at,
        }
    }
}

/// A group member, as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetail {
    /// Membership row ID (not the account ID).
    pub id: Uuid,
    pub account_id: Uuid,
    pub group_id: Uuid,
    pub role: MemberRole,
    pub tag_ids: Vec<String>,
    pub joined_at: DateTime<Utc>,
}

impl From<&GroupMember> for MemberDetail {
    fn from(member: &GroupMember) -> Self {
        Self {
            id: member.id,
            account_id: member.account_id,
            group_id: member.group_id,
            role: member.role.into(),
            tag_ids: member.tag_ids.clone().unwrap_or_default(),
            joined_at: member.created_at,
        }
    }
}

/// A group tag, as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagDetail {
    pub name: String,
    pub group_id: Uuid,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl From<&GroupTag> for TagDetail {
    fn from(tag: &GroupTag) -> Self {
        Self {
            name: tag.name.clone(),
            group_id: tag.group_id,
            description: tag.description.clone(),
            color: tag.color.clone(),
        }
    }
}

/// A created invitation, as returned to the inviting manager.
///
/// The token is handed to the inviter for out-of-band delivery.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitationDetail {
    pub id: Uuid,
    pub group_id: Uuid,
    pub account_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_role_roundtrip() {
        for role in [MemberRole::Admin, MemberRole::Manager, MemberRole::Member] {
            let db_role: GroupMemberRole = role.into();
            let back: MemberRole = db_role.into();
            assert_eq!(role, back);
        }
    }

    #[test]
    fn test_create_group_request_validation() {
        let valid = CreateGroupRequest {
            slug: "chess-club".to_string(),
            name: "Chess Club".to_string(),
            description: None,
            color: "#2d6a4f".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_slug = CreateGroupRequest {
            slug: "ab".to_string(),
            ..valid
        };
        assert!(short_slug.validate().is_err());
    }
}
