//! Group management service.
//!
//! Group CRUD, membership, and tag operations, with role checks on every
//! mutating path.

use crate::error::ApiGroupsError;
use sqlx::PgPool;
use troupe_db::{Account, Group, GroupMember, GroupMemberRole, GroupTag};
use uuid::Uuid;

/// Service for group management operations.
#[derive(Clone)]
pub struct GroupService {
    pool: PgPool,
}

impl GroupService {
    /// Create a new group service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Validate that a slug is URL-safe: lowercase letters, digits, hyphens.
    fn validate_slug(slug: &str) -> Result<(), ApiGroupsError> {
        let ok = !slug.is_empty()
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !slug.starts_with('-')
            && !slug.ends_with('-');

        if ok {
            Ok(())
        } else {
            Err(ApiGroupsError::Validation(
                "Slug may only contain lowercase letters, digits, and inner hyphens".to_string(),
            ))
        }
    }

    /// Load a live (non-archived) group.
    pub async fn get_group(&self, group_id: Uuid) -> Result<Group, ApiGroupsError> {
        let group = Group::find_by_id(&self.pool, group_id)
            .await?
            .filter(|g| g.archived_at.is_none())
            .ok_or(ApiGroupsError::GroupNotFound)?;

        Ok(group)
    }

    /// Load the acting account's active membership in a group.
    pub async fn require_membership(
        &self,
        group_id: Uuid,
        account: &Account,
    ) -> Result<GroupMember, ApiGroupsError> {
        GroupMember::find_active(&self.pool, group_id, account.id)
            .await?
            .ok_or(ApiGroupsError::Forbidden)
    }

    /// Load the acting account's membership and require a managing role.
    pub async fn require_manager(
        &self,
        group_id: Uuid,
        account: &Account,
    ) -> Result<GroupMember, ApiGroupsError> {
        let member = self.require_membership(group_id, account).await?;
        if !member.role.can_manage() {
            return Err(ApiGroupsError::Forbidden);
        }

        Ok(member)
    }

    /// Load the acting account's membership and require the admin role.
    pub async fn require_admin(
        &self,
        group_id: Uuid,
        account: &Account,
    ) -> Result<GroupMember, ApiGroupsError> {
        let member = self.require_membership(group_id, account).await?;
        if member.role != GroupMemberRole::Admin {
            return Err(ApiGroupsError::Forbidden);
        }

        Ok(member)
    }

    /// Create a group; the creator becomes its first admin member.
    pub async fn create_group(
        &self,
        creator: &Account,
        slug: &str,
        name: &str,
        description: Option<&str>,
        color: &str,
    ) -> Result<Group, ApiGroupsError> {
        let slug = slug.trim().to_lowercase();
        Self::validate_slug(&slug)?;

        if Group::find_by_slug(&self.pool, &slug).await?.is_some() {
            return Err(ApiGroupsError::SlugInUse);
        }

        let group = Group::create(
            &self.pool,
            &slug,
            name.trim(),
            description,
            color,
            creator.id,
        )
        .await?;
        GroupMember::create(&self.pool, group.id, creator.id, GroupMemberRole::Admin).await?;

        tracing::info!(group_id = %group.id, creator = %creator.id, "Group created");

        Ok(group)
    }

    /// Update a group's display fields (admin or manager).
    pub async fn update_group(
        &self,
        acting: &Account,
        group_id: Uuid,
        name: &str,
        description: Option<&str>,
        color: &str,
    ) -> Result<Group, ApiGroupsError> {
        self.get_group(group_id).await?;
        self.require_manager(group_id, acting).await?;

        Ok(Group::update(&self.pool, group_id, name.trim(), description, color).await?)
    }

    /// Archive a group (admin only).
    pub async fn archive_group(
        &self,
        acting: &Account,
        group_id: Uuid,
    ) -> Result<(), ApiGroupsError> {
        self.get_group(group_id).await?;
        self.require_admin(group_id, acting).await?;

        Group::archive(&self.pool, group_id).await?;

        tracing::info!(group_id = %group_id, "Group archived");

        Ok(())
    }

    /// List a group's active members (members only).
    pub async fn list_members(
        &self,
        acting: &Account,
        group_id: Uuid,
    ) -> Result<Vec<GroupMember>, ApiGroupsError> {
        self.get_group(group_id).await?;
        self.require_membership(group_id, acting).await?;

        Ok(GroupMember::list_active(&self.pool, group_id).await?)
    }

    /// Change a member's role (admin only) and/or tag assignment
    /// (admin or manager).
    pub async fn update_member(
        &self,
        acting: &Account,
        group_id: Uuid,
        member_account_id: Uuid,
        role: Option<GroupMemberRole>,
        tag_ids: Option<&[String]>,
    ) -> Result<GroupMember, ApiGroupsError> {
        self.get_group(group_id).await?;
        self.require_manager(group_id, acting).await?;

        let mut member = GroupMember::find_active(&self.pool, group_id, member_account_id)
            .await?
            .ok_or(ApiGroupsError::MemberNotFound)?;

        if let Some(role) = role {
            // Only admins may hand out roles
            self.require_admin(group_id, acting).await?;
            member = GroupMember::update_role(&self.pool, member.id, role).await?;
        }

        if let Some(tag_ids) = tag_ids {
            // Every assigned tag must exist in this group
            for name in tag_ids {
                GroupTag::find(&self.pool, group_id, name)
                    .await?
                    .ok_or(ApiGroupsError::TagNotFound)?;
            }

            member = GroupMember::update_tags(&self.pool, member.id, Some(tag_ids)).await?;
        }

        Ok(member)
    }

    /// Remove a member from a group.
    ///
    /// Managers may remove others; any member may remove themselves.
    pub async fn remove_member(
        &self,
        acting: &Account,
        group_id: Uuid,
        member_account_id: Uuid,
    ) -> Result<(), ApiGroupsError> {
        self.get_group(group_id).await?;

        if acting.id != member_account_id {
            self.require_manager(group_id, acting).await?;
        } else {
            self.require_membership(group_id, acting).await?;
        }

        let member = GroupMember::find_active(&self.pool, group_id, member_account_id)
            .await?
            .ok_or(ApiGroupsError::MemberNotFound)?;

        GroupMember::remove(&self.pool, member.id).await?;

        tracing::info!(
            group_id = %group_id,
            account_id = %member_account_id,
            "Group member removed"
        );

        Ok(())
    }

    /// List a group's tags (members only).
    pub async fn list_tags(
        &self,
        acting: &Account,
        group_id: Uuid,
    ) -> Result<Vec<GroupTag>, ApiGroupsError> {
        self.get_group(group_id).await?;
        self.require_membership(group_id, acting).await?;

        Ok(GroupTag::list(&self.pool, group_id).await?)
    }

    /// Create a tag (admin only).
    pub async fn create_tag(
        &self,
        acting: &Account,
        group_id: Uuid,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<GroupTag, ApiGroupsError> {
        self.get_group(group_id).await?;
        self.require_admin(group_id, acting).await?;

        let name = name.trim().to_lowercase();
        Self::validate_slug(&name).map_err(|_| {
            ApiGroupsError::Validation(
                "Tag name may only contain lowercase letters, digits, and inner hyphens"
                    .to_string(),
            )
        })?;

        if GroupTag::find(&self.pool, group_id, &name).await?.is_some() {
            return Err(ApiGroupsError::TagInUse);
        }

        Ok(GroupTag::create(&self.pool, group_id, &name, description, color).await?)
    }

    /// Update a tag (admin only).
    pub async fn update_tag(
        &self,
        acting: &Account,
        group_id: Uuid,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<GroupTag, ApiGroupsError> {
        self.get_group(group_id).await?;
        self.require_admin(group_id, acting).await?;

        GroupTag::find(&self.pool, group_id, name)
            .await?
            .ok_or(ApiGroupsError::TagNotFound)?;

        Ok(GroupTag::update(&self.pool, group_id, name, description, color).await?)
    }

    /// Archive a tag (admin only).
    pub async fn archive_tag(
        &self,
        acting: &Account,
        group_id: Uuid,
        name: &str,
    ) -> Result<(), ApiGroupsError> {
        self.get_group(group_id).await?;
        self.require_admin(group_id, acting).await?;

        if !GroupTag::archive(&self.pool, group_id, name).await? {
            return Err(ApiGroupsError::TagNotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(GroupService::validate_slug("chess-club").is_ok());
        assert!(GroupService::validate_slug("club42").is_ok());

        assert!(GroupService::validate_slug("").is_err());
        assert!(GroupService::validate_slug("Chess").is_err());
        assert!(GroupService::validate_slug("chess club").is_err());
        assert!(GroupService::validate_slug("-chess").is_err());
        assert!(GroupService::validate_slug("chess-").is_err());
    }
}
