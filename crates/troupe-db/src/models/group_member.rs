//! Group membership entity model.
//!
//! Links an account to a group with a role. Removal is soft (`removed_at`),
//! so past membership remains auditable.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Role of a member within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "group_member_role", rename_all = "snake_case")]
pub enum GroupMemberRole {
    Admin,
    Manager,
    Member,
}

impl GroupMemberRole {
    /// Check whether this role may manage the group (members, invitations).
    #[must_use]
    pub fn can_manage(&self) -> bool {
        matches!(self, GroupMemberRole::Admin | GroupMemberRole::Manager)
    }
}

/// A group membership row.
#[derive(Debug, Clone, FromRow)]
pub struct GroupMember {
    /// Membership ID (not the account ID).
    pub id: Uuid,

    /// The member account.
    pub account_id: Uuid,

    /// The group.
    pub group_id: Uuid,

    /// Member role within the group.
    pub role: GroupMemberRole,

    /// Tags assigned to this member (names of group tags).
    pub tag_ids: Option<Vec<String>>,

    /// When the member was removed from the group (None if still active).
    pub removed_at: Option<DateTime<Utc>>,

    /// When the membership was created.
    pub created_at: DateTime<Utc>,

    /// When the membership was last updated.
    pub updated_at: DateTime<Utc>,
}

impl GroupMember {
    /// Check whether the membership is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.removed_at.is_none()
    }

    /// Insert a membership row.
    pub async fn create(
        pool: &PgPool,
        group_id: Uuid,
        account_id: Uuid,
        role: GroupMemberRole,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO group_member (id, account_id, group_id, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(account_id)
        .bind(group_id)
        .bind(role)
        .fetch_one(pool)
        .await
    }

    /// Insert an inactive membership row (used while an invitation is
    /// pending; acceptance restores it).
    pub async fn create_inactive(
        pool: &PgPool,
        group_id: Uuid,
        account_id: Uuid,
        role: GroupMemberRole,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO group_member (id, account_id, group_id, role, removed_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(account_id)
        .bind(group_id)
        .bind(role)
        .fetch_one(pool)
        .await
    }

    /// Clear `removed_at`, (re)activating the membership.
    pub async fn restore(pool: &PgPool, id: Uuid) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            UPDATE group_member
            SET removed_at = NULL, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Find the most recent membership row of an account in a group,
    /// regardless of whether it is active.
    pub async fn find_latest(
        pool: &PgPool,
        group_id: Uuid,
        account_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT *
            FROM group_member
            WHERE group_id = $1 AND account_id = $2
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .bind(group_id)
        .bind(account_id)
        .fetch_optional(pool)
        .await
    }

    /// Find a membership row by id.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM group_member WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the active membership of an account in a group.
    pub async fn find_active(
        pool: &PgPool,
        group_id: Uuid,
        account_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT *
            FROM group_member
            WHERE group_id = $1 AND account_id = $2 AND removed_at IS NULL
            ",
        )
        .bind(group_id)
        .bind(account_id)
        .fetch_optional(pool)
        .await
    }

    /// List the active members of a group.
    pub async fn list_active(pool: &PgPool, group_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT *
            FROM group_member
            WHERE group_id = $1 AND removed_at IS NULL
            ORDER BY created_at
            ",
        )
        .bind(group_id)
        .fetch_all(pool)
        .await
    }

    /// Change a member's role.
    pub async fn update_role(
        pool: &PgPool,
        id: Uuid,
        role: GroupMemberRole,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            UPDATE group_member
            SET role = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            ",
        )
        .bind(role)
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Replace a member's assigned tag names.
    pub async fn update_tags(
        pool: &PgPool,
        id: Uuid,
        tag_ids: Option<&[String]>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            UPDATE group_member
            SET tag_ids = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            ",
        )
        .bind(tag_ids)
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Soft-remove a member from a group.
    ///
    /// Returns `true` if the member was active and is now removed.
    pub async fn remove(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r"
            UPDATE group_member
            SET removed_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND removed_at IS NULL
            ",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_can_manage() {
        assert!(GroupMemberRole::Admin.can_manage());
        assert!(GroupMemberRole::Manager.can_manage());
        assert!(!GroupMemberRole::Member.can_manage());
    }

    #[test]
    fn test_is_active() {
        let member = GroupMember {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            role: GroupMemberRole::Member,
            tag_ids: None,
            removed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(member.is_active());

        let removed = GroupMember {
            removed_at: Some(Utc::now()),
            ..member
        };
        assert!(!removed.is_active());
    }
}
