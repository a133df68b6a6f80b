//! Group entity model.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Moderation status of a group application.
///
/// New groups start pending until an operator approves or rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "group_application_status", rename_all = "snake_case")]
pub enum GroupApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

/// A community group.
#[derive(Debug, Clone, FromRow)]
pub struct Group {
    /// Unique identifier for the group.
    pub id: Uuid,

    /// Group URL slug (unique web identifier).
    pub slug: String,

    /// Group display name.
    pub name: String,

    /// Group description/purpose.
    pub description: Option<String>,

    /// Group colour (visual distinction).
    pub color: String,

    /// Account that created the group.
    pub creator_account_id: Uuid,

    /// Group application status.
    pub application_status: GroupApplicationStatus,

    /// When the group application was handled (approved/rejected).
    pub application_handled_at: Option<DateTime<Utc>>,

    /// When the group was temporarily disabled.
    pub disabled_at: Option<DateTime<Utc>>,

    /// When the group was archived.
    pub archived_at: Option<DateTime<Utc>>,

    /// When the group was created.
    pub created_at: DateTime<Utc>,

    /// When the group was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Check whether the group is live (not archived, not disabled).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.archived_at.is_none() && self.disabled_at.is_none()
    }

    /// Insert a new group row.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        name: &str,
        description: Option<&str>,
        color: &str,
        creator_account_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO troupe_group (id, slug, name, description, color, creator_account_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(slug)
        .bind(name)
        .bind(description)
        .bind(color)
        .bind(creator_account_id)
        .fetch_one(pool)
        .await
    }

    /// Find a group by id.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM troupe_group WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a group by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM troupe_group WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Update a group's display fields.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        color: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            UPDATE troupe_group
            SET name = $1, description = $2, color = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING *
            ",
        )
        .bind(name)
        .bind(description)
        .bind(color)
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Archive a group (soft delete).
    ///
    /// A no-op for groups already archived.
    pub async fn archive(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            UPDATE troupe_group
            SET archived_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND archived_at IS NULL
            ",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_group(
        disabled_at: Option<DateTime<Utc>>,
        archived_at: Option<DateTime<Utc>>,
    ) -> Group {
        Group {
            id: Uuid::new_v4(),
            slug: "chess-club".to_string(),
            name: "Chess Club".to_string(),
            description: None,
            color: "#2d6a4f".to_string(),
            creator_account_id: Uuid::new_v4(),
            application_status: GroupApplicationStatus::Pending,
            application_handled_at: None,
            disabled_at,
            archived_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_live_group_is_active() {
        assert!(test_group(None, None).is_active());
    }

    #[test]
    fn test_disabled_or_archived_group_inactive() {
        assert!(!test_group(Some(Utc::now()), None).is_active());
        assert!(!test_group(None, Some(Utc::now())).is_active());
    }
}
