//! Group tag entity model.
//!
//! Tags are labels a group defines for its members. Identified by
//! (name, group_id); archival is soft.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// A tag defined by a group.
#[derive(Debug, Clone, FromRow)]
pub struct GroupTag {
    /// Tag name (unique per group, must be URL-safe).
    pub name: String,

    /// The group this tag belongs to.
    pub group_id: Uuid,

    /// Tag description/purpose.
    pub description: Option<String>,

    /// Tag colour (visual distinction).
    pub color: Option<String>,

    /// When the tag was archived.
    pub archived_at: Option<DateTime<Utc>>,

    /// When the tag was created.
    pub created_at: DateTime<Utc>,

    /// When the tag was last updated.
    pub updated_at: DateTime<Utc>,
}

impl GroupTag {
    /// Insert a new tag row.
    pub async fn create(
        pool: &PgPool,
        group_id: Uuid,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO group_tag (name, group_id, description, color)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(name)
        .bind(group_id)
        .bind(description)
        .bind(color)
        .fetch_one(pool)
        .await
    }

    /// Find a tag by its group and name.
    pub async fn find(
        pool: &PgPool,
        group_id: Uuid,
        name: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM group_tag WHERE group_id = $1 AND name = $2")
            .bind(group_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List a group's unarchived tags.
    pub async fn list(pool: &PgPool, group_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT *
            FROM group_tag
            WHERE group_id = $1 AND archived_at IS NULL
            ORDER BY name
            ",
        )
        .bind(group_id)
        .fetch_all(pool)
        .await
    }

    /// Update a tag's description and colour.
    pub async fn update(
        pool: &PgPool,
        group_id: Uuid,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            UPDATE group_tag
            SET description = $1, color = $2, updated_at = NOW()
            WHERE group_id = $3 AND name = $4
            RETURNING *
            ",
        )
        .bind(description)
        .bind(color)
        .bind(group_id)
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Archive a tag (soft delete).
    ///
    /// Returns `true` if the tag was live and is now archived.
    pub async fn archive(pool: &PgPool, group_id: Uuid, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r"
            UPDATE group_tag
            SET archived_at = NOW(), updated_at = NOW()
            WHERE group_id = $1 AND name = $2 AND archived_at IS NULL
            ",
        )
        .bind(group_id)
        .bind(name)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
