//! Group invitation entity model.
//!
//! Invitations reuse the usable-token lifecycle: single-use, expiring, and
//! superseded when a fresh invitation is issued for the same (group,
//! account) pair. The invited account responds by consuming the token.

use crate::models::usable::Usable;
use chrono::{DateTime, Duration, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Invitation lifetime in seconds (7 days).
pub const INVITATION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Response state of a group invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "group_invitation_status", rename_all = "snake_case")]
pub enum GroupInvitationStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A group membership invitation.
#[derive(Debug, Clone, FromRow)]
pub struct GroupInvitation {
    /// Unique identifier for this invitation.
    pub id: Uuid,

    /// Invitation token (unique, exact-match lookup).
    pub token: String,

    /// Invitation response status.
    pub status: GroupInvitationStatus,

    /// The invited account.
    pub account_id: Uuid,

    /// The inviting group.
    pub group_id: Uuid,

    /// The (inactive) membership row created alongside the invitation.
    pub group_member_id: Uuid,

    /// When the invitation was superseded (None if still live).
    pub invalidated_at: Option<DateTime<Utc>>,

    /// When the invitation expires.
    pub expires_at: DateTime<Utc>,

    /// When the invitation was responded to (None if never answered).
    pub used_at: Option<DateTime<Utc>>,

    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
}

impl Usable for GroupInvitation {
    fn invalidated_at(&self) -> Option<DateTime<Utc>> {
        self.invalidated_at
    }

    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    fn used_at(&self) -> Option<DateTime<Utc>> {
        self.used_at
    }
}

impl GroupInvitation {
    /// Insert a new invitation, superseding prior pending invitations for
    /// the same (group, account) pair in the same transaction.
    pub async fn create(
        pool: &PgPool,
        group_id: Uuid,
        account_id: Uuid,
        group_member_id: Uuid,
        token: &str,
    ) -> Result<Self, sqlx::Error> {
        let expires_at = Utc::now() + Duration::seconds(INVITATION_EXPIRY_SECONDS);

        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
            UPDATE group_invitation
            SET invalidated_at = NOW()
            WHERE group_id = $1 AND account_id = $2
              AND invalidated_at IS NULL AND used_at IS NULL
            ",
        )
        .bind(group_id)
        .bind(account_id)
        .execute(&mut *tx)
        .await?;

        let created: Self = sqlx::query_as(
            r"
            INSERT INTO group_invitation (id, token, account_id, group_id, group_member_id, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(token)
        .bind(account_id)
        .bind(group_id)
        .bind(group_member_id)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }

    /// Find an invitation by its token.
    pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM group_invitation WHERE token = $1")
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Conditionally consume the invitation, recording the response.
    ///
    /// Returns `true` only for the caller whose update landed; a second
    /// response attempt sees `false`.
    pub async fn mark_responded(
        pool: &PgPool,
        id: Uuid,
        status: GroupInvitationStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r"
            UPDATE group_invitation
            SET status = $1, used_at = NOW()
            WHERE id = $2 AND used_at IS NULL
            ",
        )
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usable::Usability;

    fn test_invitation(used_at: Option<DateTime<Utc>>) -> GroupInvitation {
        GroupInvitation {
            id: Uuid::new_v4(),
            token: "invite-token".to_string(),
            status: GroupInvitationStatus::Pending,
            account_id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            group_member_id: Uuid::new_v4(),
            invalidated_at: None,
            expires_at: Utc::now() + Duration::days(7),
            used_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_pending_invitation_usable() {
        assert!(test_invitation(None).is_usable());
    }

    #[test]
    fn test_answered_invitation_not_usable() {
        let invitation = test_invitation(Some(Utc::now()));
        assert_eq!(invitation.usability(), Usability::Used);
    }
}
