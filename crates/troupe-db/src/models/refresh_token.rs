//! Refresh token entity model.
//!
//! One row per issued refresh token. The `token` column holds the derived
//! lookup hash, never the plaintext value handed to the client. Rotation
//! inserts a new row and stamps the old one's `used_at`; rows are retained
//! for audit rather than deleted.

use crate::models::usable::Usable;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// A refresh token record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    /// Unique identifier for this token record.
    pub id: Uuid,

    /// Derived hash of the opaque token value (unique).
    pub token: String,

    /// The account that owns this token.
    pub account_id: Uuid,

    /// When the token was revoked (None if never revoked).
    pub invalidated_at: Option<DateTime<Utc>>,

    /// When the token expires.
    pub expires_at: DateTime<Utc>,

    /// When the token was consumed by rotation (None if never rotated).
    pub used_at: Option<DateTime<Utc>>,

    /// When the token was created.
    pub created_at: DateTime<Utc>,
}

impl Usable for RefreshToken {
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

impl RefreshToken {
    /// Insert a new refresh token row.
    pub async fn create(
        pool: &PgPool,
        account_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO refresh_token (id, token, account_id, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(token_hash)
        .bind(account_id)
        .bind(expires_at)
        .fetch_one(pool)
        .await
    }

    /// Find a token by its owner and derived hash.
    pub async fn find_by_hash(
        pool: &PgPool,
        account_id: Uuid,
        token_hash: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT *
            FROM refresh_token
            WHERE account_id = $1 AND token = $2
            ",
        )
        .bind(account_id)
        .bind(token_hash)
        .fetch_optional(pool)
        .await
    }

    /// Conditionally stamp `used_at`, consuming the token.
    ///
    /// Returns `true` only for the caller whose update actually landed.
    /// Under concurrent rotation of the same token the `used_at IS NULL`
    /// guard lets exactly one caller win; the rest see `false`.
    pub async fn mark_used(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r"
            UPDATE refresh_token
            SET used_at = NOW()
            WHERE id = $1 AND used_at IS NULL
            ",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Stamp `invalidated_at`, revoking the token.
    ///
    /// A no-op for tokens already revoked.
    pub async fn invalidate(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            UPDATE refresh_token
            SET invalidated_at = NOW()
            WHERE id = $1 AND invalidated_at IS NULL
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
    use crate::models::usable::Usability;
    use chrono::Duration;

    fn test_token(
        expires_at: DateTime<Utc>,
        invalidated_at: Option<DateTime<Utc>>,
        used_at: Option<DateTime<Utc>>,
    ) -> RefreshToken {
        RefreshToken {
            id: Uuid::new_v4(),
            token: "derived-hash".to_string(),
            account_id: Uuid::new_v4(),
            invalidated_at,
            expires_at,
            used_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_live_token_usable() {
        let token = test_token(Utc::now() + Duration::days(7), None, None);
        assert!(token.is_usable());
    }

    #[test]
    fn test_rotated_token_reports_used() {
        let token = test_token(Utc::now() + Duration::days(7), None, Some(Utc::now()));
        assert_eq!(token.usability(), Usability::Used);
    }

    #[test]
    fn test_revoked_token_reports_invalidated() {
        let token = test_token(Utc::now() + Duration::days(7), Some(Utc::now()), None);
        assert_eq!(token.usability(), Usability::Invalidated);
    }

    #[test]
    fn test_stale_token_reports_expired() {
        let token = test_token(Utc::now() - Duration::seconds(1), None, None);
        assert_eq!(token.usability(), Usability::Expired);
    }
}
