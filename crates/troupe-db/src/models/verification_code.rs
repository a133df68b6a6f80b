//! Verification code entity model.
//!
//! Time-boxed single-use codes emailed for account verification and password
//! reset. At most one live (un-used, un-invalidated) code exists per
//! (account, kind) pair: issuing a new code invalidates all earlier live
//! codes of that pair, so the most recently delivered code always wins.

use crate::models::usable::Usable;
use chrono::{DateTime, Duration, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// The flow a verification code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "verification_kind", rename_all = "snake_case")]
pub enum VerificationKind {
    /// Email verification initiated at registration.
    AccountVerification,
    /// Password reset workflow.
    PasswordReset,
}

impl VerificationKind {
    /// Code lifetime for this flow, in seconds.
    #[must_use]
    pub fn expiry_seconds(&self) -> i64 {
        match self {
            // 10 minutes for both flows; separate arms so either can drift
            // independently.
            VerificationKind::AccountVerification => 600,
            VerificationKind::PasswordReset => 600,
        }
    }
}

/// A verification code record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct VerificationCode {
    /// Unique identifier for this code record.
    pub id: Uuid,

    /// The emailed code value (unique, exact-match lookup).
    pub code: String,

    /// Which flow this code belongs to.
    pub kind: VerificationKind,

    /// The account the code was issued for.
    pub account_id: Uuid,

    /// When the code was superseded by a newer one (None if still live).
    pub invalidated_at: Option<DateTime<Utc>>,

    /// When the code expires.
    pub expires_at: DateTime<Utc>,

    /// When the code was consumed (None if never consumed).
    pub used_at: Option<DateTime<Utc>>,

    /// When the code was created.
    pub created_at: DateTime<Utc>,
}

impl Usable for VerificationCode {
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

impl VerificationCode {
    /// Insert a new code row, invalidating all prior live codes of the same
    /// (account, kind) pair in the same transaction.
    pub async fn create(
        pool: &PgPool,
        account_id: Uuid,
        kind: VerificationKind,
        code: &str,
    ) -> Result<Self, sqlx::Error> {
        let expires_at = Utc::now() + Duration::seconds(kind.expiry_seconds());

        let mut tx = pool.begin().await?;

        // Last code wins: supersede anything still live for this pair
        sqlx::query(
            r"
            UPDATE verification_code
            SET invalidated_at = NOW()
            WHERE account_id = $1 AND kind = $2
              AND invalidated_at IS NULL AND used_at IS NULL
            ",
        )
        .bind(account_id)
        .bind(kind)
        .execute(&mut *tx)
        .await?;

        let created: Self = sqlx::query_as(
            r"
            INSERT INTO verification_code (id, code, kind, account_id, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(code)
        .bind(kind)
        .bind(account_id)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }

    /// Find a code by its value and kind, most recent first.
    pub async fn find_by_code(
        pool: &PgPool,
        code: &str,
        kind: VerificationKind,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT *
            FROM verification_code
            WHERE code = $1 AND kind = $2
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .bind(code)
        .bind(kind)
        .fetch_optional(pool)
        .await
    }

    /// Find the most recently created code for an (account, kind) pair,
    /// regardless of its lifecycle state.
    ///
    /// Used for throttling: the code could already be expired, invalidated,
    /// or used, but its `created_at` still counts against the resend
    /// interval.
    pub async fn find_last_for_account(
        pool: &PgPool,
        account_id: Uuid,
        kind: VerificationKind,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT *
            FROM verification_code
            WHERE account_id = $1 AND kind = $2
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .bind(account_id)
        .bind(kind)
        .fetch_optional(pool)
        .await
    }

    /// Conditionally stamp `used_at`, consuming the code.
    ///
    /// Returns `true` only for the caller whose update landed; a second
    /// consumption attempt sees `false`.
    pub async fn mark_used(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r"
            UPDATE verification_code
            SET used_at = NOW()
            WHERE id = $1 AND used_at IS NULL
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
    use crate::models::usable::Usability;

    #[test]
    fn test_expiry_seconds_per_kind() {
        assert_eq!(VerificationKind::AccountVerification.expiry_seconds(), 600);
        assert_eq!(VerificationKind::PasswordReset.expiry_seconds(), 600);
    }

    fn test_code(
        invalidated_at: Option<DateTime<Utc>>,
        used_at: Option<DateTime<Utc>>,
    ) -> VerificationCode {
        VerificationCode {
            id: Uuid::new_v4(),
            code: "abc123".to_string(),
            kind: VerificationKind::AccountVerification,
            account_id: Uuid::new_v4(),
            invalidated_at,
            expires_at: Utc::now() + Duration::minutes(10),
            used_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_fresh_code_usable() {
        assert!(test_code(None, None).is_usable());
    }

    #[test]
    fn test_superseded_code_invalidated() {
        let code = test_code(Some(Utc::now()), None);
        assert_eq!(code.usability(), Usability::Invalidated);
    }

    #[test]
    fn test_consumed_code_used_even_when_superseded() {
        // used_at takes priority when both stamps are present
        let code = test_code(Some(Utc::now()), Some(Utc::now()));
        assert_eq!(code.usability(), Usability::Used);
    }
}
