//! Account entity model.
//!
//! Represents a registered account. The password hash column is deliberately
//! absent from this struct: standard reads never select it, and the only way
//! to obtain it is the dedicated [`Account::password_hash`] query.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use troupe_core::AccountId;
use uuid::Uuid;

/// Column list for standard account reads (everything except the password
/// hash).
const ACCOUNT_COLUMNS: &str = "id, email, name, last_login_at, verified_at, created_at, updated_at";

/// A registered account.
///
/// Email uniqueness is case-insensitive, enforced by a unique index on
/// `lower(email)`.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    /// Unique identifier for the account.
    pub id: Uuid,

    /// Account email address (unique, compared case-insensitively).
    pub email: String,

    /// Account display/full name.
    pub name: Option<String>,

    /// When the account last logged in.
    pub last_login_at: Option<DateTime<Utc>>,

    /// When the account first verified its email (None until verified).
    pub verified_at: Option<DateTime<Utc>>,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Check whether the account has completed email verification.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }

    /// Get the account ID as a typed `AccountId`.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        AccountId::from_uuid(self.id)
    }

    /// Insert a new account row.
    ///
    /// The caller supplies an already-hashed password; plaintext never
    /// reaches this layer.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(&format!(
            r"
            INSERT INTO account (id, email, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {ACCOUNT_COLUMNS}
            ",
        ))
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(pool)
        .await
    }

    /// Find an account by id.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find an account by email, compared case-insensitively.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE lower(email) = lower($1)",
        ))
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Fetch the stored password hash for an account.
    ///
    /// This is the single sanctioned path to the hash; every other query in
    /// this module excludes the column.
    pub async fn password_hash(pool: &PgPool, id: Uuid) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT password_hash FROM account WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the stored password hash.
    pub async fn update_password_hash(
        pool: &PgPool,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE account SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Stamp the last-login time (helpful for support).
    pub async fn touch_last_login(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE account SET last_login_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Mark the account verified.
    ///
    /// Idempotent: the conditional update leaves an already-verified
    /// account's original `verified_at` untouched.
    pub async fn mark_verified(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            UPDATE account
            SET verified_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND verified_at IS NULL
            ",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Update the account's display name.
    pub async fn update_name(
        pool: &PgPool,
        id: Uuid,
        name: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(&format!(
            r"
            UPDATE account
            SET name = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {ACCOUNT_COLUMNS}
            ",
        ))
        .bind(name)
        .bind(id)
        .fetch_one(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_account(verified_at: Option<DateTime<Utc>>) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            name: None,
            last_login_at: None,
            verified_at,
            created_at: Utc::now() - Duration::days(1),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_verified() {
        assert!(!test_account(None).is_verified());
        assert!(test_account(Some(Utc::now())).is_verified());
    }

    #[test]
    fn test_account_id_wraps_row_id() {
        let account = test_account(None);
        assert_eq!(account.account_id().as_uuid(), &account.id);
    }

    #[test]
    fn test_standard_columns_exclude_password_hash() {
        assert!(!ACCOUNT_COLUMNS.contains("password_hash"));
    }
}
