//! Response DTOs for account and authentication endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use troupe_core::AccountId;
use troupe_db::Account;
use utoipa::ToSchema;
use uuid::Uuid;

/// Authentication token bundle returned by login, registration,
/// verification, and refresh.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    /// Signed JWT access token.
    pub access_token: String,

    /// Opaque refresh token (plaintext; only its hash is stored).
    pub refresh_token: String,

    /// Access token lifetime in seconds.
    pub expires_in: i64,

    /// Authenticated account ID.
    #[schema(value_type = Uuid)]
    pub account_id: AccountId,
}

/// Response for verification/reset email (re)send endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailResendResponse {
    /// Lifetime of the emailed code, in seconds.
    pub expiry: i64,

    /// Minimum interval between resend requests, in seconds.
    pub wait: i64,
}

/// An account's own profile information.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    /// Account ID.
    pub id: Uuid,

    /// Account email address.
    pub email: String,

    /// Account display/full name.
    pub name: Option<String>,

    /// When the account verified its email (None if unverified).
    pub verified_at: Option<DateTime<Utc>>,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
            verified_at: account.verified_at,
            created_at: account.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_tokens_serialize_camel_case() {
        let tokens = AuthTokens {
            access_token: "jwt".to_string(),
            refresh_token: "opaque".to_string(),
            expires_in: 900,
            account_id: AccountId::new(),
        };
        let json = serde_json::to_value(&tokens).unwrap();
        assert!(json.get("accessToken").is_some());
        assert!(json.get("refreshToken").is_some());
        assert!(json.get("expiresIn").is_some());
        assert!(json.get("accountId").is_some());
    }

    #[test]
    fn test_profile_from_account_omits_password_data() {
        let account = Account {
            id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            name: Some("A".to_string()),
            last_login_at: None,
            verified_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let profile = AccountProfile::from(&account);
        assert_eq!(profile.email, account.email);

        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("password"));
    }
}
