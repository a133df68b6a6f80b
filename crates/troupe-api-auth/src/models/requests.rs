//! Request DTOs for account and authentication endpoints.

use serde::{Deserialize, Serialize};
use troupe_core::AccountId;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Account creation request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreateRequest {
    /// Account email address.
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 255, message = "Email too long"))]
    pub email: String,

    /// Account display/full name.
    #[validate(length(max = 255, message = "Name too long"))]
    pub name: Option<String>,

    /// Account password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Account profile update request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdateRequest {
    /// New display/full name.
    #[validate(length(max = 255, message = "Name too long"))]
    pub name: Option<String>,
}

/// Account verification request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountVerifyRequest {
    /// Verification code from email.
    #[validate(length(min = 1, message = "Verification code is required"))]
    pub code: String,
}

/// Verification resend request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountVerifyResendRequest {
    /// Account email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Login request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Account password.
    /// Length cap prevents `DoS` via extremely long passwords that would
    /// consume excessive CPU during hashing.
    #[validate(length(min = 1, max = 1024, message = "Password must be 1-1024 characters"))]
    pub password: String,
}

/// Change authenticated account's password.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password for verification.
    ///
    /// Only needs to match the stored hash; it may predate the current
    /// password rules.
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    /// New password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub new_password: String,
}

/// Forgot-password request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    /// Account email to send the password reset code to.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Forgot-password reset payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResetRequest {
    /// Password reset code from email.
    #[validate(length(min = 1, message = "Password reset code is required"))]
    pub code: String,

    /// New password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Use a refresh token to obtain a new token bundle.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    /// Account the refresh token belongs to.
    #[schema(value_type = Uuid)]
    pub account_id: AccountId,

    /// Refresh token from a previous authentication response.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Revoke a refresh token.
pub type RefreshTokenRevokeRequest = RefreshTokenRequest;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_create_validation() {
        let valid = AccountCreateRequest {
            email: "test@example.com".to_string(),
            name: Some("Test".to_string()),
            password: "SecureP@ss123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid_email = AccountCreateRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(invalid_email.validate().is_err());

        let short_password = AccountCreateRequest {
            password: "short".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_login_request_requires_password() {
        let request = LoginRequest {
            email: "test@example.com".to_string(),
            password: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_refresh_request_field_names_are_camel_case() {
        let request = RefreshTokenRequest {
            account_id: AccountId::new(),
            refresh_token: "tok".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("accountId"));
        assert!(json.contains("refreshToken"));
    }
}
