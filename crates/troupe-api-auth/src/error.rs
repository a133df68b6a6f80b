//! Error types for the account and authentication API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Error type for the account and authentication API.
///
/// Login failures are deliberately uniform: an unknown email and a wrong
/// password both surface as `InvalidCredentials` so callers cannot probe
/// which addresses are registered.
#[derive(Debug, thiserror::Error)]
pub enum ApiAuthError {
    /// Malformed input (bad email, empty password, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Email is already registered.
    #[error("Email is already registered")]
    EmailInUse,

    /// Account has already completed verification.
    #[error("Account is already verified")]
    AlreadyVerified,

    /// Old password did not match during a password change.
    #[error("Incorrect old password")]
    WrongOldPassword,

    /// New password matches the account's current password.
    #[error("Password cannot match last password")]
    PasswordMatchesOld,

    /// Bad credentials (unknown email or wrong password, indistinguishable).
    #[error("Invalid authentication credentials")]
    InvalidCredentials,

    /// Token or code not found.
    #[error("{subject} not found")]
    TokenMissing {
        /// User-facing name of the credential ("Verification code", ...).
        subject: &'static str,
    },

    /// Token or code was already consumed.
    #[error("{subject} has already been used")]
    TokenUsed { subject: &'static str },

    /// Token or code was superseded or revoked.
    #[error("{subject} has been invalidated")]
    TokenInvalidated { subject: &'static str },

    /// Token or code expired before use.
    #[error("{subject} has already expired")]
    TokenExpired { subject: &'static str },

    /// Action attempted before the minimum interval elapsed.
    #[error("Wait before requesting again")]
    Throttled {
        /// Seconds the caller must wait before retrying.
        wait: i64,
    },

    /// A required resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Internal server error (hashing primitive failure, ...).
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Problem-details response body.
///
/// `code` is a stable machine-readable identifier the web app maps to
/// display strings; `wait` carries the back-off interval for throttled
/// requests.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetails {
    /// HTTP status code.
    pub status: u16,

    /// Human-readable error message.
    pub message: String,

    /// Stable error code for the web app's error map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Seconds to wait before retrying (throttled requests only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait: Option<i64>,
}

impl ApiAuthError {
    /// The stable error code for coded, user-displayable errors.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ApiAuthError::EmailInUse => Some("REGISTER__EMAIL_ALREADY_USED"),
            ApiAuthError::AlreadyVerified => Some("ACCOUNT_VERIFY__ALREADY_VERIFIED"),
            ApiAuthError::WrongOldPassword => Some("CHANGE_PASSWORD__WRONG_PASSWORD"),
            ApiAuthError::PasswordMatchesOld => Some("CHANGE_PASSWORD__PASSWORD_MATCHES_OLD"),
            _ => None,
        }
    }

    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiAuthError::Validation(_)
            | ApiAuthError::WrongOldPassword
            | ApiAuthError::PasswordMatchesOld => StatusCode::BAD_REQUEST,
            ApiAuthError::EmailInUse | ApiAuthError::AlreadyVerified => StatusCode::CONFLICT,
            ApiAuthError::InvalidCredentials
            | ApiAuthError::TokenMissing { .. }
            | ApiAuthError::TokenUsed { .. }
            | ApiAuthError::TokenInvalidated { .. }
            | ApiAuthError::TokenExpired { .. } => StatusCode::UNAUTHORIZED,
            ApiAuthError::Throttled { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiAuthError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiAuthError::Internal(_) | ApiAuthError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiAuthError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal detail stays in the logs, not in the response body
        let message = match &self {
            ApiAuthError::Internal(detail) => {
                tracing::error!("Internal error: {detail}");
                "An internal error occurred".to_string()
            }
            ApiAuthError::Database(e) => {
                tracing::error!("Database error: {e:?}");
                "A database error occurred".to_string()
            }
            other => other.to_string(),
        };

        let wait = match &self {
            ApiAuthError::Throttled { wait } => Some(*wait),
            _ => None,
        };

        let problem = ProblemDetails {
            status: status.as_u16(),
            message,
            code: self.code().map(str::to_string),
            wait,
        };

        (status, Json(problem)).into_response()
    }
}

impl From<troupe_auth::AuthError> for ApiAuthError {
    fn from(err: troupe_auth::AuthError) -> Self {
        // Hashing primitive failures are fatal; JWT failures reaching this
        // conversion mean a token we just minted failed to encode.
        ApiAuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ApiAuthError::InvalidCredentials.to_string(),
            "Invalid authentication credentials"
        );
        assert_eq!(
            ApiAuthError::TokenUsed {
                subject: "Verification code"
            }
            .to_string(),
            "Verification code has already been used"
        );
        assert_eq!(
            ApiAuthError::TokenExpired {
                subject: "Refresh token"
            }
            .to_string(),
            "Refresh token has already expired"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiAuthError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiAuthError::EmailInUse.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiAuthError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiAuthError::Throttled { wait: 42 }.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(ApiAuthError::NotFound("Account").status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_login_failures_are_uniform() {
        // Unknown email and wrong password map to the same error; there is
        // no separate variant to leak account existence.
        let unknown_email = ApiAuthError::InvalidCredentials;
        let wrong_password = ApiAuthError::InvalidCredentials;
        assert_eq!(unknown_email.status(), wrong_password.status());
        assert_eq!(unknown_email.to_string(), wrong_password.to_string());
    }

    #[test]
    fn test_coded_errors_carry_codes() {
        assert_eq!(
            ApiAuthError::EmailInUse.code(),
            Some("REGISTER__EMAIL_ALREADY_USED")
        );
        assert_eq!(
            ApiAuthError::PasswordMatchesOld.code(),
            Some("CHANGE_PASSWORD__PASSWORD_MATCHES_OLD")
        );
        assert_eq!(ApiAuthError::InvalidCredentials.code(), None);
    }

    #[test]
    fn test_throttled_carries_wait() {
        let err = ApiAuthError::Throttled { wait: 37 };
        match err {
            ApiAuthError::Throttled { wait } => assert_eq!(wait, 37),
            _ => unreachable!(),
        }
    }
}
