//! Error types for the groups API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Error type for the groups API.
#[derive(Debug, thiserror::Error)]
pub enum ApiGroupsError {
    /// Malformed input (bad slug, empty name, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Group slug is already taken.
    #[error("Group slug is already taken")]
    SlugInUse,

    /// Tag name already exists in this group.
    #[error("Tag already exists")]
    TagInUse,

    /// Account is already an active member of the group.
    #[error("Account is already a group member")]
    AlreadyMember,

    /// Acting account lacks the required group role.
    #[error("Insufficient group role for this operation")]
    Forbidden,

    /// Authentication required.
    #[error("Authentication required")]
    Unauthorized,

    /// Group not found (or archived).
    #[error("Group not found")]
    GroupNotFound,

    /// Account not found.
    #[error("Account not found")]
    AccountNotFound,

    /// Member not found in the group.
    #[error("Member not found in group")]
    MemberNotFound,

    /// Tag not found in the group.
    #[error("Tag not found")]
    TagNotFound,

    /// Invitation not found.
    #[error("Invitation not found")]
    InvitationMissing,

    /// Invitation was already answered.
    #[error("Invitation has already been used")]
    InvitationUsed,

    /// Invitation was superseded by a newer one.
    #[error("Invitation has been invalidated")]
    InvitationInvalidated,

    /// Invitation expired before it was answered.
    #[error("Invitation has already expired")]
    InvitationExpired,

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Problem-details response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetails {
    /// HTTP status code.
    pub status: u16,

    /// Human-readable error message.
    pub message: String,
}

impl ApiGroupsError {
    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiGroupsError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiGroupsError::SlugInUse | ApiGroupsError::TagInUse | ApiGroupsError::AlreadyMember => {
                StatusCode::CONFLICT
            }
            ApiGroupsError::Forbidden => StatusCode::FORBIDDEN,
            ApiGroupsError::Unauthorized
            | ApiGroupsError::InvitationMissing
            | ApiGroupsError::InvitationUsed
            | ApiGroupsError::InvitationInvalidated
            | ApiGroupsError::InvitationExpired => StatusCode::UNAUTHORIZED,
            ApiGroupsError::GroupNotFound
            | ApiGroupsError::AccountNotFound
            | ApiGroupsError::MemberNotFound
            | ApiGroupsError::TagNotFound => StatusCode::NOT_FOUND,
            ApiGroupsError::Internal(_) | ApiGroupsError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiGroupsError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            ApiGroupsError::Internal(detail) => {
                tracing::error!("Internal error: {detail}");
                "An internal error occurred".to_string()
            }
            ApiGroupsError::Database(e) => {
                tracing::error!("Database error: {e:?}");
                "A database error occurred".to_string()
            }
            other => other.to_string(),
        };

        let problem = ProblemDetails {
            status: status.as_u16(),
            message,
        };

        (status, Json(problem)).into_response()
    }
}
