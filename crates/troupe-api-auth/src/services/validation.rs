//! Input normalization helpers shared by the auth services.

use crate::error::ApiAuthError;
use validator::Validate;

/// Normalize an email address for storage and comparison.
///
/// Lowercasing keeps inserts consistent with the case-insensitive unique
/// index on the account table.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Run `validator` derive checks on a request payload, collapsing field
/// errors into a single `Validation` error message.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), ApiAuthError> {
    request.validate().map_err(|e| {
        let errors: Vec<String> = e
            .field_errors()
            .values()
            .flat_map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(std::string::ToString::to_string))
            })
            .collect();
        ApiAuthError::Validation(errors.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoginRequest;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("TEST@EXAMPLE.COM"), "test@example.com");
        assert_eq!(normalize_email("  a@b.com  "), "a@b.com");
    }

    #[test]
    fn test_validate_request_collects_messages() {
        let request = LoginRequest {
            email: "not-an-email".to_string(),
            password: "pw".to_string(),
        };
        let err = validate_request(&request).unwrap_err();
        assert!(matches!(err, ApiAuthError::Validation(_)));
        assert!(err.to_string().contains("Invalid email format"));
    }
}
