//! Request validation helper for the groups API.

use crate::error::ApiGroupsError;
use validator::Validate;

/// Run `validator` derive checks on a request payload, collapsing field
/// errors into a single `Validation` error message.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), ApiGroupsError> {
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
        ApiGroupsError::Validation(errors.join(", "))
    })
}
