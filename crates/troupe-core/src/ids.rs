//! Strongly Typed Identifiers
//!
//! This module provides type-safe identifier types for troupe.
//! Using the newtype pattern, these types prevent accidental misuse of
//! different ID types at compile time.
//!
//! # Example
//!
//! ```
//! use troupe_core::{AccountId, GroupId};
//!
//! let account = AccountId::new();
//! let group = GroupId::new();
//!
//! // Type safety: cannot pass GroupId where AccountId is expected
//! fn requires_account(id: AccountId) -> String {
//!     id.to_string()
//! }
//!
//! let result = requires_account(account);
//! // requires_account(group); // This would not compile!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for ID parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse
    pub id_type: &'static str,
    /// The underlying UUID parse error message
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed ID type
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Strongly typed identifier for accounts.
    ///
    /// Used to identify registered accounts throughout the system.
    /// Provides compile-time type safety to prevent confusion with other ID types.
    ///
    /// # Example
    ///
    /// ```
    /// use troupe_core::AccountId;
    /// use uuid::Uuid;
    ///
    /// // Create a new random AccountId
    /// let account_id = AccountId::new();
    /// println!("Account: {}", account_id);
    ///
    /// // Create from existing UUID
    /// let uuid = Uuid::new_v4();
    /// let account_id = AccountId::from_uuid(uuid);
    /// assert_eq!(account_id.as_uuid(), &uuid);
    ///
    /// // Parse from string
    /// let account_id: AccountId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
    /// ```
    AccountId
);

define_id!(
    /// Strongly typed identifier for groups.
    ///
    /// # Example
    ///
    /// ```
    /// use troupe_core::GroupId;
    ///
    /// let group_id = GroupId::new();
    /// println!("Group: {}", group_id);
    /// ```
    GroupId
);

define_id!(
    /// Strongly typed identifier for group memberships.
    ///
    /// Identifies the membership row itself, not the member account.
    ///
    /// # Example
    ///
    /// ```
    /// use troupe_core::GroupMemberId;
    ///
    /// let member_id = GroupMemberId::new();
    /// println!("Member: {}", member_id);
    /// ```
    GroupMemberId
);

#[cfg(test)]
mod tests {
    use super::*;

    mod account_id_tests {
        use super::*;

        #[test]
        fn test_new_creates_valid_id() {
            let id = AccountId::new();
            let id_str = id.to_string();
            // UUID format: 8-4-4-4-12 hex digits
            assert_eq!(id_str.len(), 36);
            assert!(id_str.contains('-'));
        }

        #[test]
        fn test_from_uuid_preserves_value() {
            let uuid = Uuid::new_v4();
            let id = AccountId::from_uuid(uuid);
            assert_eq!(id.as_uuid(), &uuid);
        }

        #[test]
        fn test_display_returns_uuid_string() {
            let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
            let id = AccountId::from_uuid(uuid);
            assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
        }

        #[test]
        fn test_default_creates_new_id() {
            let id1 = AccountId::default();
            let id2 = AccountId::default();
            // Default should create new random IDs
            assert_ne!(id1, id2);
        }

        #[test]
        fn test_parse_invalid_string_fails() {
            let result = "not-a-uuid".parse::<AccountId>();
            assert!(result.is_err());
            let err = result.unwrap_err();
            assert_eq!(err.id_type, "AccountId");
        }
    }

    mod group_id_tests {
        use super::*;

        #[test]
        fn test_roundtrip_through_string() {
            let id = GroupId::new();
            let parsed: GroupId = id.to_string().parse().unwrap();
            assert_eq!(id, parsed);
        }

        #[test]
        fn test_serde_transparent() {
            let id = GroupId::new();
            let json = serde_json::to_string(&id).unwrap();
            // Serializes as a bare UUID string, not a wrapper object
            assert_eq!(json, format!("\"{id}\""));
        }
    }
}
