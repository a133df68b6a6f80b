//! Postgres persistence layer for troupe.
//!
//! Provides the entity models (accounts, refresh tokens, verification codes,
//! groups) and embedded migrations. Every token-like entity implements the
//! shared [`models::Usable`] lifecycle.

pub mod error;
pub mod migrations;
pub mod models;

pub use error::DbError;
pub use migrations::run_migrations;
pub use models::{
    Account, Group, GroupApplicationStatus, GroupInvitation, GroupInvitationStatus, GroupMember,
    GroupMemberRole, GroupTag, RefreshToken, Usability, Usable, VerificationCode, VerificationKind,
};
