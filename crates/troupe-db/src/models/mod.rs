//! Database entity models for troupe-db.
//!
//! These models represent the database tables and provide
//! type-safe interactions with PostgreSQL.

pub mod account;
pub mod group;
pub mod group_invitation;
pub mod group_member;
pub mod group_tag;
pub mod refresh_token;
pub mod usable;
pub mod verification_code;

pub use account::Account;
pub use group::{Group, GroupApplicationStatus};
pub use group_invitation::{GroupInvitation, GroupInvitationStatus, INVITATION_EXPIRY_SECONDS};
pub use group_member::{GroupMember, GroupMemberRole};
pub use group_tag::GroupTag;
pub use refresh_token::RefreshToken;
pub use usable::{Usability, Usable};
pub use verification_code::{VerificationCode, VerificationKind};
