//! Services for the groups API.

pub mod group_service;
pub mod invitation_service;

pub use group_service::GroupService;
pub use invitation_service::InvitationService;
