//! HTTP handlers for the groups API.

mod group_crud;
mod invitations;
mod members;
mod tags;

pub use group_crud::{
    archive_group_handler, create_group_handler, get_group_handler, update_group_handler,
};
pub use invitations::{create_invitation_handler, respond_invitation_handler};
pub use members::{list_members_handler, remove_member_handler, update_member_handler};
pub use tags::{archive_tag_handler, create_tag_handler, list_tags_handler, update_tag_handler};
