//! HTTP handlers for the account and authentication API.

mod forgot_password;
mod login;
mod password_change;
mod profile;
mod refresh;
mod register;
mod reset_password;
mod revoke;
mod verify;

pub use forgot_password::forgot_password_handler;
pub use login::login_handler;
pub use password_change::change_password_handler;
pub use profile::{get_profile_handler, update_profile_handler};
pub use refresh::refresh_handler;
pub use register::create_account_handler;
pub use reset_password::reset_password_handler;
pub use revoke::revoke_handler;
pub use verify::{verify_account_handler, verify_resend_handler};
