//! Services for the account and authentication API.

pub mod account_service;
pub mod auth_service;
pub mod forgot_password_service;
pub mod hashing;
pub mod mailer;
pub mod refresh_token_service;
pub mod token_service;
pub mod validation;

pub use account_service::AccountService;
pub use auth_service::AuthService;
pub use forgot_password_service::ForgotPasswordService;
pub use mailer::{LogMailer, Mailer};
pub use refresh_token_service::{JwtConfig, RefreshTokenConfig, RefreshTokenService};
pub use token_service::{check_usable, Throttle, TokenService, DEFAULT_CODE_THROTTLE_SECONDS};
pub use validation::{normalize_email, validate_request};
