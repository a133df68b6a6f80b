//! Middleware for the account and authentication API.

mod jwt_auth;

pub use jwt_auth::{jwt_auth_middleware, CurrentAccount, JwtSecret};
