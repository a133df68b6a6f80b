//! Request and response DTOs for the account and authentication API.

mod requests;
mod responses;

pub use requests::{
    AccountCreateRequest, AccountUpdateRequest, AccountVerifyRequest, AccountVerifyResendRequest,
    ChangePasswordRequest, ForgotPasswordRequest, ForgotPasswordResetRequest, LoginRequest,
    RefreshTokenRequest, RefreshTokenRevokeRequest,
};
pub use responses::{AccountProfile, AuthTokens, EmailResendResponse};
