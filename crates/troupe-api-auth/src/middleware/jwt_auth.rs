//! JWT authentication middleware and extractor.
//!
//! Two ways to require an authenticated account:
//! - [`jwt_auth_middleware`] protects a whole router; it validates the
//!   Bearer token, resolves the claims email to an account, and inserts the
//!   [`Account`] and [`Claims`] into request extensions for handlers.
//! - [`CurrentAccount`] does the same work as a per-handler extractor, for
//!   routers that mix public and protected methods on the same path.

use crate::error::ApiAuthError;
use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sqlx::PgPool;
use std::sync::Arc;
use troupe_auth::{decode_token, Claims};
use troupe_db::Account;

/// JWT signing secret made available via request extensions.
#[derive(Clone)]
pub struct JwtSecret(pub Arc<String>);

impl JwtSecret {
    /// Wrap a signing secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Arc::new(secret.into()))
    }
}

/// The authenticated account for the current request.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn get_profile_handler(
///     CurrentAccount(account): CurrentAccount,
/// ) -> Result<Json<AccountProfile>, ApiAuthError> { ... }
/// ```
pub struct CurrentAccount(pub Account);

/// Decode the bearer token in `headers` and load its account.
async fn authenticate(
    headers: &HeaderMap,
    secret: &JwtSecret,
    pool: &PgPool,
) -> Result<(Claims, Account), ApiAuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(ApiAuthError::InvalidCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or(ApiAuthError::InvalidCredentials)?;

    let claims = decode_token(token, secret.0.as_bytes()).map_err(|e| {
        tracing::debug!("Rejected bearer token: {e}");
        ApiAuthError::InvalidCredentials
    })?;

    let account = Account::find_by_email(pool, &claims.email)
        .await?
        .ok_or_else(|| {
            // A valid signature over an email with no account means the
            // account was deleted after issuance
            tracing::warn!(email = %claims.email, "Token for nonexistent account");
            ApiAuthError::InvalidCredentials
        })?;

    Ok((claims, account))
}

fn config_error(what: &str) -> Response {
    tracing::error!("{what} not configured on router");
    ApiAuthError::Internal("Server configuration error".to_string()).into_response()
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let secret = parts
            .extensions
            .get::<JwtSecret>()
            .ok_or_else(|| config_error("JWT secret"))?
            .clone();
        let pool = parts
            .extensions
            .get::<PgPool>()
            .ok_or_else(|| config_error("Database pool"))?
            .clone();

        let (_, account) = authenticate(&parts.headers, &secret, &pool)
            .await
            .map_err(IntoResponse::into_response)?;

        Ok(CurrentAccount(account))
    }
}

/// JWT authentication middleware.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Decodes and validates the JWT
/// 3. Loads the account for the claims email
/// 4. Inserts [`Claims`] and [`Account`] into request extensions
///
/// # Usage
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use troupe_api_auth::jwt_auth_middleware;
///
/// let router = groups_router(state)
///     .layer(middleware::from_fn(jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let secret = request
        .extensions()
        .get::<JwtSecret>()
        .ok_or_else(|| config_error("JWT secret"))?
        .clone();
    let pool = request
        .extensions()
        .get::<PgPool>()
        .ok_or_else(|| config_error("Database pool"))?
        .clone();

    let (claims, account) = authenticate(request.headers(), &secret, &pool)
        .await
        .map_err(IntoResponse::into_response)?;

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(account);

    Ok(next.run(request).await)
}
