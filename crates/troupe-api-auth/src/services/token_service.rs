//! Verification code service.
//!
//! Issues, throttles, and consumes the time-boxed single-use codes used by
//! the account verification and password reset flows. Also home of the
//! shared usability check that refresh tokens and group invitations reuse.

use crate::error::ApiAuthError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use troupe_auth::generate_verification_code;
use troupe_db::{Account, Usability, Usable, VerificationCode, VerificationKind};
use uuid::Uuid;

/// Default minimum interval between code requests, in seconds.
pub const DEFAULT_CODE_THROTTLE_SECONDS: i64 = 60;

/// Throttle information for an (account, kind) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    /// Whether enough time has elapsed since the last code was issued.
    pub valid: bool,

    /// Required delay until throttling ends, in seconds (0 when valid).
    pub delay: i64,
}

/// Validate a usable token, mapping each failure to its error.
///
/// Failures are checked in priority order: missing, already used,
/// invalidated, expired. A token that is both used and superseded therefore
/// reports "already used".
pub fn check_usable<T: Usable>(
    token: Option<&T>,
    subject: &'static str,
) -> Result<(), ApiAuthError> {
    let Some(token) = token else {
        return Err(ApiAuthError::TokenMissing { subject });
    };

    match token.usability() {
        Usability::Usable => Ok(()),
        Usability::Used => Err(ApiAuthError::TokenUsed { subject }),
        Usability::Invalidated => Err(ApiAuthError::TokenInvalidated { subject }),
        Usability::Expired => Err(ApiAuthError::TokenExpired { subject }),
    }
}

/// Compute throttle state from the last issuance time.
///
/// `valid` requires strictly more than `min_seconds` elapsed; `delay` is how
/// long the caller still has to wait.
fn compute_throttle(
    last_created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    min_seconds: i64,
) -> Throttle {
    let Some(created_at) = last_created_at else {
        return Throttle {
            valid: true,
            delay: 0,
        };
    };

    let elapsed = (now - created_at).num_seconds();

    Throttle {
        valid: elapsed > min_seconds,
        delay: (min_seconds - elapsed).max(0),
    }
}

/// Service for issuing and consuming verification codes.
#[derive(Clone)]
pub struct TokenService {
    pool: PgPool,
}

impl TokenService {
    /// Create a new verification code service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Issue a new verification code for an account.
    ///
    /// All prior live codes of the same (account, kind) pair are invalidated
    /// in the same transaction, so the delivered code is always the only one
    /// that can still be consumed.
    pub async fn create_code(
        &self,
        account_id: Uuid,
        kind: VerificationKind,
    ) -> Result<VerificationCode, ApiAuthError> {
        let code = generate_verification_code();
        let created = VerificationCode::create(&self.pool, account_id, kind, &code).await?;

        tracing::debug!(
            account_id = %account_id,
            code_id = %created.id,
            "Issued verification code"
        );

        Ok(created)
    }

    /// Look up a code by its emailed value.
    ///
    /// The returned code could be expired, invalidated, or already used;
    /// callers decide with [`check_usable`].
    pub async fn get_code(
        &self,
        code: &str,
        kind: VerificationKind,
    ) -> Result<Option<VerificationCode>, ApiAuthError> {
        Ok(VerificationCode::find_by_code(&self.pool, code, kind).await?)
    }

    /// Check whether enough time has elapsed since the last code was issued
    /// for the account.
    ///
    /// The most recent code counts regardless of its lifecycle state: an
    /// expired or consumed code still holds the resend interval.
    pub async fn check_throttle(
        &self,
        account_id: Uuid,
        kind: VerificationKind,
        min_seconds: i64,
    ) -> Result<Throttle, ApiAuthError> {
        let last = VerificationCode::find_last_for_account(&self.pool, account_id, kind).await?;

        Ok(compute_throttle(
            last.map(|code| code.created_at),
            Utc::now(),
            min_seconds,
        ))
    }

    /// Validate and consume a verification code, returning its owner.
    ///
    /// The conditional update stamping `used_at` admits exactly one caller;
    /// any repeat (or concurrent race loser) fails with "already used".
    pub async fn consume(
        &self,
        code: &str,
        kind: VerificationKind,
    ) -> Result<Account, ApiAuthError> {
        let found = self.get_code(code, kind).await?;
        check_usable(found.as_ref(), "Verification code")?;
        let Some(found) = found else {
            return Err(ApiAuthError::TokenMissing {
                subject: "Verification code",
            });
        };

        if !VerificationCode::mark_used(&self.pool, found.id).await? {
            return Err(ApiAuthError::TokenUsed {
                subject: "Verification code",
            });
        }

        let account = Account::find_by_id(&self.pool, found.account_id)
            .await?
            .ok_or_else(|| {
                ApiAuthError::Internal(format!("Account missing for code {}", found.id))
            })?;

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    mod throttle {
        use super::*;

        #[test]
        fn test_no_prior_code_is_valid() {
            let throttle = compute_throttle(None, Utc::now(), 60);
            assert_eq!(
                throttle,
                Throttle {
                    valid: true,
                    delay: 0
                }
            );
        }

        #[test]
        fn test_fresh_code_is_throttled() {
            let now = Utc::now();
            let throttle = compute_throttle(Some(now), now, 60);
            assert!(!throttle.valid);
            assert_eq!(throttle.delay, 60);
        }

        #[test]
        fn test_just_after_interval_is_valid() {
            let now = Utc::now();
            let throttle = compute_throttle(Some(now - Duration::seconds(61)), now, 60);
            assert!(throttle.valid);
            assert_eq!(throttle.delay, 0);
        }

        #[test]
        fn test_exactly_at_interval_still_throttled() {
            // valid requires strictly more than min_seconds
            let now = Utc::now();
            let throttle = compute_throttle(Some(now - Duration::seconds(60)), now, 60);
            assert!(!throttle.valid);
            assert_eq!(throttle.delay, 0);
        }

        #[test]
        fn test_partial_wait_reports_remaining_delay() {
            let now = Utc::now();
            let throttle = compute_throttle(Some(now - Duration::seconds(20)), now, 60);
            assert!(!throttle.valid);
            assert_eq!(throttle.delay, 40);
        }
    }

    mod usability {
        use super::*;
        use troupe_db::VerificationCode;

        fn test_code(
            invalidated_at: Option<DateTime<Utc>>,
            expires_at: DateTime<Utc>,
            used_at: Option<DateTime<Utc>>,
        ) -> VerificationCode {
            VerificationCode {
                id: Uuid::new_v4(),
                code: "code".to_string(),
                kind: VerificationKind::AccountVerification,
                account_id: Uuid::new_v4(),
                invalidated_at,
                expires_at,
                used_at,
                created_at: Utc::now(),
            }
        }

        #[test]
        fn test_missing_token() {
            let err = check_usable(None::<&VerificationCode>, "Verification code").unwrap_err();
            assert!(matches!(err, ApiAuthError::TokenMissing { .. }));
        }

        #[test]
        fn test_live_token_passes() {
            let code = test_code(None, Utc::now() + Duration::minutes(10), None);
            assert!(check_usable(Some(&code), "Verification code").is_ok());
        }

        #[test]
        fn test_used_beats_invalidated_and_expired() {
            let code = test_code(
                Some(Utc::now()),
                Utc::now() - Duration::minutes(1),
                Some(Utc::now()),
            );
            let err = check_usable(Some(&code), "Verification code").unwrap_err();
            assert!(matches!(err, ApiAuthError::TokenUsed { .. }));
        }

        #[test]
        fn test_invalidated_beats_expired() {
            let code = test_code(Some(Utc::now()), Utc::now() - Duration::minutes(1), None);
            let err = check_usable(Some(&code), "Verification code").unwrap_err();
            assert!(matches!(err, ApiAuthError::TokenInvalidated { .. }));
        }

        #[test]
        fn test_expired_token() {
            let code = test_code(None, Utc::now() - Duration::seconds(1), None);
            let err = check_usable(Some(&code), "Verification code").unwrap_err();
            assert!(matches!(err, ApiAuthError::TokenExpired { .. }));
        }
    }
}
