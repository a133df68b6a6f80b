//! Integration tests for the account, verification, and token flows.
//!
//! Ignored by default; run with `cargo test -- --ignored` against a
//! disposable Postgres pointed to by `DATABASE_URL`.

mod common;

use common::{create_services, unique_email};
use troupe_api_auth::ApiAuthError;
use troupe_db::{Account, Usable, VerificationCode, VerificationKind};

const PASSWORD: &str = "Secret!1password";

#[tokio::test]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn register_verify_and_login_flow() {
    let services = create_services().await;
    let email = unique_email("register");

    // Registration returns a token bundle and leaves the account unverified
    let tokens = services
        .accounts
        .create_account(&email, Some("Test Person"), PASSWORD)
        .await
        .unwrap();
    assert_eq!(tokens.expires_in, 900);

    let account = Account::find_by_email(&services.pool, &email)
        .await
        .unwrap()
        .unwrap();
    assert!(!account.is_verified());

    // Duplicate registration conflicts, case-insensitively
    let err = services
        .accounts
        .create_account(&email.to_uppercase(), None, PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiAuthError::EmailInUse));

    // Verify with the issued code
    let code = VerificationCode::find_last_for_account(
        &services.pool,
        account.id,
        VerificationKind::AccountVerification,
    )
    .await
    .unwrap()
    .unwrap();

    services.accounts.verify_account(&code.code).await.unwrap();

    let account = Account::find_by_id(&services.pool, account.id)
        .await
        .unwrap()
        .unwrap();
    assert!(account.is_verified());

    // A consumed code cannot be consumed twice
    let err = services
        .accounts
        .verify_account(&code.code)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiAuthError::AlreadyVerified));

    // Login works with the right password
    let tokens = services.auth.login(&email, PASSWORD).await.unwrap();
    assert_eq!(*tokens.account_id.as_uuid(), account.id);
}

#[tokio::test]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn login_failures_are_indistinguishable() {
    let services = create_services().await;
    let email = unique_email("login");

    services
        .accounts
        .create_account(&email, None, PASSWORD)
        .await
        .unwrap();

    let wrong_password = services
        .auth
        .login(&email, "wrong-password")
        .await
        .unwrap_err();
    let unknown_email = services
        .auth
        .login(&unique_email("nobody"), PASSWORD)
        .await
        .unwrap_err();

    // Same kind, same message: no email enumeration through login
    assert!(matches!(wrong_password, ApiAuthError::InvalidCredentials));
    assert!(matches!(unknown_email, ApiAuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn new_code_invalidates_prior_codes() {
    let services = create_services().await;
    let email = unique_email("invalidate");

    services
        .accounts
        .create_account(&email, None, PASSWORD)
        .await
        .unwrap();
    let account = Account::find_by_email(&services.pool, &email)
        .await
        .unwrap()
        .unwrap();

    let kind = VerificationKind::PasswordReset;
    let first = services.codes.create_code(account.id, kind).await.unwrap();
    let second = services.codes.create_code(account.id, kind).await.unwrap();

    // The superseded code is invalidated, the fresh one is live
    let first = services
        .codes
        .get_code(&first.code, kind)
        .await
        .unwrap()
        .unwrap();
    assert!(first.is_invalidated());

    let err = services.codes.consume(&first.code, kind).await.unwrap_err();
    assert!(matches!(err, ApiAuthError::TokenInvalidated { .. }));

    let consumed = services
        .codes
        .consume(&second.code, kind)
        .await
        .unwrap();
    assert_eq!(consumed.id, account.id);

    // Second consumption of the same code fails with "already used"
    let err = services
        .codes
        .consume(&second.code, kind)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiAuthError::TokenUsed { .. }));
}

#[tokio::test]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn resend_is_throttled() {
    let services = create_services().await;
    let email = unique_email("throttle");

    // Registration already issued a verification code moments ago
    services
        .accounts
        .create_account(&email, None, PASSWORD)
        .await
        .unwrap();

    let err = services
        .accounts
        .verify_account_resend(&email)
        .await
        .unwrap_err();
    match err {
        ApiAuthError::Throttled { wait } => {
            assert!(wait > 0 && wait <= 60, "unexpected wait: {wait}");
        }
        other => panic!("expected Throttled, got {other:?}"),
    }

    // Unknown email is a NotFound for this endpoint
    let err = services
        .accounts
        .verify_account_resend(&unique_email("nobody"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiAuthError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn refresh_token_rotation_is_single_use() {
    let services = create_services().await;
    let email = unique_email("rotate");

    let tokens = services
        .accounts
        .create_account(&email, None, PASSWORD)
        .await
        .unwrap();
    let account_id = *tokens.account_id.as_uuid();

    // First rotation succeeds and yields a usable replacement
    let rotated = services
        .refresh_tokens
        .rotate(account_id, &tokens.refresh_token)
        .await
        .unwrap();
    assert_ne!(rotated.refresh_token, tokens.refresh_token);

    // Replaying the consumed token fails with "already used"
    let err = services
        .refresh_tokens
        .rotate(account_id, &tokens.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiAuthError::TokenUsed { .. }));

    // The replacement token rotates fine
    services
        .refresh_tokens
        .rotate(account_id, &rotated.refresh_token)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn concurrent_rotation_has_one_winner() {
    let services = create_services().await;
    let email = unique_email("race");

    let tokens = services
        .accounts
        .create_account(&email, None, PASSWORD)
        .await
        .unwrap();
    let account_id = *tokens.account_id.as_uuid();

    let (a, b) = tokio::join!(
        services
            .refresh_tokens
            .rotate(account_id, &tokens.refresh_token),
        services
            .refresh_tokens
            .rotate(account_id, &tokens.refresh_token),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one concurrent rotation may win");

    let loser = if a.is_err() { a } else { b };
    assert!(matches!(
        loser.unwrap_err(),
        ApiAuthError::TokenUsed { .. }
    ));
}

#[tokio::test]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn revoked_token_cannot_rotate_and_revoke_is_idempotent() {
    let services = create_services().await;
    let email = unique_email("revoke");

    let tokens = services
        .accounts
        .create_account(&email, None, PASSWORD)
        .await
        .unwrap();
    let account_id = *tokens.account_id.as_uuid();

    services
        .refresh_tokens
        .revoke(account_id, &tokens.refresh_token)
        .await
        .unwrap();

    let err = services
        .refresh_tokens
        .rotate(account_id, &tokens.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiAuthError::TokenInvalidated { .. }));

    // Revoking again, or revoking garbage, is a silent no-op
    services
        .refresh_tokens
        .revoke(account_id, &tokens.refresh_token)
        .await
        .unwrap();
    services
        .refresh_tokens
        .revoke(account_id, "never-issued-token")
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn forgot_password_masks_unknown_email() {
    let services = create_services().await;
    let email = unique_email("ghost");

    let response = services.forgot_password.request(&email).await.unwrap();
    assert_eq!(response.expiry, 600);
    assert_eq!(response.wait, 60);

    // No code row was created for the unknown address
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM verification_code vc
         JOIN account a ON a.id = vc.account_id
         WHERE lower(a.email) = lower($1)",
    )
    .bind(&email)
    .fetch_one(&services.pool)
    .await
    .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn password_reset_and_reuse_rules() {
    let services = create_services().await;
    let email = unique_email("reset");

    services
        .accounts
        .create_account(&email, None, PASSWORD)
        .await
        .unwrap();
    let account = Account::find_by_email(&services.pool, &email)
        .await
        .unwrap()
        .unwrap();

    let code = services
        .codes
        .create_code(account.id, VerificationKind::PasswordReset)
        .await
        .unwrap();

    // Resetting to the current password violates the reuse rule
    let err = services
        .forgot_password
        .reset(&code.code, PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiAuthError::PasswordMatchesOld));

    // A fresh code resets to a new value, after which login uses it
    let code = services
        .codes
        .create_code(account.id, VerificationKind::PasswordReset)
        .await
        .unwrap();
    services
        .forgot_password
        .reset(&code.code, "Brand-new!2password")
        .await
        .unwrap();

    services
        .auth
        .login(&email, "Brand-new!2password")
        .await
        .unwrap();
    let err = services.auth.login(&email, PASSWORD).await.unwrap_err();
    assert!(matches!(err, ApiAuthError::InvalidCredentials));
}

#[tokio::test]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn change_password_checks_old_and_reuse() {
    let services = create_services().await;
    let email = unique_email("change");

    services
        .accounts
        .create_account(&email, None, PASSWORD)
        .await
        .unwrap();
    let account = Account::find_by_email(&services.pool, &email)
        .await
        .unwrap()
        .unwrap();

    let err = services
        .auth
        .change_password(&account, "not-the-password", "Another!3password")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiAuthError::WrongOldPassword));

    let err = services
        .auth
        .change_password(&account, PASSWORD, PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiAuthError::PasswordMatchesOld));

    services
        .auth
        .change_password(&account, PASSWORD, "Another!3password")
        .await
        .unwrap();
    services
        .auth
        .login(&email, "Another!3password")
        .await
        .unwrap();
}
