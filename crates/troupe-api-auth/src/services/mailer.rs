//! Outbound email notifications.
//!
//! Delivery is a fire-and-forget side effect: failures are logged and
//! discarded, never surfaced to the request that triggered them. The
//! tracing-backed implementation stands in for a real provider and makes
//! codes visible in development logs.

use async_trait::async_trait;

/// Sender for account-related notification emails.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an account verification code.
    async fn send_account_verification(&self, email: &str, code: &str, verification_url: &str);

    /// Send a password reset code.
    async fn send_password_reset(&self, email: &str, code: &str);
}

/// Mailer that writes notifications to the log instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_account_verification(&self, email: &str, code: &str, verification_url: &str) {
        tracing::info!(
            email = %email,
            code = %code,
            url = %verification_url,
            "Account verification email"
        );
    }

    async fn send_password_reset(&self, email: &str, code: &str) {
        tracing::info!(email = %email, code = %code, "Password reset email");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Mailer that records sent codes for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingMailer {
        pub sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send_account_verification(
            &self,
            email: &str,
            code: &str,
            _verification_url: &str,
        ) {
            self.sent
                .lock()
                .unwrap()
                .push((email.to_string(), code.to_string()));
        }

        async fn send_password_reset(&self, email: &str, code: &str) {
            self.sent
                .lock()
                .unwrap()
                .push((email.to_string(), code.to_string()));
        }
    }
}
