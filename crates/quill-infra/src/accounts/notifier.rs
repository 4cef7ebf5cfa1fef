//! Reset code delivery.

use async_trait::async_trait;
use tokio::sync::Mutex;

use quill_core::ports::{AuthError, ResetNotifier};

use crate::mask::mask_email;

/// Writes reset codes to the log. Suitable for local development only.
#[derive(Debug, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl ResetNotifier for LoggingNotifier {
    async fn send_reset_code(&self, email: &str, code: &str) -> Result<(), AuthError> {
        tracing::info!(email = %mask_email(email), "Password reset code issued");
        tracing::debug!(code = %code, "Password reset code");
        Ok(())
    }
}

/// Keeps every delivered code in memory.
#[derive(Debug, Default)]
pub struct InMemoryOutbox {
    sent: Mutex<Vec<(String, String)>>,
}

impl InMemoryOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent code sent to `email`.
    pub async fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    pub async fn len(&self) -> usize {
        self.sent.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sent.lock().await.is_empty()
    }
}

#[async_trait]
impl ResetNotifier for InMemoryOutbox {
    async fn send_reset_code(&self, email: &str, code: &str) -> Result<(), AuthError> {
        self.sent
            .lock()
            .await
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}
