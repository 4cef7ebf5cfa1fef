//! In-memory account directory.
//!
//! Stands in for the hosted identity provider. Passwords are stored hashed
//! through the injected `PasswordService`; reset codes are single use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::Identity;
use quill_core::ports::{
    AccountDirectory, AuthError, PasswordService, ResetNotifier, validate_email, validate_password,
};

use crate::mask::mask_email;

/// Default lifetime of a password reset code, in minutes.
pub const DEFAULT_RESET_TTL_MINUTES: i64 = 60;

struct Account {
    identity: Identity,
    password_hash: String,
}

struct ResetTicket {
    uid: String,
    expires_at: DateTime<Utc>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Account directory keyed by uid.
pub struct InMemoryAccountDirectory {
    accounts: RwLock<HashMap<String, Account>>,
    resets: RwLock<HashMap<String, ResetTicket>>,
    passwords: Arc<dyn PasswordService>,
    notifier: Arc<dyn ResetNotifier>,
    reset_ttl: TimeDelta,
}

impl InMemoryAccountDirectory {
    pub fn new(passwords: Arc<dyn PasswordService>, notifier: Arc<dyn ResetNotifier>) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            resets: RwLock::new(HashMap::new()),
            passwords,
            notifier,
            reset_ttl: TimeDelta::minutes(DEFAULT_RESET_TTL_MINUTES),
        }
    }

    pub fn with_reset_ttl(mut self, ttl: TimeDelta) -> Self {
        self.reset_ttl = ttl;
        self
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    /// Reset codes issued and not yet redeemed.
    pub async fn pending_resets(&self) -> usize {
        self.resets.read().await.len()
    }

    fn find_by_email<'a>(
        accounts: &'a HashMap<String, Account>,
        email: &str,
    ) -> Option<&'a Account> {
        accounts.values().find(|a| a.identity.email == email)
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Identity, AuthError> {
        validate_email(email)?;
        validate_password(password)?;
        let email = normalize_email(email);
        let password_hash = self.passwords.hash(password)?;

        let mut accounts = self.accounts.write().await;
        if Self::find_by_email(&accounts, &email).is_some() {
            return Err(AuthError::EmailInUse);
        }

        let identity = Identity {
            uid: Uuid::new_v4().simple().to_string(),
            email,
            display_name: display_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        };
        accounts.insert(
            identity.uid.clone(),
            Account {
                identity: identity.clone(),
                password_hash,
            },
        );

        tracing::info!(uid = %identity.uid, email = %mask_email(&identity.email), "Account registered");
        Ok(identity)
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        let email = normalize_email(email);
        let accounts = self.accounts.read().await;
        let account =
            Self::find_by_email(&accounts, &email).ok_or(AuthError::InvalidCredentials)?;

        if !self.passwords.verify(password, &account.password_hash)? {
            tracing::debug!(email = %mask_email(&email), "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }
        Ok(account.identity.clone())
    }

    async fn find(&self, uid: &str) -> Result<Option<Identity>, AuthError> {
        Ok(self
            .accounts
            .read()
            .await
            .get(uid)
            .map(|a| a.identity.clone()))
    }

    async fn update_display_name(
        &self,
        uid: &str,
        display_name: &str,
    ) -> Result<Identity, AuthError> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(AuthError::EmptyDisplayName);
        }

        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(uid).ok_or(AuthError::UserNotFound)?;
        account.identity.display_name = Some(display_name.to_string());
        Ok(account.identity.clone())
    }

    async fn update_password(&self, uid: &str, new_password: &str) -> Result<(), AuthError> {
        validate_password(new_password)?;
        let password_hash = self.passwords.hash(new_password)?;

        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(uid).ok_or(AuthError::UserNotFound)?;
        account.password_hash = password_hash;

        tracing::info!(uid = %uid, "Password updated");
        Ok(())
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        validate_email(email)?;
        let email = normalize_email(email);

        let uid = {
            let accounts = self.accounts.read().await;
            match Self::find_by_email(&accounts, &email) {
                Some(account) => account.identity.uid.clone(),
                None => {
                    tracing::debug!(email = %mask_email(&email), "Reset requested for unknown address");
                    return Ok(());
                }
            }
        };

        let code = Uuid::new_v4().simple().to_string();
        {
            let mut resets = self.resets.write().await;
            let now = Utc::now();
            resets.retain(|_, ticket| ticket.expires_at > now);
            resets.insert(
                code.clone(),
                ResetTicket {
                    uid,
                    expires_at: now + self.reset_ttl,
                },
            );
        }

        if let Err(e) = self.notifier.send_reset_code(&email, &code).await {
            // An undelivered code must not stay redeemable.
            self.resets.write().await.remove(&code);
            tracing::warn!(email = %mask_email(&email), error = %e, "Reset code delivery failed");
            return Err(e);
        }
        Ok(())
    }

    async fn confirm_password_reset(
        &self,
        code: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        validate_password(new_password)?;

        let ticket = self
            .resets
            .write()
            .await
            .remove(code)
            .ok_or(AuthError::InvalidResetCode)?;
        if Utc::now() >= ticket.expires_at {
            return Err(AuthError::ResetCodeExpired);
        }

        self.update_password(&ticket.uid, new_password).await
    }
}
