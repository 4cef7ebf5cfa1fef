//! Client-side session context.
//!
//! Holds the signed-in identity and its token in a `watch` channel so any
//! number of consumers can follow auth state changes.

use std::sync::Arc;

use futures::stream::BoxStream;
use tokio::sync::watch;

use quill_core::domain::Identity;
use quill_core::ports::{AccountDirectory, AuthError, TokenService};

use crate::mask::mask_email;
use crate::stream::watch_stream;

/// A signed-in identity and its session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: Identity,
    pub token: String,
}

/// Explicit auth state shared by everything that needs the current user.
pub struct SessionContext {
    accounts: Arc<dyn AccountDirectory>,
    tokens: Arc<dyn TokenService>,
    state: watch::Sender<Option<Session>>,
}

impl SessionContext {
    pub fn new(accounts: Arc<dyn AccountDirectory>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            accounts,
            tokens,
            state: watch::channel(None).0,
        }
    }

    /// Create an account and sign it in.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Session, AuthError> {
        let identity = self.accounts.register(email, password, display_name).await?;
        self.start(identity)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let identity = self.accounts.verify_credentials(email, password).await?;
        self.start(identity)
    }

    pub fn logout(&self) {
        let previous = self.state.send_replace(None);
        if let Some(session) = previous {
            tracing::info!(uid = %session.identity.uid, "Signed out");
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.state.borrow().as_ref().map(|s| s.identity.clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|s| s.token.clone())
    }

    /// Auth state changes, starting with the current state.
    pub fn subscribe(&self) -> BoxStream<'static, Option<Identity>> {
        watch_stream(self.state.subscribe(), |session: &Option<Session>| {
            session.as_ref().map(|s| s.identity.clone())
        })
    }

    pub async fn update_display_name(&self, display_name: &str) -> Result<Identity, AuthError> {
        let uid = self.require_uid()?;
        let identity = self.accounts.update_display_name(&uid, display_name).await?;

        self.state.send_modify(|state| {
            if let Some(session) = state.as_mut().filter(|s| s.identity.uid == identity.uid) {
                session.identity = identity.clone();
            }
        });
        Ok(identity)
    }

    /// Change the signed-in user's password; `confirmation` must match.
    pub async fn update_password(
        &self,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), AuthError> {
        let uid = self.require_uid()?;
        if new_password != confirmation {
            return Err(AuthError::PasswordMismatch);
        }
        self.accounts.update_password(&uid, new_password).await
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.accounts.request_password_reset(email).await
    }

    pub async fn confirm_password_reset(
        &self,
        code: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        self.accounts.confirm_password_reset(code, new_password).await
    }

    fn require_uid(&self) -> Result<String, AuthError> {
        self.state
            .borrow()
            .as_ref()
            .map(|s| s.identity.uid.clone())
            .ok_or(AuthError::MissingAuth)
    }

    fn start(&self, identity: Identity) -> Result<Session, AuthError> {
        let token = self.tokens.generate_token(&identity)?;
        let session = Session { identity, token };

        tracing::info!(
            uid = %session.identity.uid,
            email = %mask_email(&session.identity.email),
            "Signed in"
        );
        self.state.send_replace(Some(session.clone()));
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use quill_core::ports::{PasswordService, TokenClaims};

    use crate::accounts::{InMemoryAccountDirectory, InMemoryOutbox};

    struct PlainHasher;

    impl PasswordService for PlainHasher {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(password.to_string())
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(password == hash)
        }
    }

    struct UidTokens;

    impl TokenService for UidTokens {
        fn generate_token(&self, identity: &Identity) -> Result<String, AuthError> {
            Ok(format!("token-{}", identity.uid))
        }

        fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
            Err(AuthError::InvalidToken(token.to_string()))
        }

        fn expiration_seconds(&self) -> i64 {
            3600
        }
    }

    fn context() -> (SessionContext, Arc<InMemoryOutbox>) {
        let outbox = Arc::new(InMemoryOutbox::new());
        let accounts = Arc::new(InMemoryAccountDirectory::new(
            Arc::new(PlainHasher),
            outbox.clone(),
        ));
        (SessionContext::new(accounts, Arc::new(UidTokens)), outbox)
    }

    #[tokio::test]
    async fn test_subscribe_follows_sign_in_and_out() {
        let (session, _) = context();
        let mut states = session.subscribe();

        assert_eq!(states.next().await.unwrap(), None);

        let signed_in = session
            .register("ada@example.com", "secret1", None)
            .await
            .unwrap();
        assert_eq!(signed_in.token, format!("token-{}", signed_in.identity.uid));
        assert_eq!(states.next().await.unwrap(), Some(signed_in.identity.clone()));

        session.logout();
        assert_eq!(states.next().await.unwrap(), None);
        assert!(session.token().is_none());

        session.login("ada@example.com", "secret1").await.unwrap();
        assert_eq!(session.current(), Some(signed_in.identity));
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_current_identity() {
        let (session, _) = context();
        let signed_in = session
            .register("ada@example.com", "secret1", None)
            .await
            .unwrap();

        let mut states = session.subscribe();
        assert_eq!(states.next().await.unwrap(), Some(signed_in.identity));
    }

    #[tokio::test]
    async fn test_profile_changes_require_sign_in() {
        let (session, _) = context();

        assert!(matches!(
            session.update_display_name("Ada").await,
            Err(AuthError::MissingAuth)
        ));
        assert!(matches!(
            session.update_password("secret2", "secret2").await,
            Err(AuthError::MissingAuth)
        ));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let (session, _) = context();
        session
            .register("ada@example.com", "secret1", None)
            .await
            .unwrap();

        let renamed = session.update_display_name("Ada").await.unwrap();
        assert_eq!(session.current(), Some(renamed));

        assert!(matches!(
            session.update_password("secret2", "secret3").await,
            Err(AuthError::PasswordMismatch)
        ));
        assert!(matches!(
            session.update_password("short", "short").await,
            Err(AuthError::WeakPassword)
        ));
        session.update_password("secret2", "secret2").await.unwrap();

        session.logout();
        assert!(session.login("ada@example.com", "secret1").await.is_err());
        session.login("ada@example.com", "secret2").await.unwrap();
    }

    #[tokio::test]
    async fn test_reset_passthrough() {
        let (session, outbox) = context();
        session
            .register("ada@example.com", "secret1", None)
            .await
            .unwrap();
        session.logout();

        session.request_password_reset("ada@example.com").await.unwrap();
        let code = outbox.last_code_for("ada@example.com").await.unwrap();
        session.confirm_password_reset(&code, "secret9").await.unwrap();

        assert!(session.login("ada@example.com", "secret9").await.is_ok());
    }
}
