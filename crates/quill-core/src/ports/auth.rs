//! Authentication and account ports.

use async_trait::async_trait;

use crate::domain::Identity;

/// Claims stored in session tokens.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub uid: String,
    pub email: String,
    pub exp: i64,
}

/// Token service trait for session tokens.
pub trait TokenService: Send + Sync {
    /// Issue a session token for an identity.
    fn generate_token(&self, identity: &Identity) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Account directory - the authentication backend.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Create an account and return its identity.
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Identity, AuthError>;

    /// Check an e-mail/password pair.
    async fn verify_credentials(&self, email: &str, password: &str)
    -> Result<Identity, AuthError>;

    async fn find(&self, uid: &str) -> Result<Option<Identity>, AuthError>;

    async fn update_display_name(
        &self,
        uid: &str,
        display_name: &str,
    ) -> Result<Identity, AuthError>;

    async fn update_password(&self, uid: &str, new_password: &str) -> Result<(), AuthError>;

    /// Issue a one-time reset code and hand it to the notifier.
    /// Unknown addresses succeed without sending anything.
    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError>;

    /// Consume a reset code and set a new password.
    async fn confirm_password_reset(&self, code: &str, new_password: &str)
    -> Result<(), AuthError>;
}

/// Delivery channel for password reset codes.
#[async_trait]
pub trait ResetNotifier: Send + Sync {
    async fn send_reset_code(&self, email: &str, code: &str) -> Result<(), AuthError>;
}

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Email already registered")]
    EmailInUse,

    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    WeakPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Name cannot be empty")]
    EmptyDisplayName,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid or already used reset code")]
    InvalidResetCode,

    #[error("Reset code expired")]
    ResetCodeExpired,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Shared input checks for account operations.
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AuthError::InvalidEmail),
    }
}

pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword);
    }
    Ok(())
}
