//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use quill_core::domain::Identity;
use quill_core::ports::AuthError;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Signed-in caller, taken from the Bearer token.
///
/// ```ignore
/// async fn protected_route(user: CurrentUser) -> impl Responder {
///     format!("Hello, {}!", user.0.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

fn bearer_identity(req: &HttpRequest) -> Result<Identity, AuthError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AuthError::InvalidToken("Server configuration error".to_string())
    })?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let token = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    let claims = state.tokens.validate_token(token)?;
    Ok(Identity::new(claims.uid, claims.email))
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(bearer_identity(req).map(CurrentUser).map_err(AppError::from))
    }
}

/// Caller identity when present. Post operations decide themselves whether
/// a signed-in user is required. Only a missing header reads as anonymous;
/// an expired or malformed token is rejected.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<Identity>);

impl OptionalUser {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

impl FromRequest for OptionalUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(match bearer_identity(req) {
            Ok(identity) => Ok(OptionalUser(Some(identity))),
            Err(AuthError::MissingAuth) => Ok(OptionalUser(None)),
            Err(e) => {
                tracing::debug!(error = %e, "Rejecting unusable token");
                Err(e.into())
            }
        })
    }
}
