//! Account handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::Identity;
use quill_core::ports::{AuthError, validate_password};
use quill_shared::ApiResponse;
use quill_shared::dto::{
    AuthResponse, LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest,
    ProfileUpdateRequest, RegisterRequest, UserResponse,
};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(super) fn user_response(identity: &Identity) -> UserResponse {
    UserResponse {
        uid: identity.uid.clone(),
        email: identity.email.clone(),
        display_name: identity.display_name.clone(),
        initial: identity.initial(),
        avatar_color: identity.avatar_color().css_class().to_string(),
    }
}

fn auth_response(state: &AppState, identity: &Identity) -> AppResult<AuthResponse> {
    let token = state.tokens.generate_token(identity)?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
        user: user_response(identity),
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let identity = state
        .accounts
        .register(&req.email, &req.password, req.display_name)
        .await?;

    Ok(HttpResponse::Created().json(auth_response(&state, &identity)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let identity = state
        .accounts
        .verify_credentials(&req.email, &req.password)
        .await?;

    tracing::debug!(uid = %identity.uid, "Login succeeded");
    Ok(HttpResponse::Ok().json(auth_response(&state, &identity)?))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    let identity = state
        .accounts
        .find(&user.0.uid)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(HttpResponse::Ok().json(user_response(&identity)))
}

/// PUT /api/auth/profile - Protected route
pub async fn update_profile(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<ProfileUpdateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let uid = &user.0.uid;

    if req.display_name.is_none() && req.new_password.is_none() {
        return Err(AppError::BadRequest("Nothing to update".to_string()));
    }

    // Validate everything before the first write.
    if req.display_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(AuthError::EmptyDisplayName.into());
    }
    if let Some(new_password) = &req.new_password {
        validate_password(new_password)?;
        if req.confirm_password.as_deref() != Some(new_password.as_str()) {
            return Err(AuthError::PasswordMismatch.into());
        }
    }

    if let Some(display_name) = &req.display_name {
        state.accounts.update_display_name(uid, display_name).await?;
    }
    if let Some(new_password) = &req.new_password {
        state.accounts.update_password(uid, new_password).await?;
    }

    let identity = state
        .accounts
        .find(uid)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    Ok(HttpResponse::Ok().json(user_response(&identity)))
}

/// POST /api/auth/password-reset
pub async fn request_password_reset(
    state: web::Data<AppState>,
    body: web::Json<PasswordResetRequest>,
) -> AppResult<HttpResponse> {
    state
        .accounts
        .request_password_reset(&body.into_inner().email)
        .await?;

    Ok(HttpResponse::Accepted().json(ApiResponse::message(
        "If that address is registered, a reset code is on its way",
    )))
}

/// POST /api/auth/password-reset/confirm
pub async fn confirm_password_reset(
    state: web::Data<AppState>,
    body: web::Json<PasswordResetConfirmRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    state
        .accounts
        .confirm_password_reset(&req.code, &req.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Password updated")))
}
