//! Authentication handlers.

use actix_web::{HttpResponse, web};

use chronicle_shared::Envelope;
use chronicle_shared::dto::{LoginPayload, LoginRequest, UserDto, UserPayload};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Please provide email and password".to_string(),
        ));
    }

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    // inactive accounts cannot authenticate even with correct credentials
    if !user.is_active {
        return Err(AppError::Unauthorized(
            "User account is inactive".to_string(),
        ));
    }

    let valid = state.passwords.verify(&req.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state.tokens.issue(user.id)?;

    Ok(HttpResponse::Ok().json(Envelope::ok_with_message(
        "Login successful",
        LoginPayload {
            token,
            user: user_dto(&user),
        },
    )))
}

/// GET /api/auth/me - current user profile
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(Envelope::ok(UserPayload {
        user: user_dto(&user),
    })))
}

pub(super) fn user_dto(user: &chronicle_core::domain::User) -> UserDto {
    UserDto {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
    }
}
