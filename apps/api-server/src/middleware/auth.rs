//! Authentication extractors - the two access-control gates.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};

use chronicle_core::domain::User;
use chronicle_core::ports::AuthError;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Verified bearer identity. Nothing but the user id: anything else is
/// looked up fresh when it matters.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn like(identity: Identity, ...) -> AppResult<HttpResponse> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: uuid::Uuid,
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, AppError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}

/// The admin gate. Re-fetches the user record on every request instead of
/// trusting token claims, so deactivating or demoting an account takes
/// effect immediately without token revocation infrastructure.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, AppError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = identity_from_request(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let identity = identity?;
            let state = state
                .ok_or_else(|| AppError::Internal("application state missing".to_string()))?;

            let user = state.users.find_by_id(identity.user_id).await?;

            match user {
                Some(user) if user.is_admin() && user.is_active => Ok(AdminUser(user)),
                _ => Err(AppError::Forbidden("Not authorized as admin".to_string())),
            }
        })
    }
}

fn identity_from_request(req: &HttpRequest) -> Result<Identity, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state missing".to_string()))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let header_str = header_value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("invalid authorization header".to_string()))?;

    let token = header_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("expected Bearer token".to_string()))?;

    let claims = state.tokens.verify(token)?;

    Ok(Identity {
        user_id: claims.user_id,
    })
}
