//! Centralized error responder.
//!
//! Handlers never translate store failures themselves; every error funnels
//! through [`AppError`] and leaves as the `{success: false, message, ...}`
//! envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use chronicle_shared::ErrorBody;
use std::fmt;

/// Application-level error type. One variant per row of the error taxonomy.
#[derive(Debug)]
pub enum AppError {
    Validation(Vec<String>),
    BadRequest(String),
    /// Unique-constraint violation, named by the colliding field.
    Duplicate(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Validation errors: {errors:?}"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            AppError::Duplicate(field) => write!(f, "{field} already exists"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not found: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Duplicate(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => {
                ErrorBody::new("Validation Error").with_errors(errors.clone())
            }
            AppError::BadRequest(msg) => ErrorBody::new(msg),
            AppError::Duplicate(field) => ErrorBody::new(format!("{field} already exists")),
            AppError::Unauthorized(msg) => ErrorBody::new(msg),
            AppError::Forbidden(msg) => ErrorBody::new(msg),
            AppError::NotFound(msg) => ErrorBody::new(msg),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {detail}");
                let body = ErrorBody::new("Internal Server Error");
                if include_diagnostics() {
                    body.with_detail(detail.clone())
                } else {
                    body
                }
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Diagnostics go out on the 500 path everywhere except production.
fn include_diagnostics() -> bool {
    std::env::var("RUST_ENV")
        .map(|v| v != "production" && v != "prod")
        .unwrap_or(true)
}

// Conversion from domain errors
impl From<chronicle_core::error::DomainError> for AppError {
    fn from(err: chronicle_core::error::DomainError) -> Self {
        use chronicle_core::error::DomainError;
        match err {
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::Duplicate(field) => AppError::Duplicate(field.to_string()),
            DomainError::NotFound(what) => AppError::NotFound(format!("{what} not found")),
            DomainError::Forbidden(msg) => AppError::Forbidden(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<chronicle_core::error::RepoError> for AppError {
    fn from(err: chronicle_core::error::RepoError) -> Self {
        use chronicle_core::error::RepoError;
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(field) => AppError::Duplicate(field),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {msg}");
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {msg}");
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<chronicle_core::ports::AuthError> for AppError {
    fn from(err: chronicle_core::ports::AuthError) -> Self {
        use chronicle_core::ports::AuthError;
        match err {
            AuthError::TokenExpired => AppError::Unauthorized("Token expired".to_string()),
            AuthError::InvalidToken(_) => AppError::Unauthorized("Invalid token".to_string()),
            AuthError::MissingAuth => {
                AppError::Unauthorized("Authentication required".to_string())
            }
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::Hashing(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Rewrites actix's JSON deserialization failures into the envelope shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Same for path parameters (e.g. a malformed blog id).
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Same for query strings (e.g. `page=abc`).
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
