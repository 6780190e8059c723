//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime: String,
    pub db: &'static str,
}

/// GET /api/health - server status, uptime and database reachability.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let db = match &state.db {
        Some(conn) if conn.ping().await.is_ok() => "connected",
        _ => "disconnected",
    };

    let response = HealthResponse {
        status: "running",
        uptime: format!("{}s", state.started_at.elapsed().as_secs()),
        db,
    };

    HttpResponse::Ok().json(response)
}
