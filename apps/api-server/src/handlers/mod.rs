//! HTTP handlers and route configuration.

mod auth;
mod blogs;
mod health;

use actix_web::{HttpResponse, web};
use chronicle_shared::ErrorBody;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                // fixed segments before the catch-all "/{slug}"
                web::scope("/blogs")
                    .route("/admin/my-blogs", web::get().to(blogs::my_blogs))
                    .route("/id/{id}", web::get().to(blogs::get_blog_by_id))
                    .route("", web::get().to(blogs::list_blogs))
                    .route("", web::post().to(blogs::create_blog))
                    .route("/{id}/like", web::post().to(blogs::like_blog))
                    .route("/{id}/status", web::patch().to(blogs::update_blog_status))
                    .route("/{id}", web::put().to(blogs::update_blog))
                    .route("/{id}", web::delete().to(blogs::delete_blog))
                    .route("/{slug}", web::get().to(blogs::get_blog_by_slug)),
            ),
    );
}

/// Unmatched routes answer with the same envelope shape as everything else.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("Route not found"))
}
