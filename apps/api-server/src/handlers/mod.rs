//! HTTP handlers and route configuration.

mod auth;
mod health;
mod users;


use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadBody(err.to_string()).into()),
    )
    // Public routes
    .route("/health", web::get().to(health::health_check))
    // Auth routes
    .service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login)),
    )
    // Protected routes
    .service(
        web::scope("/users")
            .route("/me", web::get().to(users::me))
            .route("/me", web::delete().to(users::delete_me))
            .route("/me/permissions", web::get().to(users::permissions)),
    );
}
