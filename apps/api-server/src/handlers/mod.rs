//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/refresh", web::post().to(auth::refresh))
                    .route("/me", web::get().to(auth::me)),
            )
            // User administration
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list))
                    .route("/{id}", web::get().to(users::get_one))
                    .route("/{id}", web::delete().to(users::remove)),
            )
            // Post lifecycle
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/draft", web::post().to(posts::save_draft))
                    .route("/slug/{slug}", web::get().to(posts::get_by_slug))
                    .route("/{id}", web::get().to(posts::get_one))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::patch().to(posts::update))
                    .route("/{id}", web::delete().to(posts::remove))
                    .route("/{id}/publish", web::post().to(posts::publish))
                    .route("/{id}/reset", web::post().to(posts::reset)),
            ),
    );
}
