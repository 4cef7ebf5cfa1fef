//! HTTP handlers and route configuration.

mod auth;
mod chat;
mod comments;
mod health;
mod posts;


use actix_web::{HttpResponse, error::InternalError, web};
use quill_shared::ErrorResponse;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(query_config())
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me))
                    .route("/profile", web::put().to(auth::update_profile))
                    .route("/password-reset", web::post().to(auth::request_password_reset))
                    .route(
                        "/password-reset/confirm",
                        web::post().to(auth::confirm_password_reset),
                    ),
            )
            // Post routes; fixed paths go before `/{id}`
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/feed", web::get().to(posts::feed))
                    .route("/mine", web::get().to(posts::mine))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/comments", web::get().to(comments::list))
                    .route("/{id}/comments", web::post().to(comments::create)),
            )
            // Assistant chat log of the caller's room
            .service(
                web::scope("/chat")
                    .route("/messages", web::get().to(chat::history))
                    .route("/messages", web::post().to(chat::send)),
            ),
    );
}

/// Malformed JSON bodies become problem details instead of plain text.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::bad_request(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::bad_request(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}
