//! # gf-api
//!
//! The HTTP surface of the gamer feed.

pub mod error;
pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the feed routes.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the API under different paths if needed (e.g., /api/v1/).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            // The feed page and the posting endpoint
            .service(
                web::resource("/posts")
                    .route(web::get().to(handlers::list_posts))
                    .route(web::post().to(handlers::create_post)),
            )
            .service(
                web::resource("/posts/{post_id}/like")
                    .route(web::put().to(handlers::like_post))
                    .route(web::delete().to(handlers::unlike_post)),
            )
            .route(
                "/posts/{post_id}/comments",
                web::post().to(handlers::add_comment),
            ),
    );
}
