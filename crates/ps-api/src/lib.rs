//! # ps-api
//!
//! The read-only HTTP surface for postsync.

pub mod error;
pub mod handlers;
pub mod middleware;

use actix_web::web;

pub use error::ApiError;
pub use handlers::AppState;

/// Configures the post routes.
///
/// Scoped so the binary can mount the API under a prefix if needed.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .route("", web::get().to(handlers::list_posts))
            .route("/user/{user_id}", web::get().to(handlers::list_posts_by_user)),
    );
}
