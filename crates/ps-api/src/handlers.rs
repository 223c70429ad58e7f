//! # ps-api Handlers
//!
//! Thin delegation from HTTP requests to the `PostStore` port. No transformation
//! happens here; the store's result is serialized as-is.

use actix_web::web;
use log::debug;
use ps_core::models::Post;
use ps_core::traits::PostStore;

use crate::error::ApiError;

/// State shared across all actix-web workers.
pub struct AppState {
    pub store: Box<dyn PostStore>,
}

impl AppState {
    pub fn new(store: Box<dyn PostStore>) -> Self {
        Self { store }
    }
}

/// `GET /posts`
pub async fn list_posts(data: web::Data<AppState>) -> Result<web::Json<Vec<Post>>, ApiError> {
    debug!("Thread: {:?}", std::thread::current());
    Ok(web::Json(data.store.find_all().await?))
}

/// `GET /posts/user/{user_id}`
pub async fn list_posts_by_user(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<web::Json<Vec<Post>>, ApiError> {
    let user_id = path.into_inner();
    Ok(web::Json(data.store.find_by_user_id(user_id).await?))
}
