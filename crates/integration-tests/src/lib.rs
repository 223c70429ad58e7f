//! Shared fixtures for the cross-crate tests.

use async_trait::async_trait;
use ps_core::error::{AppError, Result};
use ps_core::models::Post;
use ps_core::traits::PostSource;
use ps_db_sqlite::SqlitePostStore;

/// A `PostSource` that serves a fixed list.
pub struct StubSource {
    pub posts: Vec<Post>,
}

#[async_trait]
impl PostSource for StubSource {
    async fn fetch_all(&self) -> Result<Vec<Post>> {
        Ok(self.posts.clone())
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Post> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Post", id))
    }
}

/// The two-post upstream used throughout the scenarios.
pub fn seed_posts() -> Vec<Post> {
    vec![Post::new(1, 1, "a", "b"), Post::new(2, 2, "c", "d")]
}

pub async fn empty_store() -> SqlitePostStore {
    SqlitePostStore::connect("sqlite::memory:", 1)
        .await
        .expect("in-memory store should open")
}
