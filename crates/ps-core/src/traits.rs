//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be wired in by the binary.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Post;

/// Local persistence contract for posts.
///
/// Every operation is a single database round trip, except `save_all`,
/// which issues one insert per record.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Inserts every record in order. The first failing insert is returned and
    /// the remaining records are not attempted; earlier inserts stay applied.
    async fn save_all(&self, posts: &[Post]) -> Result<()>;

    /// Inserts one record and returns the number of rows affected.
    async fn create(&self, post: &Post) -> Result<u64>;

    async fn find_all(&self) -> Result<Vec<Post>>;

    /// `Ok(None)` when no row matches; absence is not an error.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>>;

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Post>>;

    /// Overwrites `user_id`, `title` and `body` of the row matching `id`.
    /// `post.id` is ignored. Returns 0 when no row matches.
    async fn update(&self, post: &Post, id: i64) -> Result<u64>;

    /// Returns 0 when no row matches.
    async fn delete(&self, id: i64) -> Result<u64>;
}

/// Read-only upstream supplying seed data.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetches the full collection in a single call. No paging, no retry.
    async fn fetch_all(&self) -> Result<Vec<Post>>;

    /// Fails with `AppError::NotFound` when upstream has no such post.
    async fn fetch_by_id(&self, id: i64) -> Result<Post>;
}
