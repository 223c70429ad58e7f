//! # ps-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite `post` table
//! and the `ps-core` domain model.

use std::str::FromStr;

use async_trait::async_trait;
use log::info;
use ps_core::error::{AppError, Result};
use ps_core::models::Post;
use ps_core::traits::PostStore;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

const SELECT_ALL: &str = "SELECT id, user_id, title, body FROM post";
const SELECT_BY_ID: &str = "SELECT id, user_id, title, body FROM post WHERE id = ?";
const SELECT_BY_USER_ID: &str = "SELECT id, user_id, title, body FROM post WHERE user_id = ?";

pub struct SqlitePostStore {
    pool: SqlitePool,
}

impl SqlitePostStore {
    /// Opens a pool for `url` and creates the `post` table if needed.
    ///
    /// In-memory databases live only as long as their connection, so they are
    /// pinned to one connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::Config(format!("invalid database url {url}: {e}")))?
            .create_if_missing(true);

        let pool = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        }
        .connect_with(options)
        .await
        .map_err(storage_error)?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Wraps an existing pool. The schema is assumed to exist; call
    /// [`SqlitePostStore::migrate`] otherwise.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Storage(format!("migration failed: {e}")))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn storage_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(db.message().to_string())
        }
        _ => AppError::Storage(err.to_string()),
    }
}

fn map_post(row: &SqliteRow) -> Result<Post> {
    Ok(Post {
        id: row.try_get("id").map_err(storage_error)?,
        user_id: row.try_get("user_id").map_err(storage_error)?,
        title: row.try_get("title").map_err(storage_error)?,
        body: row.try_get("body").map_err(storage_error)?,
        version: None,
    })
}

fn map_posts(rows: Vec<SqliteRow>) -> Result<Vec<Post>> {
    rows.iter().map(map_post).collect()
}

#[async_trait]
impl PostStore for SqlitePostStore {
    /// Inserts one row per post without a surrounding transaction.
    async fn save_all(&self, posts: &[Post]) -> Result<()> {
        for post in posts {
            self.create(post).await?;
        }
        Ok(())
    }

    async fn create(&self, post: &Post) -> Result<u64> {
        let inserted = sqlx::query("INSERT INTO post (id, user_id, title, body) VALUES (?, ?, ?, ?)")
            .bind(post.id)
            .bind(post.user_id)
            .bind(&post.title)
            .bind(&post.body)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?
            .rows_affected();

        info!("Inserted {} rows", inserted);
        Ok(inserted)
    }

    async fn find_all(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        map_posts(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(map_post).transpose()
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Post>> {
        let rows = sqlx::query(SELECT_BY_USER_ID)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        map_posts(rows)
    }

    async fn update(&self, post: &Post, id: i64) -> Result<u64> {
        let updated = sqlx::query("UPDATE post SET user_id = ?, title = ?, body = ? WHERE id = ?")
            .bind(post.user_id)
            .bind(&post.title)
            .bind(&post.body)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?
            .rows_affected();

        info!("Updated {} row(s)", updated);
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let deleted = sqlx::query("DELETE FROM post WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?
            .rows_affected();

        info!("Deleted {} row(s)", deleted);
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqlitePostStore {
        SqlitePostStore::connect("sqlite::memory:", 1).await.unwrap()
    }

    fn sorted(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by_key(|p| p.id);
        posts
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let repo = store().await;
        let post = Post::new(7, 3, "Hello", "Rust!");

        assert_eq!(repo.create(&post).await.unwrap(), 1);

        let found = repo.find_by_id(7).await.unwrap().expect("post 7 should exist");
        assert_eq!(found, post);
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let repo = store().await;
        assert_eq!(repo.find_by_id(404).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_conflict() {
        let repo = store().await;
        repo.create(&Post::new(1, 1, "a", "b")).await.unwrap();

        let err = repo.create(&Post::new(1, 2, "c", "d")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_find_by_user_id_filters_exactly() {
        let repo = store().await;
        let posts = vec![
            Post::new(1, 1, "a", "b"),
            Post::new(2, 2, "c", "d"),
            Post::new(3, 1, "e", "f"),
        ];
        repo.save_all(&posts).await.unwrap();

        let by_user = sorted(repo.find_by_user_id(1).await.unwrap());
        assert_eq!(by_user, vec![posts[0].clone(), posts[2].clone()]);
        assert!(repo.find_by_user_id(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_is_repeatable() {
        let repo = store().await;
        repo.save_all(&[Post::new(1, 1, "a", "b"), Post::new(2, 2, "c", "d")])
            .await
            .unwrap();

        let first = sorted(repo.find_all().await.unwrap());
        let second = sorted(repo.find_all().await.unwrap());
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let repo = store().await;
        repo.create(&Post::new(5, 1, "old", "old body")).await.unwrap();

        let replacement = Post::new(999, 2, "new", "new body");
        assert_eq!(repo.update(&replacement, 5).await.unwrap(), 1);

        let found = repo.find_by_id(5).await.unwrap().unwrap();
        assert_eq!(found, Post::new(5, 2, "new", "new body"));
        assert_eq!(repo.find_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_returns_zero() {
        let repo = store().await;
        assert_eq!(repo.update(&Post::new(1, 1, "a", "b"), 1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = store().await;
        repo.create(&Post::new(1, 1, "a", "b")).await.unwrap();

        assert_eq!(repo.delete(1).await.unwrap(), 1);
        assert_eq!(repo.find_by_id(1).await.unwrap(), None);
        assert_eq!(repo.delete(1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_save_all_stops_at_first_failure() {
        let repo = store().await;
        let batch = vec![
            Post::new(1, 1, "a", "b"),
            Post::new(1, 1, "dup", "dup"),
            Post::new(2, 2, "c", "d"),
        ];

        let err = repo.save_all(&batch).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // No transaction: the first row stays, the one after the failure was never tried.
        let remaining = repo.find_all().await.unwrap();
        assert_eq!(remaining, vec![Post::new(1, 1, "a", "b")]);
    }

    #[tokio::test]
    async fn test_version_is_not_persisted() {
        let repo = store().await;
        let mut post = Post::new(1, 1, "a", "b");
        post.version = Some(3);
        repo.create(&post).await.unwrap();

        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().version, None);
    }

    #[tokio::test]
    async fn test_file_database_survives_reconnect() {
        let path = std::env::temp_dir().join(format!("postsync-test-{}.db", std::process::id()));
        let url = format!("sqlite://{}", path.display());

        let repo = SqlitePostStore::connect(&url, 2).await.unwrap();
        repo.create(&Post::new(1, 1, "a", "b")).await.unwrap();
        repo.pool().close().await;

        let reopened = SqlitePostStore::connect(&url, 2).await.unwrap();
        assert_eq!(reopened.find_all().await.unwrap().len(), 1);
        reopened.pool().close().await;

        let _ = std::fs::remove_file(&path);
    }
}
