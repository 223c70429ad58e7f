//! # Domain Models
//!
//! The single entity handled by postsync. The same shape is used on the wire
//! (upstream and local JSON) and in storage.

use serde::{Deserialize, Serialize};

/// A blog-style post owned by an upstream user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    /// Owning user. Not enforced locally; only used for grouping.
    pub user_id: i64,
    pub title: String,
    pub body: String,
    /// Optional trailing field. Never persisted and never populated by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

impl Post {
    pub fn new(id: i64, user_id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            title: title.into(),
            body: body.into(),
            version: None,
        }
    }
}
