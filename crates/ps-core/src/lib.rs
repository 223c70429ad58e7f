//! postsync/crates/ps-core/src/lib.rs
//!
//! The domain model, error type, and port definitions for postsync.

pub mod error;
pub mod models;
pub mod sync;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use sync::{startup, synchronize, StartupReport};
pub use traits::*;
