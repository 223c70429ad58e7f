//! Startup synchronization: pull everything from the upstream source and
//! insert it into the local store.

use log::info;

use crate::error::Result;
use crate::models::Post;
use crate::traits::{PostSource, PostStore};

/// What [`startup`] did before the server starts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StartupReport {
    /// Number of posts synchronized, `None` when the sync was skipped.
    pub synchronized: Option<usize>,
    /// The post fetched after the sync, `None` when no id was requested.
    pub probed: Option<Post>,
}

/// Fetches all posts from `source` and saves them into `store`.
///
/// Returns the number of posts fetched. Errors from either side are returned
/// unchanged; a failed insert may leave the store partially populated.
pub async fn synchronize(source: &dyn PostSource, store: &dyn PostStore) -> Result<usize> {
    let posts = source.fetch_all().await?;
    info!("Fetched {} posts from upstream", posts.len());

    store.save_all(&posts).await?;
    info!("Saved {} posts to the local store", posts.len());

    Ok(posts.len())
}

/// Seeds the store and then fetches a single post from upstream.
///
/// The sync runs first when `sync` is set, then `probe_id` (if any) is fetched
/// and logged. The first error aborts the sequence.
pub async fn startup(
    source: &dyn PostSource,
    store: &dyn PostStore,
    sync: bool,
    probe_id: Option<i64>,
) -> Result<StartupReport> {
    let mut report = StartupReport::default();

    if sync {
        report.synchronized = Some(synchronize(source, store).await?);
    }

    if let Some(id) = probe_id {
        let post = source.fetch_by_id(id).await?;
        info!("Post with id {}: {:?}", id, post);
        report.probed = Some(post);
    }

    Ok(report)
}
