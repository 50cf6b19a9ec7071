//! Feed retrieval for RSS/Atom sources.
//!
//! This module turns a configured feed source into ready-to-file posts:
//!
//! - **Fetching**: a single GET with a fixed timeout and size cap
//! - **Parsing**: RSS/Atom XML into normalized [`Post`](crate::post::Post)s
//!   via the `feed-rs` crate
//!
//! [`fetch_recent`] is the one entry point; the recency cutoff is applied
//! here so callers only ever see posts from the lookback window.

mod fetcher;
mod parser;

pub use fetcher::FetchError;

use chrono::{DateTime, Utc};

use crate::config::FeedSource;
use crate::post::{self, Post};

/// Fetches one feed and returns its posts from the lookback window,
/// newest first.
pub async fn fetch_recent(
    client: &reqwest::Client,
    source: &FeedSource,
    cutoff: DateTime<Utc>,
) -> Result<Vec<Post>, FetchError> {
    let bytes = fetcher::fetch_bytes(client, &source.url).await?;
    let posts = parser::posts_from_bytes(&bytes, &source.attribution)
        .map_err(|e| FetchError::Parse(e.to_string()))?;

    let recent = post::select_recent(posts, cutoff);
    tracing::info!(
        feed = %source.url,
        posts = recent.len(),
        "Fetched feed"
    );

    Ok(recent)
}
