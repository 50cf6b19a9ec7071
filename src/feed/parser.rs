use anyhow::Result;
use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use feed_rs::parser;

use crate::post::Post;

pub fn posts_from_bytes(bytes: &[u8], attribution: &str) -> Result<Vec<Post>> {
    let feed = parser::parse(bytes)?;

    let total = feed.entries.len();
    let posts: Vec<Post> = feed
        .entries
        .into_iter()
        .filter_map(|entry| normalize(entry, attribution))
        .collect();

    if posts.len() < total {
        tracing::debug!(
            dropped = total - posts.len(),
            "Skipped entries missing a title, link, or timestamp"
        );
    }

    Ok(posts)
}

fn normalize(entry: Entry, attribution: &str) -> Option<Post> {
    let url = entry
        .links
        .iter()
        .find(|link| !link.href.is_empty())
        .map(|link| link.href.clone())?;

    let title = clean_title(&entry.title.map(|t| t.content).unwrap_or_default());
    if title.is_empty() {
        return None;
    }

    // Feeds disagree on which timestamp they populate; updated stands in
    // when published is absent (common for Atom).
    let published: DateTime<Utc> = entry.published.or(entry.updated)?;

    Some(Post {
        title,
        url,
        published,
        attribution: attribution.to_string(),
    })
}

fn clean_title(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
