//! One whole run: fetch feeds, pick fresh posts, edit the page.

use std::fs;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Utc};

use crate::config::Config;
use crate::document::{self, Document};
use crate::feed;
use crate::post::{self, Post};

/// What a run did, for the caller to report.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No post from the lookback window survived dedup; nothing was written.
    NoFreshPosts,
    /// This many bullets were added under the current year's heading.
    Added(usize),
}

/// Runs the update against the configured document.
///
/// The document is read once up front and written once at the end, so a
/// failure anywhere in between leaves the file exactly as it was. Any feed
/// failing to fetch or parse aborts the run.
pub async fn run(config: &Config, client: &reqwest::Client, dry_run: bool) -> Result<Outcome> {
    let text = fs::read_to_string(&config.document)
        .with_context(|| format!("Failed to read {}", config.document.display()))?;
    let known = document::existing_urls(&text);

    // Cutoff and target year come from one clock sample, so a run straddling
    // midnight stays consistent.
    let now = Utc::now();
    let cutoff = now - Duration::days(i64::from(config.lookback_days));
    let year = now.year();

    let mut collected: Vec<Post> = Vec::new();
    for source in &config.feeds {
        let posts = feed::fetch_recent(client, source, cutoff)
            .await
            .with_context(|| format!("Failed to fetch feed '{}'", source.url))?;
        collected.extend(posts);
    }

    let candidates = collected.len();
    let mut fresh = post::discard_known(collected, &known);
    fresh.sort_by(|a, b| b.published.cmp(&a.published));
    fresh.truncate(config.max_new_posts);

    tracing::debug!(
        candidates,
        fresh = fresh.len(),
        "Deduplicated against links already on the page"
    );

    if fresh.is_empty() {
        return Ok(Outcome::NoFreshPosts);
    }

    let mut doc = Document::parse(&text);
    doc.ensure_year(year);
    doc.insert_posts(year, &fresh)?;

    if !dry_run {
        fs::write(&config.document, doc.render())
            .with_context(|| format!("Failed to write {}", config.document.display()))?;
    }

    Ok(Outcome::Added(fresh.len()))
}
