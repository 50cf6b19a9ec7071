use std::collections::HashSet;

use chrono::{DateTime, Utc};

/// A normalized feed entry, ready to be written into the articles page.
///
/// Constructed once per feed entry during normalization and never mutated.
/// Two posts are duplicates iff their `url` strings are byte-equal; no
/// normalization of query params or trailing slashes is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Entry title with whitespace runs collapsed to single spaces. Non-empty.
    pub title: String,
    /// Absolute link to the entry. The dedup key.
    pub url: String,
    /// Publication time. Always timezone-aware UTC by construction.
    pub published: DateTime<Utc>,
    /// Fixed label identifying the feed this post came from.
    pub attribution: String,
}

/// Keeps posts published at or after `cutoff`, newest first.
///
/// The cutoff boundary is inclusive. The sort is stable, so posts with equal
/// timestamps keep their feed order.
pub fn select_recent(mut posts: Vec<Post>, cutoff: DateTime<Utc>) -> Vec<Post> {
    posts.retain(|p| p.published >= cutoff);
    posts.sort_by(|a, b| b.published.cmp(&a.published));
    posts
}

/// Drops posts whose exact URL is already referenced somewhere.
///
/// Title and attribution play no part; the URL string alone decides.
pub fn discard_known(posts: Vec<Post>, known: &HashSet<String>) -> Vec<Post> {
    posts.into_iter().filter(|p| !known.contains(&p.url)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(title: &str, url: &str, published: DateTime<Utc>) -> Post {
        Post {
            title: title.to_string(),
            url: url.to_string(),
            published,
            attribution: "Test Feed".to_string(),
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_select_drops_posts_before_cutoff() {
        let posts = vec![
            post("old", "https://example.com/old", at(1, 0)),
            post("new", "https://example.com/new", at(10, 0)),
        ];
        let selected = select_recent(posts, at(5, 0));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "new");
    }

    #[test]
    fn test_select_keeps_post_exactly_at_cutoff() {
        let cutoff = at(5, 0);
        let posts = vec![post("boundary", "https://example.com/b", cutoff)];
        let selected = select_recent(posts, cutoff);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_select_sorts_newest_first() {
        let posts = vec![
            post("a", "https://example.com/a", at(3, 0)),
            post("b", "https://example.com/b", at(9, 0)),
            post("c", "https://example.com/c", at(6, 0)),
        ];
        let selected = select_recent(posts, at(1, 0));
        let titles: Vec<&str> = selected.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_select_keeps_feed_order_on_equal_timestamps() {
        let ts = at(7, 12);
        let posts = vec![
            post("first", "https://example.com/1", ts),
            post("second", "https://example.com/2", ts),
            post("third", "https://example.com/3", ts),
        ];
        let selected = select_recent(posts, at(1, 0));
        let titles: Vec<&str> = selected.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_discard_known_filters_by_exact_url() {
        let posts = vec![
            post("known", "https://example.com/seen", at(8, 0)),
            post("fresh", "https://example.com/unseen", at(8, 1)),
        ];
        let known: HashSet<String> = ["https://example.com/seen".to_string()].into();
        let fresh = discard_known(posts, &known);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].title, "fresh");
    }

    #[test]
    fn test_discard_known_ignores_title_and_attribution() {
        let mut renamed = post("completely different title", "https://example.com/seen", at(8, 0));
        renamed.attribution = "Another Feed".to_string();
        let known: HashSet<String> = ["https://example.com/seen".to_string()].into();
        assert!(discard_known(vec![renamed], &known).is_empty());
    }

    #[test]
    fn test_discard_known_does_not_normalize_urls() {
        // Trailing slash makes a different URL; the match is byte-exact.
        let posts = vec![post("slash", "https://example.com/seen/", at(8, 0))];
        let known: HashSet<String> = ["https://example.com/seen".to_string()].into();
        assert_eq!(discard_known(posts, &known).len(), 1);
    }

    #[test]
    fn test_empty_known_set_keeps_everything() {
        let posts = vec![post("a", "https://example.com/a", at(2, 0))];
        assert_eq!(discard_known(posts, &HashSet::new()).len(), 1);
    }
}
