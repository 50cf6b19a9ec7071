//! The markdown articles page, parsed into year sections.
//!
//! The page is a preamble (title, intro prose) followed by `## <year>`
//! headings, each listing posts as `  * [title](url) attribution` bullets.
//! Both editing phases (ensure the year section exists, then insert bullets
//! under it) run over one parsed [`Document`], so the insert phase can never
//! disagree with the ensure phase about what counts as a year heading.
//!
//! Parsing is lossless: every line of the input is owned by exactly one
//! container, in order, and [`Document::render`] reproduces untouched input
//! byte for byte.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::post::Post;

/// A year section opens on a line like `## 2025`, with a word boundary after
/// the digits: `## 2025 Archive` counts, `### 2025` and `## 20255` do not.
static YEAR_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+(\d{4})\b").unwrap());

/// Deliberately permissive: any `http(s)://` run of characters, stopping at
/// whitespace or a markdown/HTML terminator. Scanning the whole page (not
/// just bullets) means a link mentioned anywhere, even in prose, suppresses
/// re-adding a post with that exact URL. External pages rely on this.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s)>"]+"#).unwrap());

#[derive(Debug, Error)]
pub enum DocumentError {
    /// The year section was not found. Unreachable through the normal
    /// pipeline, which always ensures the section before inserting.
    #[error("Could not find year section for {0}")]
    SectionMissing(i32),
}

/// Every URL referenced anywhere in the document text.
pub fn existing_urls(text: &str) -> HashSet<String> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The articles page, split into a preamble and year sections.
#[derive(Debug)]
pub struct Document {
    /// Lines before the first year heading, verbatim.
    preamble: Vec<String>,
    /// Year sections in document order (pages keep newest years on top, but
    /// whatever order the page uses is preserved).
    sections: Vec<Section>,
}

#[derive(Debug)]
struct Section {
    year: i32,
    /// The heading line verbatim, trailing text and all.
    heading: String,
    /// Every line until the next year heading: bullets, blanks, prose.
    body: Vec<String>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        let mut preamble = Vec::new();
        let mut sections: Vec<Section> = Vec::new();

        for line in text.split('\n') {
            if let Some(year) = heading_year(line) {
                sections.push(Section {
                    year,
                    heading: line.to_string(),
                    body: Vec::new(),
                });
            } else if let Some(section) = sections.last_mut() {
                section.body.push(line.to_string());
            } else {
                preamble.push(line.to_string());
            }
        }

        Document { preamble, sections }
    }

    pub fn render(&self) -> String {
        let mut lines: Vec<&str> = Vec::new();
        lines.extend(self.preamble.iter().map(String::as_str));
        for section in &self.sections {
            lines.push(section.heading.as_str());
            lines.extend(section.body.iter().map(String::as_str));
        }
        lines.join("\n")
    }

    /// Phase 1: make sure a `## <year>` section exists.
    ///
    /// No-op if the year already has a heading anywhere in the document.
    /// Otherwise the new section goes in front of the first existing one,
    /// separated from the preceding content by a blank line; if the page has
    /// no year headings at all, it goes at the end of the right-trimmed page.
    pub fn ensure_year(&mut self, year: i32) {
        if self.sections.iter().any(|s| s.year == year) {
            return;
        }

        let section = Section {
            year,
            heading: format!("## {year}"),
            // A single empty body line keeps the rendered page
            // newline-terminated and separates the section from whatever
            // follows it once bullets are inserted.
            body: vec![String::new()],
        };

        if self.sections.is_empty() {
            self.trim_preamble_end();
            self.sections.push(section);
        } else {
            self.preamble.push(String::new());
            self.sections.insert(0, section);
        }
    }

    /// Phase 2: prepend one bullet line per post under the year heading.
    ///
    /// Posts land in the order given (the caller passes them newest-first),
    /// above everything already in the section.
    pub fn insert_posts(&mut self, year: i32, posts: &[Post]) -> Result<(), DocumentError> {
        let section = self
            .sections
            .iter_mut()
            .find(|s| s.year == year)
            .ok_or(DocumentError::SectionMissing(year))?;

        section.body.splice(0..0, posts.iter().map(bullet_line));
        Ok(())
    }

    /// Drops trailing blank lines (and trailing whitespace on the last kept
    /// line) so an appended heading lands right after the last content line.
    fn trim_preamble_end(&mut self) {
        while self
            .preamble
            .last()
            .is_some_and(|line| line.trim().is_empty())
        {
            self.preamble.pop();
        }
        if let Some(last) = self.preamble.last_mut() {
            let trimmed = last.trim_end();
            if trimmed.len() != last.len() {
                *last = trimmed.to_string();
            }
        }
    }
}

fn heading_year(line: &str) -> Option<i32> {
    YEAR_HEADING
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
}

/// Exact bullet format: two spaces, asterisk, markdown link, attribution.
fn bullet_line(post: &Post) -> String {
    format!("  * [{}]({}) {}", post.title, post.url, post.attribution)
}
