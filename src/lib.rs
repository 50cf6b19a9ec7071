//! Keeps a markdown articles page stocked with the week's RSS posts.
//!
//! feedmd polls a configured set of RSS/Atom feeds, picks out posts
//! published within the lookback window, drops anything whose URL already
//! appears on the page, and files the rest as bullets under the current
//! year's `## <year>` heading. The page is read once and written once, so
//! a failure anywhere leaves it untouched.

pub mod config;
pub mod document;
pub mod feed;
pub mod post;
pub mod update;
