// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `SUMMARY.md`: the book's table of contents.
//!
//! ```markdown
//! # Summary
//!
//! [Introduction](README.md)           ← prefix chapter, no parents
//!
//! - [Templates](templates.md)
//!     - [DAO](templates/dao.md)       ← parents: ["Templates"]
//! - [Coming Soon]()                   ← draft: skipped, but still a parent
//!     - [Games](games.md)             ← parents: ["Coming Soon"]
//!
//! ---
//!
//! [Contributors](contributors.md)     ← suffix chapter
//! ```
//!
//! Headings (part titles) and separators do not affect breadcrumbs.

use std::fs;
use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::error::{Error, Result};
use crate::utils::collapse_whitespace;

pub const SUMMARY_FILE: &str = "SUMMARY.md";

/// One link of the table of contents, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterEntry {
    pub name: String,
    /// Source file relative to the book's `src`; `None` for drafts.
    pub path: Option<PathBuf>,
    /// Names of the enclosing list items, outermost first.
    pub parents: Vec<String>,
}

impl ChapterEntry {
    pub fn is_draft(&self) -> bool {
        self.path.is_none()
    }
}

/// Parse summary text. Errors carry a line number.
pub fn parse_summary(text: &str) -> Result<Vec<ChapterEntry>, String> {
    let mut entries = Vec::new();
    // one slot per open list item: where it starts, and its chapter name
    // once the link is seen
    let mut items: Vec<(usize, Option<String>)> = Vec::new();
    let mut link: Option<(String, String)> = None;

    for (event, range) in Parser::new(text).into_offset_iter() {
        match event {
            Event::Start(Tag::Item) => items.push((range.start, None)),
            Event::End(TagEnd::Item) => {
                if let Some((start, None)) = items.pop() {
                    return Err(format!(
                        "line {}: list item without a chapter link",
                        line_of(text, start)
                    ));
                }
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                link = Some((dest_url.to_string(), String::new()));
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some((_, name)) = link.as_mut() {
                    name.push_str(&t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, name)) = link.as_mut() {
                    name.push(' ');
                }
            }
            Event::End(TagEnd::Link) => {
                let Some((dest, name)) = link.take() else {
                    continue;
                };
                let name = collapse_whitespace(&name);
                let depth = items.len();
                match items.last_mut() {
                    // a second link in the same item is inline text, not a chapter
                    Some((_, Some(_))) => continue,
                    Some((_, slot)) => *slot = Some(name.clone()),
                    None => {}
                }
                let parents = items[..depth.saturating_sub(1)]
                    .iter()
                    .filter_map(|(_, name)| name.clone())
                    .collect();
                let dest = dest.trim();
                entries.push(ChapterEntry {
                    name,
                    path: (!dest.is_empty()).then(|| PathBuf::from(dest)),
                    parents,
                });
            }
            _ => {}
        }
    }
    Ok(entries)
}

/// Read and parse `<src_dir>/SUMMARY.md`.
pub fn load_summary(src_dir: &Path) -> Result<Vec<ChapterEntry>> {
    let path = src_dir.join(SUMMARY_FILE);
    let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    let entries = parse_summary(&text).map_err(|message| Error::Summary {
        path: path.clone(),
        message,
    })?;
    tracing::debug!(path = %path.display(), chapters = entries.len(), "parsed summary");
    Ok(entries)
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset.min(text.len())].matches('\n').count() + 1
}
