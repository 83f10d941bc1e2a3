// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Splitting a Markdown chapter into searchable sections.
//!
//! Each heading at or above the split level opens a new section; deeper
//! headings stay inside the current section's body.
//!
//! ```text
//! Intro text.              ┐
//! # Setup                  ├─ section "setup"    title "Setup"
//! Install things.          ┘
//! ## Windows               ┐
//! Use the installer.       │  section "windows"  title "Windows"
//! #### Notes               │  (level 4: body text)
//! Reboot.                  ┘
//! ```
//!
//! Raw HTML contributes its text with the tags stripped. A chapter with no
//! heading and no text yields no section at all.
//!
//! Anchors follow the ids the HTML renderer gives headings, so `url#anchor`
//! lands on the heading: explicit `{#id}` attributes win, otherwise the
//! normalized heading text with `-1`, `-2`, … for repeats on the page.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::builder::DocumentFields;
use crate::error::{Error, Result};
use crate::utils::{collapse_whitespace, unique_id};

use super::summary::ChapterEntry;

pub const BREADCRUMB_SEPARATOR: &str = " » ";

/// A chapter's source, ready to be split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub name: String,
    /// Source path relative to the book's `src`.
    pub path: PathBuf,
    pub parents: Vec<String>,
    pub content: String,
}

impl Chapter {
    /// Read the chapter behind a non-draft summary entry.
    pub fn load(src_dir: &Path, entry: &ChapterEntry) -> Result<Option<Self>> {
        let Some(path) = &entry.path else {
            return Ok(None);
        };
        let full = src_dir.join(path);
        let content = fs::read_to_string(&full).map_err(|e| Error::io(&full, e))?;
        Ok(Some(Self {
            name: entry.name.clone(),
            path: path.clone(),
            parents: entry.parents.clone(),
            content,
        }))
    }

    /// Rendered page path: `intro/setup.md` → `intro/setup.html`, `README.md` → `index.html`.
    pub fn html_path(&self) -> String {
        html_path(&self.path)
    }

    pub fn sections(&self, split_level: u8) -> Vec<Section> {
        split_sections(&self.name, &self.parents, &self.content, split_level)
    }
}

/// One indexed document: a heading and the text under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// `None` when the section is the whole page.
    pub anchor: Option<String>,
    pub title: String,
    pub breadcrumbs: String,
    pub body: String,
}

impl Section {
    pub fn url(&self, page: &str) -> String {
        match &self.anchor {
            Some(anchor) => format!("{}#{}", page, anchor),
            None => page.to_string(),
        }
    }

    pub fn into_fields(self) -> DocumentFields {
        DocumentFields {
            title: self.title,
            body: self.body,
            breadcrumbs: self.breadcrumbs,
        }
    }
}

pub fn html_path(path: &Path) -> String {
    let mut page = path.with_extension("html");
    if path.file_stem().is_some_and(|stem| stem.eq_ignore_ascii_case("README")) {
        page.set_file_name("index.html");
    }
    page.to_string_lossy().replace('\\', "/")
}

struct OpenHeading {
    id: Option<String>,
    text: String,
    splits: bool,
}

/// Split `markdown` into sections at headings of level `split_level` or higher.
///
/// Text before the first splitting heading is folded into the first section.
/// Without any splitting heading the chapter is a single section titled with
/// the chapter name, unless it has no text either.
pub fn split_sections(
    chapter_name: &str,
    parents: &[String],
    markdown: &str,
    split_level: u8,
) -> Vec<Section> {
    let mut trail: Vec<&str> = parents.iter().map(String::as_str).collect();
    trail.push(chapter_name);

    let mut sections: Vec<Section> = Vec::new();
    let mut body = String::new();
    let mut heading: Option<OpenHeading> = None;
    let mut seen_ids = HashMap::new();

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES;

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                heading = Some(OpenHeading {
                    id: id.map(|id| id.to_string()),
                    text: String::new(),
                    splits: level as u8 <= split_level,
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some(open) = heading.take() else {
                    continue;
                };
                let title = collapse_whitespace(&open.text);
                let anchor = match open.id {
                    Some(id) => id,
                    None => unique_id(&title, &mut seen_ids),
                };
                if !open.splits {
                    body.push(' ');
                    continue;
                }
                // the first heading keeps any text that preceded it
                if let Some(previous) = sections.last_mut() {
                    previous.body = collapse_whitespace(&body);
                    body.clear();
                }
                let mut crumbs = trail.clone();
                crumbs.push(&title);
                sections.push(Section {
                    anchor: (!anchor.is_empty()).then_some(anchor),
                    breadcrumbs: crumbs.join(BREADCRUMB_SEPARATOR),
                    title,
                    body: String::new(),
                });
            }
            Event::Text(text)
            | Event::Code(text)
            | Event::InlineMath(text)
            | Event::DisplayMath(text) => push_text(&mut heading, &mut body, &text),
            Event::InlineHtml(html) => push_text(&mut heading, &mut body, &strip_tags(&html)),
            Event::Html(html) => {
                body.push(' ');
                body.push_str(&strip_tags(&html));
                body.push(' ');
            }
            Event::SoftBreak | Event::HardBreak => match heading.as_mut() {
                Some(open) if open.splits => open.text.push(' '),
                _ => body.push(' '),
            },
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell
                | TagEnd::BlockQuote(_)
                | TagEnd::FootnoteDefinition,
            ) => body.push(' '),
            _ => {}
        }
    }

    let body = collapse_whitespace(&body);
    match sections.last_mut() {
        Some(last) => last.body = body,
        None if body.is_empty() => {}
        None => sections.push(Section {
            anchor: None,
            title: chapter_name.to_string(),
            breadcrumbs: trail.join(BREADCRUMB_SEPARATOR),
            body,
        }),
    }
    sections.retain(|section| !(section.title.is_empty() && section.body.is_empty()));
    sections
}

/// Inline text goes to the open heading, the body, or both when the heading
/// doesn't split.
fn push_text(heading: &mut Option<OpenHeading>, body: &mut String, text: &str) {
    match heading.as_mut() {
        Some(open) if open.splits => open.text.push_str(text),
        Some(open) => {
            open.text.push_str(text);
            body.push_str(text);
        }
        None => body.push_str(text),
    }
}

/// Drop everything between `<` and `>`, keeping the text around tags.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}
