// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Building a search index from a book's sources.
//!
//! ```text
//! book.toml ─────────────▶ SearchConfig ─────────────────────┐
//! src/SUMMARY.md ────────▶ [ChapterEntry] ──┐                 │
//! src/**/*.md  ── par_iter ─▶ sections ─────┴─▶ IndexBuilder ─┴─▶ verify ─▶ searchindex.{json,js}
//! ```

pub mod chapter;
pub mod parallel;
pub mod summary;

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::builder::IndexBuilder;
use crate::config::BookConfig;
use crate::error::{Error, Result};
use crate::format;
use crate::types::{BookIndex, Field, PerField};
use crate::verify::verify;

pub use chapter::{html_path, split_sections, Chapter, Section};
pub use parallel::{load_chapters, LoadedChapter, LoadedChapters};
pub use summary::{load_summary, parse_summary, ChapterEntry};

pub const INDEX_JSON: &str = "searchindex.json";
pub const INDEX_JS: &str = "searchindex.js";

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Name outputs `searchindex-<crc32>.{json,js}` so they can be cached forever.
    pub hash_files: bool,
    /// Draw a progress bar on stderr while chapters load.
    pub progress: bool,
}

/// What a build produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildSummary {
    /// False when `[output.html.search] enable = false`; nothing was written.
    pub enabled: bool,
    pub chapters: usize,
    pub skipped: Vec<PathBuf>,
    pub documents: usize,
    pub terms: PerField<usize>,
    /// Written files, JSON first.
    pub files: Vec<PathBuf>,
    pub json_bytes: usize,
}

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("━━╸"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Index every section of the given chapters, in order.
pub fn build_index(config: &BookConfig, chapters: Vec<LoadedChapter>) -> BookIndex {
    let mut builder = IndexBuilder::new().with_options(config.search.clone());
    for chapter in chapters {
        for section in chapter.sections {
            let url = section.url(&chapter.page);
            builder.add_document(url, section.into_fields());
        }
    }
    builder.finish()
}

/// Content-hashed file name: `searchindex.json` → `searchindex-1a2b3c4d.json`.
pub fn hashed_name(name: &str, contents: &[u8]) -> String {
    let hash = format!("{:08x}", crc32fast::hash(contents));
    match name.rsplit_once('.') {
        Some((stem, ext)) => format!("{}-{}.{}", stem, hash, ext),
        None => format!("{}-{}", name, hash),
    }
}

/// Build the search index for the book at `book_dir` into `output_dir`.
pub fn run_build(book_dir: &Path, output_dir: &Path, options: &BuildOptions) -> Result<BuildSummary> {
    let config = BookConfig::load(book_dir)?;
    if !config.search.enable {
        tracing::info!(book = %book_dir.display(), "search disabled in book.toml");
        return Ok(BuildSummary::default());
    }

    let src_dir = book_dir.join(&config.src);
    let entries = summary::load_summary(&src_dir)?;
    let split_level = config.search.heading_split_level;

    #[cfg(feature = "parallel")]
    let loaded = {
        let progress = if options.progress {
            ProgressBar::new(entries.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(create_progress_style());
        progress.set_prefix("Loading");
        progress.set_message("chapters...");
        let loaded = parallel::load_chapters_with_progress(&src_dir, &entries, split_level, &progress);
        progress.finish_with_message(format!("loaded {} chapters", loaded.chapters.len()));
        loaded
    };
    #[cfg(not(feature = "parallel"))]
    let loaded = parallel::load_chapters(&src_dir, &entries, split_level);

    let chapters = loaded.chapters.len();
    let index = build_index(&config, loaded.chapters);
    verify(&index).into_result()?;

    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    let json = format::to_json(&index)?;
    let js = format::to_js(&index)?;

    let mut files = Vec::with_capacity(2);
    for (name, contents) in [(INDEX_JSON, &json), (INDEX_JS, &js)] {
        let file_name = if options.hash_files {
            hashed_name(name, contents.as_bytes())
        } else {
            name.to_string()
        };
        let path = output_dir.join(file_name);
        fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;
        files.push(path);
    }

    let summary = BuildSummary {
        enabled: true,
        chapters,
        skipped: loaded.skipped,
        documents: index.doc_count(),
        terms: PerField {
            body: index.term_count(Field::Body),
            breadcrumbs: index.term_count(Field::Breadcrumbs),
            title: index.term_count(Field::Title),
        },
        files,
        json_bytes: json.len(),
    };
    tracing::info!(
        documents = summary.documents,
        chapters = summary.chapters,
        skipped = summary.skipped.len(),
        "search index written"
    );
    Ok(summary)
}
