// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel chapter loading.
//!
//! Reading and splitting chapters is independent per file, so it runs on
//! rayon's pool. Index construction stays sequential: doc ids must follow
//! book order, and `par_iter().collect()` into a `Vec` keeps that order.
//!
//! A chapter that cannot be read is logged and skipped; the rest of the book
//! still gets indexed.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;

use std::path::{Path, PathBuf};

use super::chapter::{Chapter, Section};
use super::summary::ChapterEntry;

/// A chapter split into sections, with its rendered page path.
#[derive(Debug, Clone)]
pub struct LoadedChapter {
    pub page: String,
    pub sections: Vec<Section>,
}

/// Chapters that loaded, and the source paths that did not.
#[derive(Debug, Default)]
pub struct LoadedChapters {
    pub chapters: Vec<LoadedChapter>,
    pub skipped: Vec<PathBuf>,
}

fn load_one(
    src_dir: &Path,
    entry: &ChapterEntry,
    split_level: u8,
) -> Result<Option<LoadedChapter>, PathBuf> {
    match Chapter::load(src_dir, entry) {
        Ok(Some(chapter)) => Ok(Some(LoadedChapter {
            page: chapter.html_path(),
            sections: chapter.sections(split_level),
        })),
        Ok(None) => Ok(None),
        Err(e) => {
            tracing::warn!(chapter = %entry.name, error = %e, "skipping chapter");
            Err(entry.path.clone().unwrap_or_default())
        }
    }
}

fn collect(results: Vec<Result<Option<LoadedChapter>, PathBuf>>) -> LoadedChapters {
    let mut loaded = LoadedChapters::default();
    for result in results {
        match result {
            Ok(Some(chapter)) => loaded.chapters.push(chapter),
            Ok(None) => {}
            Err(path) => loaded.skipped.push(path),
        }
    }
    loaded
}

/// Load and split every non-draft chapter, in summary order.
#[cfg(feature = "parallel")]
pub fn load_chapters(src_dir: &Path, entries: &[ChapterEntry], split_level: u8) -> LoadedChapters {
    load_chapters_with_progress(src_dir, entries, split_level, &ProgressBar::hidden())
}

/// Load and split every non-draft chapter, in summary order.
#[cfg(not(feature = "parallel"))]
pub fn load_chapters(src_dir: &Path, entries: &[ChapterEntry], split_level: u8) -> LoadedChapters {
    collect(
        entries
            .iter()
            .map(|entry| load_one(src_dir, entry, split_level))
            .collect(),
    )
}

/// Load chapters in parallel, advancing `progress` as each one finishes.
#[cfg(feature = "parallel")]
pub fn load_chapters_with_progress(
    src_dir: &Path,
    entries: &[ChapterEntry],
    split_level: u8,
    progress: &ProgressBar,
) -> LoadedChapters {
    let counter = AtomicUsize::new(0);
    let total = entries.len();

    let results = entries
        .par_iter()
        .map(|entry| {
            let result = load_one(src_dir, entry, split_level);

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count.is_multiple_of(10) || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }
            result
        })
        .collect();
    collect(results)
}
