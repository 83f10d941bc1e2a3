// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search settings read from a book's `book.toml`.
//!
//! ```toml
//! [book]
//! title = "Cairo Academy"
//! src = "src"
//!
//! [output.html.search]
//! limit-results = 20
//! use-boolean-and = true
//! boost-title = 3
//! heading-split-level = 2
//! ```
//!
//! Every key is optional. A missing file, table or key falls back to the
//! defaults below, which match what a stock book ships.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{BoolMode, FieldBoost, PerField, ResultsOptions, SearchOptions};

pub const BOOK_TOML: &str = "book.toml";

/// `[output.html.search]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchConfig {
    /// When false, `quire index` writes nothing.
    pub enable: bool,
    pub limit_results: usize,
    pub teaser_word_count: usize,
    pub use_boolean_and: bool,
    pub boost_title: f64,
    pub boost_hierarchy: f64,
    pub boost_paragraph: f64,
    pub expand: bool,
    /// Headings at this level or above start a new indexed section.
    pub heading_split_level: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enable: true,
            limit_results: 30,
            teaser_word_count: 30,
            use_boolean_and: false,
            boost_title: 2.0,
            boost_hierarchy: 1.0,
            boost_paragraph: 1.0,
            expand: true,
            heading_split_level: 3,
        }
    }
}

impl SearchConfig {
    /// Search settings of the book at `book_dir`.
    pub fn load(book_dir: impl AsRef<Path>) -> Result<Self> {
        Ok(BookConfig::load(book_dir)?.search)
    }

    pub fn results_options(&self) -> ResultsOptions {
        ResultsOptions {
            limit_results: self.limit_results,
            teaser_word_count: self.teaser_word_count,
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            bool: if self.use_boolean_and {
                BoolMode::And
            } else {
                BoolMode::Or
            },
            expand: self.expand,
            fields: PerField {
                body: FieldBoost {
                    boost: self.boost_paragraph,
                },
                breadcrumbs: FieldBoost {
                    boost: self.boost_hierarchy,
                },
                title: FieldBoost {
                    boost: self.boost_title,
                },
            },
        }
    }
}

/// The parts of `book.toml` the indexer cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct BookConfig {
    pub title: Option<String>,
    /// Chapter sources, relative to the book root.
    pub src: PathBuf,
    pub search: SearchConfig,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            title: None,
            src: PathBuf::from("src"),
            search: SearchConfig::default(),
        }
    }
}

// Raw file layout. Unknown tables and keys are ignored.

#[derive(Debug, Default, Deserialize)]
struct RawBookToml {
    #[serde(default)]
    book: RawBook,
    #[serde(default)]
    output: RawOutput,
}

#[derive(Debug, Default, Deserialize)]
struct RawBook {
    title: Option<String>,
    src: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOutput {
    #[serde(default)]
    html: RawHtml,
}

#[derive(Debug, Default, Deserialize)]
struct RawHtml {
    #[serde(default)]
    search: SearchConfig,
}

impl BookConfig {
    /// Parse `book.toml` text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let raw: RawBookToml = toml::from_str(text)?;
        let defaults = BookConfig::default();
        Ok(Self {
            title: raw.book.title,
            src: raw.book.src.unwrap_or(defaults.src),
            search: raw.output.html.search,
        })
    }

    /// Read `<book_dir>/book.toml`, or defaults if there is none.
    pub fn load(book_dir: impl AsRef<Path>) -> Result<Self> {
        let path = book_dir.as_ref().join(BOOK_TOML);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no book.toml, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded book config");
        Ok(config)
    }
}
