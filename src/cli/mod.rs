// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the quire command-line interface.
//!
//! Four subcommands: `index` builds `searchindex.{json,js}` from a book,
//! `inspect` summarizes an index file, `search` runs a query against one, and
//! `verify` checks an index for consistency (exit status 1 on any violation).

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "quire",
    about = "Build, inspect, and query search indexes for documentation books",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a search index from a book's sources
    Index {
        /// Book root: the directory holding book.toml and src/SUMMARY.md
        #[arg(short, long)]
        book: PathBuf,

        /// Output directory for searchindex.json and searchindex.js
        #[arg(short, long)]
        output: PathBuf,

        /// Append a content hash to the output file names
        #[arg(long)]
        hash_files: bool,
    },

    /// Summarize an index file: documents, terms, options, size
    Inspect {
        /// Path to searchindex.json or searchindex.js
        file: PathBuf,
    },

    /// Search an index file and display ranked results
    Search {
        /// Path to searchindex.json or searchindex.js
        file: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results (defaults to the index's limit_results)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Require every query word to match
        #[arg(long)]
        and: bool,

        /// Match whole terms only, no prefix expansion
        #[arg(long)]
        no_expand: bool,
    },

    /// Check an index file for consistency
    Verify {
        /// Path to searchindex.json or searchindex.js
        file: PathBuf,
    },
}
