//! Elasticlunr-style search indexes for documentation books.
//!
//! A book's search index is a JSON document (optionally wrapped in a
//! `<script>`-loadable `.js` file) holding one character trie per field, a
//! document store with per-field word counts, and the options the browser
//! widget searches with. This crate reads, verifies, queries, and builds
//! that format.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  build/     │────▶│  builder.rs  │────▶│  types.rs   │
//! │ (SUMMARY.md,│     │ (IndexBuilder│     │ (BookIndex, │
//! │  chapters)  │     │  + pipeline) │     │  TrieNode)  │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                                                 │
//!        ┌────────────────────────────────────────┤
//!        ▼                                        ▼
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  format.rs  │     │  verify/     │────▶│  search/    │
//! │ (.json/.js) │     │(ValidatedIdx)│     │ (Searcher,  │
//! └─────────────┘     └──────────────┘     │  teaser)    │
//!                                          └─────────────┘
//! ```
//!
//! | Module     | Role                                                   |
//! |------------|--------------------------------------------------------|
//! | `types`    | Serde model of the index, key for key                  |
//! | `trie`     | Per-field inverted index as a character trie           |
//! | `pipeline` | Tokenizer and the trimmer / stop word / stemmer steps  |
//! | `format`   | Load and write `searchindex.json` / `searchindex.js`   |
//! | `verify`   | Consistency checks, `ValidatedIndex`                   |
//! | `scoring`  | tf × idf × length norm, boolean merge, coordination    |
//! | `search`   | Query execution and teasers                            |
//! | `builder`  | Sections in, `BookIndex` out                           |
//! | `build`    | Book directory in, index files out                     |
//! | `config`   | `book.toml` search settings                            |
//!
//! # Usage
//!
//! ```ignore
//! use quire::{format, Searcher, ValidatedIndex};
//!
//! let index = format::load_path("book/searchindex.js")?;
//! let searcher = Searcher::new(ValidatedIndex::new(index)?)?;
//! for hit in searcher.search("deploy contract") {
//!     println!("{:.3} {} {}", hit.score, hit.url, hit.teaser);
//! }
//! ```

pub mod build;
pub mod builder;
pub mod config;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod scoring;
pub mod search;
pub mod testing;
pub mod trie;
pub mod types;
mod utils;
pub mod verify;

pub use builder::{DocumentFields, IndexBuilder};
pub use config::{BookConfig, SearchConfig};
pub use error::{Error, Result};
pub use pipeline::Pipeline;
pub use search::{QueryOptions, SearchHit, Searcher};
pub use trie::TrieNode;
pub use types::{BookIndex, BoolMode, DocId, Field, PerField};
pub use utils::{normalize, normalize_id};
pub use verify::{verify, InvariantError, ValidatedIndex, VerificationReport};
