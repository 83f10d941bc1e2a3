//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use quire::{format, BookIndex, Searcher, ValidatedIndex};

// Re-export canonical test utilities from quire::testing
pub use quire::testing::{fields, sample_index, write_book};

// ============================================================================
// FIXTURES
// ============================================================================

/// An index produced by mdBook for a seven-section book (Cairo Academy).
pub const FIXTURE_JS: &str = "tests/fixtures/searchindex.js";

pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(FIXTURE_JS)
}

pub fn load_fixture() -> BookIndex {
    format::load_path(fixture_path()).expect("fixture should load")
}

pub fn fixture_searcher() -> Searcher {
    searcher_for(load_fixture())
}

pub fn searcher_for(index: BookIndex) -> Searcher {
    let validated = ValidatedIndex::new(index).expect("index should verify");
    Searcher::new(validated).expect("pipeline should be known")
}

/// Doc ids of `hits`, in rank order.
pub fn ids(hits: &[quire::SearchHit]) -> Vec<usize> {
    hits.iter().map(|hit| hit.doc_id).collect()
}

// ============================================================================
// BOOKS
// ============================================================================

pub const SUMMARY: &str = "\
# Summary

[Introduction](README.md)

# Templates

- [Tokens](tokens/README.md)
    - [Fungible](tokens/erc20.md)
- [DAO](dao.md)
";

pub const README: &str = "\
# Cairo Academy

Templates for Starknet developers.

## Why Templates?

Skip the boilerplate and deploy contracts faster.
";

pub const TOKENS: &str = "\
# Tokens

Token standards on Starknet.
";

pub const ERC20: &str = "\
# Fungible Tokens

An ERC20 contract with mint and burn.

### Events

Transfer and Approval events.
";

pub const DAO: &str = "\
# DAO

Proposals, voting and a treasury.
";

/// A four-chapter book with one nested chapter.
pub fn write_sample_book(root: &Path, book_toml: Option<&str>) {
    write_book(
        root,
        book_toml,
        SUMMARY,
        &[
            ("README.md", README),
            ("tokens/README.md", TOKENS),
            ("tokens/erc20.md", ERC20),
            ("dao.md", DAO),
        ],
    )
    .expect("book should be written");
}
