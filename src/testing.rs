//! Test utilities shared across unit tests, integration tests and benches.
//!
//! Always compiled but hidden from documentation.

#![doc(hidden)]

use std::fs;
use std::io;
use std::path::Path;

use crate::builder::{DocumentFields, IndexBuilder};
use crate::types::BookIndex;

pub fn fields(title: &str, body: &str, breadcrumbs: &str) -> DocumentFields {
    DocumentFields {
        title: title.to_string(),
        body: body.to_string(),
        breadcrumbs: breadcrumbs.to_string(),
    }
}

/// A small book: four sections over three pages.
pub fn sample_index() -> BookIndex {
    let mut builder = IndexBuilder::new();
    builder.add_document(
        "introduction.html#why-templates",
        fields(
            "Why Templates?",
            "Skip the boilerplate and ship Starknet contracts faster.",
            "Introduction » Why Templates?",
        ),
    );
    builder.add_document(
        "introduction.html#how-to-start",
        fields(
            "How to Start",
            "Clone a template, compile it with Scarb and deploy the contract.",
            "Introduction » How to Start",
        ),
    );
    builder.add_document(
        "templates/dao.html",
        fields(
            "DAO",
            "A DAO contract with proposals, voting and treasury management in Cairo.",
            "Templates » DAO",
        ),
    );
    builder.add_document(
        "templates/erc20.html",
        fields(
            "Fungible Token",
            "An ERC20 token contract. Mint, burn and transfer tokens on Starknet.",
            "Templates » Fungible Token",
        ),
    );
    builder.finish()
}

/// Write a book to `root`: `book.toml` (when given), `src/SUMMARY.md` and
/// each `(path, content)` chapter under `src/`.
pub fn write_book(
    root: &Path,
    book_toml: Option<&str>,
    summary: &str,
    chapters: &[(&str, &str)],
) -> io::Result<()> {
    let src = root.join("src");
    fs::create_dir_all(&src)?;
    if let Some(toml) = book_toml {
        fs::write(root.join("book.toml"), toml)?;
    }
    fs::write(src.join("SUMMARY.md"), summary)?;
    for (path, content) in chapters {
        let path = src.join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(())
}
