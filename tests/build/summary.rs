//! Table of contents and chapter loading on a book laid out on disk.

use std::path::PathBuf;

use quire::build::{load_chapters, load_summary, Chapter};
use quire::error::Error;
use tempfile::TempDir;

use crate::common::{write_book, write_sample_book};

#[test]
fn test_load_summary_from_disk() {
    let dir = TempDir::new().unwrap();
    write_sample_book(dir.path(), None);

    let entries = load_summary(&dir.path().join("src")).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Introduction", "Tokens", "Fungible", "DAO"]);
    assert_eq!(entries[2].path, Some(PathBuf::from("tokens/erc20.md")));
    assert_eq!(entries[2].parents, vec!["Tokens"]);
    assert!(entries[3].parents.is_empty());
}

#[test]
fn test_missing_summary_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_summary(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }), "{:?}", err);
}

#[test]
fn test_bad_summary_names_file_and_line() {
    let dir = TempDir::new().unwrap();
    write_book(dir.path(), None, "- [One](one.md)\n- Two\n", &[("one.md", "# One\n")]).unwrap();

    let err = load_summary(&dir.path().join("src")).unwrap_err();
    match &err {
        Error::Summary { path, message } => {
            assert!(path.ends_with("SUMMARY.md"));
            assert!(message.starts_with("line 2"), "{}", message);
        }
        other => panic!("expected a summary error, got {:?}", other),
    }
}

#[test]
fn test_chapter_load() {
    let dir = TempDir::new().unwrap();
    write_sample_book(dir.path(), None);
    let src = dir.path().join("src");
    let entries = load_summary(&src).unwrap();

    let chapter = Chapter::load(&src, &entries[2]).unwrap().unwrap();
    assert_eq!(chapter.html_path(), "tokens/erc20.html");
    assert!(chapter.content.starts_with("# Fungible Tokens"));

    let sections = chapter.sections(3);
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].url(&chapter.html_path()), "tokens/erc20.html#fungible-tokens");
    assert_eq!(sections[0].breadcrumbs, "Tokens » Fungible » Fungible Tokens");
    assert_eq!(sections[1].title, "Events");

    // a lower split level keeps the ### heading in the body
    let sections = chapter.sections(2);
    assert_eq!(sections.len(), 1);
    assert!(sections[0].body.contains("Events Transfer and Approval events."));
}

#[test]
fn test_load_chapters_keeps_book_order() {
    let dir = TempDir::new().unwrap();
    write_sample_book(dir.path(), None);
    let src = dir.path().join("src");
    let entries = load_summary(&src).unwrap();

    let loaded = load_chapters(&src, &entries, 3);
    let pages: Vec<&str> = loaded.chapters.iter().map(|c| c.page.as_str()).collect();
    assert_eq!(pages, vec!["index.html", "tokens/index.html", "tokens/erc20.html", "dao.html"]);
    assert!(loaded.skipped.is_empty());
}

#[test]
fn test_drafts_are_not_loaded() {
    let dir = TempDir::new().unwrap();
    write_book(
        dir.path(),
        None,
        "- [Games]()\n    - [Chess](chess.md)\n",
        &[("chess.md", "# Chess\n\nOn-chain chess.\n")],
    )
    .unwrap();
    let src = dir.path().join("src");
    let entries = load_summary(&src).unwrap();

    let loaded = load_chapters(&src, &entries, 3);
    assert_eq!(loaded.chapters.len(), 1);
    assert_eq!(loaded.chapters[0].sections[0].breadcrumbs, "Games » Chess » Chess");
    assert!(loaded.skipped.is_empty());
}
