//! Loading, verifying and re-writing the fixture index.

use std::fs;

use quire::error::Error;
use quire::types::{BoolMode, Field};
use quire::{format, verify, InvariantError, ValidatedIndex};
use tempfile::TempDir;

use crate::common::{fixture_path, load_fixture};

// ============================================================================
// LOADING
// ============================================================================

#[test]
fn test_fixture_loads() {
    let index = load_fixture();
    assert_eq!(index.doc_count(), 7);
    assert_eq!(index.index.document_store.length, 7);
    assert!(index.index.document_store.save);
    assert_eq!(index.index.fields, Field::DECLARED.to_vec());
    assert_eq!(index.index.pipeline, vec!["trimmer", "stopWordFilter", "stemmer"]);
}

#[test]
fn test_fixture_doc_urls() {
    let index = load_fixture();
    assert_eq!(
        index.doc_url(0),
        Some("introduction.html#welcome-to-cairo-academy-jumpstart-your-starknet-development")
    );
    assert_eq!(index.doc_url(4), Some("chapter_1.html#chapter-1"));
    assert_eq!(index.doc_url(6), Some("contribution.html#join-the-starknet-ecosystem"));
    assert_eq!(index.doc_url(7), None);
}

#[test]
fn test_fixture_doc_info() {
    let index = load_fixture();
    assert_eq!(index.field_length(0, Field::Body), 29);
    assert_eq!(index.field_length(0, Field::Breadcrumbs), 7);
    assert_eq!(index.field_length(0, Field::Title), 6);
    assert_eq!(index.field_length(4, Field::Body), 0);
    assert_eq!(index.field_length(6, Field::Title), 3);
}

#[test]
fn test_fixture_stored_docs() {
    let index = load_fixture();
    let doc = index.stored_doc(4).unwrap();
    assert_eq!(doc.title, "Chapter 1");
    assert_eq!(doc.breadcrumbs, "Chapter 1 » Chapter 1");
    assert_eq!(doc.body, "");
    assert_eq!(index.stored_doc(1).unwrap().title, "Why Templates?");
}

#[test]
fn test_fixture_tries() {
    let index = load_fixture();
    let title = &index.field_index(Field::Title).root;
    assert_eq!(title.doc_freq("starknet"), 2);
    assert_eq!(title.doc_freq("templat"), 3);
    assert_eq!(title.doc_freq("chapter"), 1);
    assert_eq!(title.doc_freq("templ"), 0);

    let body = &index.field_index(Field::Body).root;
    assert_eq!(body.doc_freq("starknet"), 5);
    assert!((body.term_frequency("starknet", 0) - 3f64.sqrt()).abs() < 1e-12);
    assert_eq!(body.doc_freq("dao"), 1);
    assert_eq!(body.term_frequency("dao", 2), 1.0);
}

#[test]
fn test_fixture_options() {
    let index = load_fixture();
    assert_eq!(index.results_options.limit_results, 30);
    assert_eq!(index.results_options.teaser_word_count, 30);
    assert_eq!(index.search_options.bool, BoolMode::Or);
    assert!(index.search_options.expand);
    assert_eq!(index.search_options.fields.title.boost, 2.0);
    assert_eq!(index.search_options.fields.body.boost, 1.0);
    assert_eq!(index.search_options.fields.breadcrumbs.boost, 1.0);
}

#[test]
fn test_bare_json_loads_like_js() {
    let text = fs::read_to_string(fixture_path()).unwrap();
    let json = format::strip_js_wrapper(&text).unwrap();
    assert!(json.starts_with('{'));
    assert_eq!(format::from_str(json).unwrap(), load_fixture());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = format::load_path("tests/fixtures/nope.js").unwrap_err();
    assert!(matches!(err, Error::Io { .. }), "{:?}", err);
}

#[test]
fn test_truncated_file_is_rejected() {
    let text = fs::read_to_string(fixture_path()).unwrap();
    assert!(format::from_str(&text[..text.len() / 2]).is_err());
}

// ============================================================================
// VERIFICATION
// ============================================================================

#[test]
fn test_fixture_verifies() {
    let report = verify(&load_fixture());
    assert!(report.is_ok(), "{:?}", report.violations);
    assert_eq!(report.docs, 7);
    assert!(report.terms > 100);
    assert!(report.postings >= report.terms);
}

#[test]
fn test_corrupted_doc_freq_is_reported() {
    let mut index = load_fixture();
    let root = &mut index.index.index.body.root;
    let node = root.children.get_mut(&'d').unwrap();
    node.df = 9;
    let report = verify(&index);
    assert!(report.violations.iter().any(|v| matches!(
        v,
        InvariantError::IncorrectDocFreq { field: Field::Body, claimed: 9, .. }
    )));
    assert!(ValidatedIndex::new(index).is_err());
}

#[test]
fn test_dropped_url_is_reported() {
    let mut index = load_fixture();
    index.doc_urls.pop();
    let report = verify(&index);
    assert!(report
        .violations
        .contains(&InvariantError::MismatchedDocUrls { urls_len: 6, docs_len: 7 }));
    assert!(report
        .violations
        .contains(&InvariantError::MissingDocUrl { doc_id: 6, urls_len: 6 }));
}

// ============================================================================
// WRITING
// ============================================================================

#[test]
fn test_write_and_reload_js() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("searchindex.js");
    let index = load_fixture();
    format::write_js(&index, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Object.assign(window.search, "));
    assert!(text.trim_end().ends_with(");"));
    assert_eq!(format::load_path(&path).unwrap(), index);
}

#[test]
fn test_write_and_reload_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("searchindex.json");
    let index = load_fixture();
    format::write_json(&index, &path).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["index"]["documentStore"]["length"], 7);
    assert_eq!(value["doc_urls"].as_array().unwrap().len(), 7);
    assert_eq!(format::load_path(&path).unwrap(), index);
}
