// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Type wrappers that make invalid states unrepresentable.
//!
//! An index read off disk is just data. Wrap it in `ValidatedIndex` and every
//! doc id the tries mention is guaranteed to resolve to a URL and a `docInfo`
//! entry, so the searcher can index into them without second-guessing.
//!
//! # Example
//!
//! ```ignore
//! let index = ValidatedIndex::new(format::load_path("book/searchindex.json")?)?;
//! let searcher = Searcher::new(index)?;
//! ```

use std::fmt;

use crate::types::{BookIndex, DocId, Field};

use super::checks::verify;

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantError {
    /// A trie posting names a document missing from `docInfo`.
    UnknownDocId {
        field: Field,
        term: String,
        doc_id: DocId,
    },
    /// A document has no URL in `doc_urls`.
    MissingDocUrl { doc_id: DocId, urls_len: usize },
    /// A term frequency is negative, NaN, or infinite.
    InvalidTermFrequency {
        field: Field,
        term: String,
        doc_id: DocId,
        tf: f64,
    },
    /// Node `df` doesn't match its posting count.
    IncorrectDocFreq {
        field: Field,
        term: String,
        claimed: usize,
        actual: usize,
    },
    /// A document is in `docInfo` but not in the stored `docs`, or the reverse.
    StoreMismatch { doc_id: DocId },
    /// `documentStore.length` disagrees with the number of documents.
    IncorrectLength { claimed: usize, actual: usize },
    /// `doc_urls` and the document store have different sizes.
    MismatchedDocUrls { urls_len: usize, docs_len: usize },
    /// The `fields` list is empty.
    NoFields,
    /// A field appears twice in `fields`.
    DuplicateField { field: Field },
    /// A field boost is negative, NaN, or infinite.
    InvalidBoost { field: Field, boost: f64 },
    /// The pipeline names a step this crate can't run.
    UnknownPipelineStep { name: String },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::UnknownDocId {
                field,
                term,
                doc_id,
            } => {
                write!(
                    f,
                    "{} term '{}' references doc {} which is not in docInfo",
                    field, term, doc_id
                )
            }
            InvariantError::MissingDocUrl { doc_id, urls_len } => {
                write!(f, "doc {} >= doc_urls.len() {}", doc_id, urls_len)
            }
            InvariantError::InvalidTermFrequency {
                field,
                term,
                doc_id,
                tf,
            } => {
                write!(
                    f,
                    "{} term '{}' has tf {} for doc {}",
                    field, term, tf, doc_id
                )
            }
            InvariantError::IncorrectDocFreq {
                field,
                term,
                claimed,
                actual,
            } => {
                write!(
                    f,
                    "{} term '{}' has df {} but {} postings",
                    field, term, claimed, actual
                )
            }
            InvariantError::StoreMismatch { doc_id } => {
                write!(f, "doc {} is in only one of docInfo and docs", doc_id)
            }
            InvariantError::IncorrectLength { claimed, actual } => {
                write!(f, "documentStore.length {} != {} documents", claimed, actual)
            }
            InvariantError::MismatchedDocUrls { urls_len, docs_len } => {
                write!(f, "doc_urls.len() {} != {} documents", urls_len, docs_len)
            }
            InvariantError::NoFields => write!(f, "index declares no fields"),
            InvariantError::DuplicateField { field } => {
                write!(f, "field '{}' is declared twice", field)
            }
            InvariantError::InvalidBoost { field, boost } => {
                write!(f, "field '{}' has boost {}", field, boost)
            }
            InvariantError::UnknownPipelineStep { name } => {
                write!(f, "unknown pipeline step '{}'", name)
            }
        }
    }
}

impl std::error::Error for InvariantError {}

/// Everything the verifier found, plus a few counts for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationReport {
    pub violations: Vec<InvariantError>,
    pub docs: usize,
    pub terms: usize,
    pub postings: usize,
}

impl VerificationReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// The first violation, if any.
    pub fn into_result(self) -> Result<(), InvariantError> {
        match self.violations.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// A search index with all consistency invariants verified.
///
/// # Invariants (enforced at construction)
/// - Every posting's doc id is in `docInfo` and `< doc_urls.len()`
/// - `docInfo`, `docs` (when saved) and `doc_urls` describe the same documents
/// - Every `tf` is finite and non-negative, every `df` matches its postings
/// - Fields are non-empty and unique, boosts are finite and non-negative
/// - Every pipeline step is known
#[derive(Debug, Clone)]
pub struct ValidatedIndex {
    inner: BookIndex,
}

impl ValidatedIndex {
    /// Validate `index`, returning the first violation found.
    pub fn new(index: BookIndex) -> Result<Self, InvariantError> {
        verify(&index).into_result()?;
        Ok(Self { inner: index })
    }

    pub fn index(&self) -> &BookIndex {
        &self.inner
    }

    pub fn into_inner(self) -> BookIndex {
        self.inner
    }
}

impl AsRef<BookIndex> for ValidatedIndex {
    fn as_ref(&self) -> &BookIndex {
        &self.inner
    }
}
