// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The shape of a book search index.
//!
//! Everything here mirrors the JSON consumed by the browser-side search widget,
//! key for key. The top level uses snake_case (`doc_urls`, `results_options`),
//! the elasticlunr part under `index` uses camelCase (`documentStore`,
//! `docInfo`). Renaming a field here breaks every shipped book.
//!
//! ```text
//! BookIndex
//! ├── doc_urls          [url; N]            index-aligned with doc ids
//! ├── index             ElasticIndex
//! │   ├── documentStore docInfo + docs      per-doc word counts, stored text
//! │   ├── index         title/body/breadcrumbs → trie
//! │   └── pipeline      ["trimmer", "stopWordFilter", "stemmer"]
//! ├── results_options   limit + teaser size
//! └── search_options    bool mode, expansion, per-field boost
//! ```
//!
//! # Invariants
//!
//! - Every doc id referenced by a trie has a `docInfo` entry and a URL.
//! - `documentStore.length == docInfo.len() == doc_urls.len()`.
//! - Term frequencies are finite and non-negative.
//!
//! These are checked by `verify`, not by deserialization.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::trie::TrieNode;

/// Document identifier: position in `doc_urls`, serialized as a decimal string key.
pub type DocId = usize;

/// Index format version written by the builder.
pub const INDEX_VERSION: &str = "0.9.5";

/// The document key field name (`ref` in the JSON).
pub const REF_FIELD: &str = "id";

/// Language tag written by the builder.
pub const DEFAULT_LANG: &str = "English";

// =============================================================================
// FIELDS
// =============================================================================

/// A searchable field of a book section.
///
/// Declaration order is the JSON key order, which is alphabetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Body,
    Breadcrumbs,
    Title,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Body, Field::Breadcrumbs, Field::Title];

    /// Order in which fields are listed in `index.fields`.
    pub const DECLARED: [Field; 3] = [Field::Title, Field::Body, Field::Breadcrumbs];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Body => "body",
            Field::Breadcrumbs => "breadcrumbs",
            Field::Title => "title",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "body" => Ok(Field::Body),
            "breadcrumbs" => Ok(Field::Breadcrumbs),
            "title" => Ok(Field::Title),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

/// One value per searchable field.
///
/// Serializes as `{"body": .., "breadcrumbs": .., "title": ..}`, which is how
/// `docInfo` entries, the per-field tries, and the field boosts are all laid out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerField<T> {
    pub body: T,
    pub breadcrumbs: T,
    pub title: T,
}

impl<T> PerField<T> {
    pub fn get(&self, field: Field) -> &T {
        match field {
            Field::Body => &self.body,
            Field::Breadcrumbs => &self.breadcrumbs,
            Field::Title => &self.title,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut T {
        match field {
            Field::Body => &mut self.body,
            Field::Breadcrumbs => &mut self.breadcrumbs,
            Field::Title => &mut self.title,
        }
    }

    /// Iterate `(field, value)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &T)> {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }
}

/// Word counts per field, after the pipeline has run.
pub type FieldLengths = PerField<usize>;

// =============================================================================
// DOCUMENT STORE
// =============================================================================

/// Stored copy of a section's text, used for result titles and teasers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDoc {
    pub body: String,
    pub breadcrumbs: String,
    pub id: String,
    pub title: String,
}

impl StoredDoc {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Body => &self.body,
            Field::Breadcrumbs => &self.breadcrumbs,
            Field::Title => &self.title,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStore {
    #[serde(rename = "docInfo")]
    pub doc_info: BTreeMap<DocId, FieldLengths>,
    #[serde(default)]
    pub docs: BTreeMap<DocId, StoredDoc>,
    pub length: usize,
    pub save: bool,
}

// =============================================================================
// INVERTED INDEX
// =============================================================================

/// The inverted index for one field: a character trie under `root`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldIndex {
    pub root: TrieNode,
}

/// The elasticlunr index object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticIndex {
    pub document_store: DocumentStore,
    pub fields: Vec<Field>,
    pub index: PerField<FieldIndex>,
    pub lang: String,
    pub pipeline: Vec<String>,
    #[serde(rename = "ref")]
    pub ref_field: String,
    pub version: String,
}

// =============================================================================
// OPTIONS
// =============================================================================

/// How per-token scores are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BoolMode {
    /// A document matches if any query token matches.
    #[default]
    Or,
    /// A document matches only if every query token matches.
    And,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultsOptions {
    pub limit_results: usize,
    pub teaser_word_count: usize,
}

impl Default for ResultsOptions {
    fn default() -> Self {
        Self {
            limit_results: 30,
            teaser_word_count: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBoost {
    pub boost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub bool: BoolMode,
    pub expand: bool,
    pub fields: PerField<FieldBoost>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            bool: BoolMode::Or,
            expand: true,
            fields: PerField {
                body: FieldBoost { boost: 1.0 },
                breadcrumbs: FieldBoost { boost: 1.0 },
                title: FieldBoost { boost: 2.0 },
            },
        }
    }
}

// =============================================================================
// TOP LEVEL
// =============================================================================

/// A complete search index as shipped next to a rendered book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookIndex {
    pub doc_urls: Vec<String>,
    pub index: ElasticIndex,
    pub results_options: ResultsOptions,
    pub search_options: SearchOptions,
}

impl BookIndex {
    pub fn doc_count(&self) -> usize {
        self.index.document_store.length
    }

    pub fn field_index(&self, field: Field) -> &FieldIndex {
        self.index.index.get(field)
    }

    pub fn doc_url(&self, doc: DocId) -> Option<&str> {
        self.doc_urls.get(doc).map(String::as_str)
    }

    pub fn stored_doc(&self, doc: DocId) -> Option<&StoredDoc> {
        self.index.document_store.docs.get(&doc)
    }

    pub fn doc_info(&self, doc: DocId) -> Option<&FieldLengths> {
        self.index.document_store.doc_info.get(&doc)
    }

    /// Word count of `field` in `doc`, 0 when the doc is unknown.
    pub fn field_length(&self, doc: DocId, field: Field) -> usize {
        self.doc_info(doc).map_or(0, |info| *info.get(field))
    }

    /// Number of distinct terms indexed under `field`.
    pub fn term_count(&self, field: Field) -> usize {
        self.field_index(field).root.term_count()
    }
}
