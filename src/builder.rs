// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Accumulates sections into a `BookIndex`.
//!
//! Documents get consecutive ids in the order they are added, so the caller
//! decides the final ordering (book order, for `build`). Each field is run
//! through the pipeline on its own:
//!
//! ```text
//! "Templates for templates"  ──pipeline──▶  [templat, templat]
//!                                              │
//!                    docInfo.title = 2  ◀──────┤ count
//!                    trie: templat → {doc: tf = sqrt(2)}
//! ```
//!
//! The result always passes `verify`.

use std::collections::BTreeMap;

use crate::config::SearchConfig;
use crate::pipeline::Pipeline;
use crate::types::{
    BookIndex, DocId, DocumentStore, ElasticIndex, Field, FieldIndex, FieldLengths, PerField,
    StoredDoc, DEFAULT_LANG, INDEX_VERSION, REF_FIELD,
};

/// The searchable text of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFields {
    pub title: String,
    pub body: String,
    pub breadcrumbs: String,
}

impl DocumentFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Body => &self.body,
            Field::Breadcrumbs => &self.breadcrumbs,
            Field::Title => &self.title,
        }
    }
}

#[derive(Debug)]
pub struct IndexBuilder {
    pipeline: Pipeline,
    config: SearchConfig,
    save: bool,
    doc_urls: Vec<String>,
    doc_info: BTreeMap<DocId, FieldLengths>,
    docs: BTreeMap<DocId, StoredDoc>,
    index: PerField<FieldIndex>,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexBuilder {
    /// Builder with the standard pipeline and default options.
    pub fn new() -> Self {
        Self {
            pipeline: Pipeline::default(),
            config: SearchConfig::default(),
            save: true,
            doc_urls: Vec::new(),
            doc_info: BTreeMap::new(),
            docs: BTreeMap::new(),
            index: PerField::default(),
        }
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Take `results_options` and `search_options` from a book's config.
    pub fn with_options(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether to keep each section's text in the document store.
    /// Without it, results have no title or teaser.
    pub fn store_documents(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    /// Index one section, returning its id.
    pub fn add_document(&mut self, url: impl Into<String>, fields: DocumentFields) -> DocId {
        let doc_id = self.doc_urls.len();
        self.doc_urls.push(url.into());

        let mut lengths = FieldLengths::default();
        for field in Field::ALL {
            let tokens = self.pipeline.run_text(fields.get(field));
            *lengths.get_mut(field) = tokens.len();

            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for token in tokens {
                *counts.entry(token).or_insert(0) += 1;
            }
            let root = &mut self.index.get_mut(field).root;
            for (term, count) in counts {
                root.insert(&term, doc_id, (count as f64).sqrt());
            }
        }
        self.doc_info.insert(doc_id, lengths);

        if self.save {
            self.docs.insert(
                doc_id,
                StoredDoc {
                    body: fields.body,
                    breadcrumbs: fields.breadcrumbs,
                    id: doc_id.to_string(),
                    title: fields.title,
                },
            );
        }
        doc_id
    }

    pub fn len(&self) -> usize {
        self.doc_urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_urls.is_empty()
    }

    pub fn finish(self) -> BookIndex {
        let length = self.doc_urls.len();
        tracing::debug!(
            docs = length,
            title_terms = self.index.title.root.term_count(),
            body_terms = self.index.body.root.term_count(),
            "index built"
        );
        BookIndex {
            doc_urls: self.doc_urls,
            index: ElasticIndex {
                document_store: DocumentStore {
                    doc_info: self.doc_info,
                    docs: self.docs,
                    length,
                    save: self.save,
                },
                fields: Field::DECLARED.to_vec(),
                index: self.index,
                lang: DEFAULT_LANG.to_string(),
                pipeline: self.pipeline.names(),
                ref_field: REF_FIELD.to_string(),
                version: INDEX_VERSION.to_string(),
            },
            results_options: self.config.results_options(),
            search_options: self.config.search_options(),
        }
    }
}
