// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query execution against a validated index.
//!
//! ```text
//! query ──tokenize──▶ pipeline ──▶ tokens
//!                                    │
//!          ┌─────────────────────────┼─────────────────────────┐
//!          ▼                         ▼                         ▼
//!     title trie               body trie              breadcrumbs trie
//!   (expand, tf·idf·norm)    (expand, tf·idf·norm)   (expand, tf·idf·norm)
//!          │ × boost                 │ × boost                 │ × boost
//!          └──────────────── sum ────┴─────────────────────────┘
//!                                    │
//!                         rank ▶ limit ▶ teaser
//! ```
//!
//! Options default to what the index itself carries (`search_options`,
//! `results_options`). `QueryOptions` overrides them per call.

mod teaser;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;
use crate::pipeline::{Pipeline, Stemmer};
use crate::scoring::ranking::{coordination_norm, merge_scores, rank, Scores};
use crate::scoring::{expansion_penalty, field_length_norm, idf, term_score};
use crate::types::{BookIndex, BoolMode, DocId, Field, PerField};
use crate::verify::ValidatedIndex;

pub use teaser::make_teaser;

/// Per-call overrides. `None` means "use the index's setting".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    pub bool_mode: Option<BoolMode>,
    pub expand: Option<bool>,
    pub boosts: Option<PerField<f64>>,
    pub limit: Option<usize>,
    pub teaser_word_count: Option<usize>,
}

/// Options after merging overrides with the index defaults.
#[derive(Debug, Clone, PartialEq)]
struct ResolvedOptions {
    bool_mode: BoolMode,
    expand: bool,
    boosts: PerField<f64>,
    limit: usize,
    teaser_word_count: usize,
}

/// One ranked result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f64,
    pub url: String,
    pub title: String,
    pub breadcrumbs: String,
    pub teaser: String,
}

/// Answers queries against one index.
#[derive(Debug)]
pub struct Searcher {
    index: ValidatedIndex,
    pipeline: Pipeline,
    stemmer: Stemmer,
}

impl Searcher {
    /// Prepare a searcher, rebuilding the pipeline the index was built with.
    pub fn new(index: ValidatedIndex) -> Result<Self> {
        let pipeline = Pipeline::from_names(&index.index().index.pipeline)?;
        Ok(Self {
            index,
            pipeline,
            stemmer: Stemmer::english(),
        })
    }

    pub fn index(&self) -> &BookIndex {
        self.index.index()
    }

    /// Search with the index's own options.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.search_with(query, &QueryOptions::default())
    }

    pub fn search_with(&self, query: &str, options: &QueryOptions) -> Vec<SearchHit> {
        let options = self.resolve(options);
        let ranked = rank(self.score_query(query, &options), options.limit);
        tracing::debug!(query, hits = ranked.len(), "search complete");

        let terms: Vec<String> = query.split_whitespace().map(str::to_string).collect();
        ranked
            .into_iter()
            .map(|(doc_id, score)| self.hit(doc_id, score, &terms, options.teaser_word_count))
            .collect()
    }

    /// Raw per-document scores for `query`, before ranking and limiting.
    pub fn scores(&self, query: &str, options: &QueryOptions) -> Scores {
        self.score_query(query, &self.resolve(options))
    }

    fn resolve(&self, options: &QueryOptions) -> ResolvedOptions {
        let index = self.index();
        let defaults = &index.search_options;
        ResolvedOptions {
            bool_mode: options.bool_mode.unwrap_or(defaults.bool),
            expand: options.expand.unwrap_or(defaults.expand),
            boosts: options.boosts.clone().unwrap_or(PerField {
                body: defaults.fields.body.boost,
                breadcrumbs: defaults.fields.breadcrumbs.boost,
                title: defaults.fields.title.boost,
            }),
            limit: options
                .limit
                .unwrap_or(index.results_options.limit_results),
            teaser_word_count: options
                .teaser_word_count
                .unwrap_or(index.results_options.teaser_word_count),
        }
    }

    fn score_query(&self, query: &str, options: &ResolvedOptions) -> Scores {
        let tokens = self.pipeline.run_text(query);
        if tokens.is_empty() {
            return Scores::new();
        }

        let mut total = Scores::new();
        for field in Field::ALL {
            let boost = *options.boosts.get(field);
            if boost == 0.0 {
                continue;
            }
            for (doc, score) in self.field_scores(field, &tokens, options) {
                *total.entry(doc).or_insert(0.0) += score * boost;
            }
        }
        total
    }

    fn field_scores(&self, field: Field, tokens: &[String], options: &ResolvedOptions) -> Scores {
        let index = self.index();
        let root = &index.field_index(field).root;
        let doc_count = index.doc_count();

        let mut scores: Option<Scores> = None;
        let mut exact_hits: BTreeMap<DocId, usize> = BTreeMap::new();

        for token in tokens {
            let keys = if options.expand {
                root.expand(token)
            } else {
                vec![token.clone()]
            };

            let mut token_scores = Scores::new();
            for key in &keys {
                let Some(node) = root.get(key) else {
                    continue;
                };
                let idf = idf(node.df, doc_count);
                let penalty = expansion_penalty(key, token);

                for (&doc, tf) in &node.docs {
                    if let (Some(acc), BoolMode::And) = (&scores, options.bool_mode) {
                        if !acc.contains_key(&doc) {
                            continue;
                        }
                    }
                    if key == token {
                        *exact_hits.entry(doc).or_insert(0) += 1;
                    }
                    let norm = field_length_norm(index.field_length(doc, field));
                    *token_scores.entry(doc).or_insert(0.0) += term_score(tf.tf, idf, norm, penalty);
                }
            }
            scores = Some(merge_scores(scores, token_scores, options.bool_mode));
        }

        let mut scores = scores.unwrap_or_default();
        coordination_norm(&mut scores, &exact_hits, tokens.len());
        scores
    }

    fn hit(&self, doc_id: DocId, score: f64, terms: &[String], teaser_words: usize) -> SearchHit {
        let index = self.index();
        // ValidatedIndex guarantees the url; stored text is optional (`save: false`)
        let url = index.doc_url(doc_id).unwrap_or_default().to_string();
        let (title, breadcrumbs, teaser) = match index.stored_doc(doc_id) {
            Some(doc) => (
                doc.title.clone(),
                doc.breadcrumbs.clone(),
                make_teaser(&doc.body, terms, teaser_words, &self.stemmer),
            ),
            None => Default::default(),
        };
        SearchHit {
            doc_id,
            score,
            url,
            title,
            breadcrumbs,
            teaser,
        }
    }
}
