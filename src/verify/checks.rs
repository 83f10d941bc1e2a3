// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The consistency checks behind `ValidatedIndex`.
//!
//! `verify` never stops at the first problem: `quire verify` prints every
//! violation so a broken build can be diagnosed in one pass.

use std::collections::BTreeSet;

use crate::pipeline::is_known_step;
use crate::types::{BookIndex, Field};

use super::types::{InvariantError, VerificationReport};

/// Check every consistency invariant of `index`.
pub fn verify(index: &BookIndex) -> VerificationReport {
    let mut report = VerificationReport {
        docs: index.index.document_store.doc_info.len(),
        ..VerificationReport::default()
    };

    check_store(index, &mut report.violations);
    check_fields(index, &mut report.violations);
    check_pipeline(index, &mut report.violations);

    for field in Field::ALL {
        let root = &index.field_index(field).root;
        root.walk(&mut |term, node| {
            if node.df != node.docs.len() {
                report.violations.push(InvariantError::IncorrectDocFreq {
                    field,
                    term: term.to_string(),
                    claimed: node.df,
                    actual: node.docs.len(),
                });
            }
            if node.is_terminal() {
                report.terms += 1;
            }
            for (&doc_id, tf) in &node.docs {
                report.postings += 1;
                if !index.index.document_store.doc_info.contains_key(&doc_id) {
                    report.violations.push(InvariantError::UnknownDocId {
                        field,
                        term: term.to_string(),
                        doc_id,
                    });
                }
                if doc_id >= index.doc_urls.len() {
                    report.violations.push(InvariantError::MissingDocUrl {
                        doc_id,
                        urls_len: index.doc_urls.len(),
                    });
                }
                if !tf.tf.is_finite() || tf.tf < 0.0 {
                    report.violations.push(InvariantError::InvalidTermFrequency {
                        field,
                        term: term.to_string(),
                        doc_id,
                        tf: tf.tf,
                    });
                }
            }
        });
    }

    if !report.is_ok() {
        tracing::debug!(violations = report.violations.len(), "index failed verification");
    }
    report
}

fn check_store(index: &BookIndex, violations: &mut Vec<InvariantError>) {
    let store = &index.index.document_store;
    let docs_len = store.doc_info.len();

    if store.save {
        let info_ids: BTreeSet<_> = store.doc_info.keys().copied().collect();
        let doc_ids: BTreeSet<_> = store.docs.keys().copied().collect();
        for &doc_id in info_ids.symmetric_difference(&doc_ids) {
            violations.push(InvariantError::StoreMismatch { doc_id });
        }
    }

    if store.length != docs_len {
        violations.push(InvariantError::IncorrectLength {
            claimed: store.length,
            actual: docs_len,
        });
    }

    if index.doc_urls.len() != docs_len {
        violations.push(InvariantError::MismatchedDocUrls {
            urls_len: index.doc_urls.len(),
            docs_len,
        });
    }

    for &doc_id in store.doc_info.keys() {
        if doc_id >= index.doc_urls.len() {
            violations.push(InvariantError::MissingDocUrl {
                doc_id,
                urls_len: index.doc_urls.len(),
            });
        }
    }
}

fn check_fields(index: &BookIndex, violations: &mut Vec<InvariantError>) {
    if index.index.fields.is_empty() {
        violations.push(InvariantError::NoFields);
    }

    let mut seen = BTreeSet::new();
    for &field in &index.index.fields {
        if !seen.insert(field) {
            violations.push(InvariantError::DuplicateField { field });
        }
    }

    for (field, boost) in index.search_options.fields.iter() {
        if !boost.boost.is_finite() || boost.boost < 0.0 {
            violations.push(InvariantError::InvalidBoost {
                field,
                boost: boost.boost,
            });
        }
    }
}

fn check_pipeline(index: &BookIndex, violations: &mut Vec<InvariantError>) {
    for name in &index.index.pipeline {
        if !is_known_step(name) {
            violations.push(InvariantError::UnknownPipelineStep { name: name.clone() });
        }
    }
}
