// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Combining per-token scores and putting results in order.
//!
//! A query of several tokens scores each token separately, then folds the
//! per-token maps together:
//!
//! - **OR**: union, summing where both have the doc.
//! - **AND**: intersection, summing. One token with no hits empties the result.
//!
//! After folding, each document is scaled by the fraction of query tokens it
//! matched exactly (coordination). A page that mentions all three words beats
//! one that mentions a single word three times.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::types::{BoolMode, DocId};

/// Per-document scores for one field or one query.
pub type Scores = BTreeMap<DocId, f64>;

/// Fold `next` into the running total according to `mode`.
///
/// The first token has nothing to fold into: its scores become the total.
pub fn merge_scores(acc: Option<Scores>, next: Scores, mode: BoolMode) -> Scores {
    let Some(mut acc) = acc else {
        return next;
    };
    match mode {
        BoolMode::Or => {
            for (doc, score) in next {
                *acc.entry(doc).or_insert(0.0) += score;
            }
            acc
        }
        BoolMode::And => acc
            .into_iter()
            .filter_map(|(doc, score)| next.get(&doc).map(|other| (doc, score + other)))
            .collect(),
    }
}

/// Scale each document by `exact hits / query tokens`.
///
/// Documents reached only through prefix expansion have no exact hits recorded
/// and keep their score as is.
pub fn coordination_norm(scores: &mut Scores, exact_hits: &BTreeMap<DocId, usize>, tokens: usize) {
    if tokens == 0 {
        return;
    }
    for (doc, score) in scores.iter_mut() {
        if let Some(&hits) = exact_hits.get(doc) {
            *score *= hits as f64 / tokens as f64;
        }
    }
}

/// Order two scored documents: higher score first, then lower doc id.
pub fn compare_scored(a: (DocId, f64), b: (DocId, f64)) -> Ordering {
    match b.1.partial_cmp(&a.1) {
        Some(ord) if ord != Ordering::Equal => ord,
        _ => a.0.cmp(&b.0),
    }
}

/// Sort scores into a ranked list and keep the best `limit`.
pub fn rank(scores: Scores, limit: usize) -> Vec<(DocId, f64)> {
    let mut ranked: Vec<(DocId, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| compare_scored(*a, *b));
    ranked.truncate(limit);
    ranked
}
