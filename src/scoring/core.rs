// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind one term's contribution to one document's score.
//!
//! ```text
//! score(key, doc) = tf(key, doc) × idf(key) × norm(doc, field) × penalty(key, token)
//!
//! idf(key)          = 1 + ln(N / (df + 1))
//! norm(doc, field)  = 1 / sqrt(words in field)      (1 for an empty field)
//! penalty(key, tok) = 1                              when key == tok
//!                   = (1 - (|key| - |tok|) / |key|) × 0.15   otherwise
//! ```
//!
//! `key` is the indexed term being scored and `tok` the query token it was
//! reached from. They differ only under prefix expansion, where `tok` is a
//! prefix of `key`. Lengths are in characters.
//!
//! # Key Invariant: Exact Beats Expanded
//!
//! With equal tf, idf and norm, an exact hit always outscores an expanded one:
//! the expansion penalty is at most `0.15`, far below the exact factor of `1`.

/// Multiplier applied to every expanded (prefix-only) match.
pub const EXPANSION_PENALTY: f64 = 0.15;

/// Inverse document frequency of a term found in `df` of `doc_count` documents.
///
/// Never below `1 + ln(1/2)` for sane inputs; a term in every document still
/// scores a little.
pub fn idf(df: usize, doc_count: usize) -> f64 {
    1.0 + (doc_count as f64 / (df as f64 + 1.0)).ln()
}

/// Length normalization for a field with `length` words.
pub fn field_length_norm(length: usize) -> f64 {
    if length == 0 {
        1.0
    } else {
        1.0 / (length as f64).sqrt()
    }
}

/// Score factor for reaching indexed term `key` from query token `token`.
pub fn expansion_penalty(key: &str, token: &str) -> f64 {
    if key == token {
        return 1.0;
    }
    let key_len = key.chars().count() as f64;
    let token_len = token.chars().count() as f64;
    if key_len == 0.0 {
        return 0.0;
    }
    (1.0 - (key_len - token_len) / key_len) * EXPANSION_PENALTY
}

/// One term's contribution to a document's field score.
pub fn term_score(tf: f64, idf: f64, norm: f64, penalty: f64) -> f64 {
    tf * idf * norm * penalty
}
