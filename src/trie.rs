// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Character trie holding one field's inverted index.
//!
//! Each node is spelled out as a JSON object: one key per child character, plus
//! `df` (how many documents contain the term ending here) and `docs` (doc id to
//! term frequency). Interior nodes carry `"df": 0, "docs": {}`.
//!
//! ```text
//! {"c": {"a": {"t": {"df": 1, "docs": {"0": {"tf": 1.0}}},
//!              "df": 0, "docs": {}},
//!        "df": 0, "docs": {}},
//!  "df": 0, "docs": {}}
//! ```
//!
//! Keys are written in sorted order, so `df` and `docs` land between the
//! children `d` and `e`. The browser does not care; diffs between builds do.
//!
//! # Invariants
//!
//! 1. **DOC_FREQ_CORRECT**: `df == docs.len()` on every node
//! 2. **SINGLE_CHAR_EDGES**: every child key is exactly one character
//! 3. **TF_NON_NEGATIVE**: every `tf` is finite and `>= 0`

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

use serde::de::{self, MapAccess, Unexpected, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::DocId;

/// Term frequency of one term in one document.
///
/// The builder stores `sqrt(occurrences)`, which damps long sections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermFrequency {
    pub tf: f64,
}

/// One node of the term trie. The root spells the empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrieNode {
    pub df: usize,
    pub docs: BTreeMap<DocId, TermFrequency>,
    pub children: BTreeMap<char, TrieNode>,
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `tf` for `doc` under `term`, creating nodes as needed.
    ///
    /// Inserting the same `(term, doc)` twice overwrites the frequency.
    pub fn insert(&mut self, term: &str, doc: DocId, tf: f64) {
        let mut node = self;
        for ch in term.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.docs.insert(doc, TermFrequency { tf });
        node.df = node.docs.len();
    }

    /// Node reached by spelling `term` from here.
    pub fn get(&self, term: &str) -> Option<&TrieNode> {
        let mut node = self;
        for ch in term.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    /// Postings for `term`, if it was indexed.
    pub fn docs_for(&self, term: &str) -> Option<&BTreeMap<DocId, TermFrequency>> {
        self.get(term)
            .map(|node| &node.docs)
            .filter(|docs| !docs.is_empty())
    }

    pub fn doc_freq(&self, term: &str) -> usize {
        self.get(term).map_or(0, |node| node.df)
    }

    pub fn term_frequency(&self, term: &str, doc: DocId) -> f64 {
        self.get(term)
            .and_then(|node| node.docs.get(&doc))
            .map_or(0.0, |tf| tf.tf)
    }

    /// Whether a term ends at this node.
    pub fn is_terminal(&self) -> bool {
        !self.docs.is_empty()
    }

    /// Every indexed term starting with `prefix`, `prefix` itself included.
    ///
    /// Terms come back depth-first: a node before its children, children in
    /// character order.
    pub fn expand(&self, prefix: &str) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(start) = self.get(prefix) {
            let mut buf = prefix.to_string();
            start.collect_terms(&mut buf, &mut out);
        }
        out
    }

    fn collect_terms(&self, buf: &mut String, out: &mut Vec<String>) {
        if self.is_terminal() {
            out.push(buf.clone());
        }
        for (&ch, child) in &self.children {
            buf.push(ch);
            child.collect_terms(buf, out);
            buf.pop();
        }
    }

    /// Visit every node with the term it spells, root first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&str, &'a TrieNode)) {
        let mut buf = String::new();
        self.walk_inner(&mut buf, visit);
    }

    fn walk_inner<'a>(&'a self, buf: &mut String, visit: &mut impl FnMut(&str, &'a TrieNode)) {
        visit(buf.as_str(), self);
        for (&ch, child) in &self.children {
            buf.push(ch);
            child.walk_inner(buf, visit);
            buf.pop();
        }
    }

    /// All indexed terms with their nodes, in key order.
    pub fn terms(&self) -> Vec<(String, &TrieNode)> {
        let mut out = Vec::new();
        self.walk(&mut |term, node| {
            if node.is_terminal() {
                out.push((term.to_string(), node));
            }
        });
        out
    }

    pub fn term_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, node| {
            if node.is_terminal() {
                count += 1;
            }
        });
        count
    }

    /// Total number of nodes, this one included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .values()
            .map(TrieNode::node_count)
            .sum::<usize>()
    }
}

impl Serialize for TrieNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len() + 2))?;
        // Single-char keys up to "d" sort before "df"; everything after sorts after "docs".
        for (ch, child) in self.children.range(..='d') {
            map.serialize_entry(ch, child)?;
        }
        map.serialize_entry("df", &self.df)?;
        map.serialize_entry("docs", &self.docs)?;
        for (ch, child) in self
            .children
            .range((Bound::Excluded('d'), Bound::Unbounded))
        {
            map.serialize_entry(ch, child)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TrieNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TrieNodeVisitor)
    }
}

struct TrieNodeVisitor;

impl<'de> Visitor<'de> for TrieNodeVisitor {
    type Value = TrieNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a trie node with df, docs, and single-character children")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TrieNode, A::Error> {
        let mut node = TrieNode::new();
        let mut seen_df = false;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "df" => {
                    node.df = map.next_value()?;
                    seen_df = true;
                }
                "docs" => node.docs = map.next_value()?,
                _ => {
                    let mut chars = key.chars();
                    match (chars.next(), chars.next()) {
                        (Some(ch), None) => {
                            node.children.insert(ch, map.next_value()?);
                        }
                        _ => {
                            return Err(de::Error::invalid_value(
                                Unexpected::Str(&key),
                                &"a single-character child key",
                            ))
                        }
                    }
                }
            }
        }
        if !seen_df {
            return Err(de::Error::missing_field("df"));
        }
        Ok(node)
    }
}
