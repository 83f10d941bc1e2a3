// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text processing applied to indexed text and to queries.
//!
//! Text is first split into tokens, then each token flows through the named
//! steps listed in the index's `pipeline` array. Any step may drop a token.
//! Index time and query time must run the same steps, which is why the names
//! travel with the index and `Pipeline::from_names` rebuilds the chain on load.
//!
//! | Name             | Step             | Effect                                  |
//! |------------------|------------------|-----------------------------------------|
//! | `trimmer`        | `Trimmer`        | strip non-word characters at the edges  |
//! | `stopWordFilter` | `StopWordFilter` | drop elasticlunr's English stop words   |
//! | `stemmer`        | `Stemmer`        | Snowball English stem                   |

use std::collections::HashSet;
use std::fmt;

use rust_stemmers::Algorithm;

use crate::error::{Error, Result};
use crate::utils::normalize;

pub const TRIMMER: &str = "trimmer";
pub const STOP_WORD_FILTER: &str = "stopWordFilter";
pub const STEMMER: &str = "stemmer";

/// Split text into lowercase tokens on whitespace and hyphens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// One named token transformation.
pub trait PipelineStep: Send + Sync {
    /// Name stored in the index's `pipeline` array.
    fn name(&self) -> &'static str;

    /// Transform a token, or return `None` to drop it.
    fn apply(&self, token: String) -> Option<String>;
}

/// Strips leading and trailing characters that are neither alphanumeric nor `_`.
///
/// Inner punctuation survives: "you'll" and "download/clone" stay whole.
#[derive(Debug, Default, Clone, Copy)]
pub struct Trimmer;

impl PipelineStep for Trimmer {
    fn name(&self) -> &'static str {
        TRIMMER
    }

    fn apply(&self, token: String) -> Option<String> {
        let trimmed = token.trim_matches(|c: char| !(c.is_alphanumeric() || c == '_'));
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == token.len() {
            Some(token)
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// The list elasticlunr 0.9.5 ships as its `stopWordFilter`.
///
/// Indexes written by mdBook were filtered with exactly these words, so a
/// query must drop these and nothing else, or indexed terms become
/// unreachable.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "able", "about", "across", "after", "all", "almost", "also", "am", "among", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "but", "by", "can", "cannot", "could",
    "dear", "did", "do", "does", "either", "else", "ever", "every", "for", "from", "get", "got",
    "had", "has", "have", "he", "her", "hers", "him", "his", "how", "however", "i", "if", "in",
    "into", "is", "it", "its", "just", "least", "let", "like", "likely", "may", "me", "might",
    "most", "must", "my", "neither", "no", "nor", "not", "of", "off", "often", "on", "only", "or",
    "other", "our", "own", "rather", "said", "say", "says", "she", "should", "since", "so", "some",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "tis", "to",
    "too", "twas", "us", "wants", "was", "we", "were", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "would", "yet", "you", "your",
];

/// Drops English stop words.
pub struct StopWordFilter {
    words: HashSet<&'static str>,
}

impl StopWordFilter {
    pub fn english() -> Self {
        Self {
            words: ENGLISH_STOP_WORDS.iter().copied().collect(),
        }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.words.contains(token)
    }
}

impl PipelineStep for StopWordFilter {
    fn name(&self) -> &'static str {
        STOP_WORD_FILTER
    }

    fn apply(&self, token: String) -> Option<String> {
        if self.is_stop_word(&token) {
            None
        } else {
            Some(token)
        }
    }
}

/// Reduces tokens to their Snowball English stem.
pub struct Stemmer {
    inner: rust_stemmers::Stemmer,
}

impl Stemmer {
    pub fn english() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }

    pub fn stem(&self, word: &str) -> String {
        self.inner.stem(word).into_owned()
    }
}

impl fmt::Debug for Stemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Stemmer(english)")
    }
}

impl PipelineStep for Stemmer {
    fn name(&self) -> &'static str {
        STEMMER
    }

    fn apply(&self, token: String) -> Option<String> {
        let stemmed = self.stem(&token);
        if stemmed.is_empty() {
            None
        } else {
            Some(stemmed)
        }
    }
}

/// Look up a step by its index name.
pub fn step_by_name(name: &str) -> Result<Box<dyn PipelineStep>> {
    match name {
        TRIMMER => Ok(Box::new(Trimmer)),
        STOP_WORD_FILTER => Ok(Box::new(StopWordFilter::english())),
        STEMMER => Ok(Box::new(Stemmer::english())),
        other => Err(Error::UnknownPipelineStep(other.to_string())),
    }
}

/// Whether `name` resolves to a known step.
pub fn is_known_step(name: &str) -> bool {
    matches!(name, TRIMMER | STOP_WORD_FILTER | STEMMER)
}

/// An ordered chain of steps.
pub struct Pipeline {
    steps: Vec<Box<dyn PipelineStep>>,
}

impl Pipeline {
    /// A pipeline with no steps: tokens pass through untouched.
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let steps = names
            .iter()
            .map(|name| step_by_name(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }

    pub fn names(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every token through every step, in order.
    pub fn run(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter_map(|token| {
                self.steps
                    .iter()
                    .try_fold(token, |token, step| step.apply(token))
            })
            .collect()
    }

    /// Tokenize `text` and run the result through the pipeline.
    pub fn run_text(&self, text: &str) -> Vec<String> {
        self.run(tokenize(text))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            steps: vec![
                Box::new(Trimmer),
                Box::new(StopWordFilter::english()),
                Box::new(Stemmer::english()),
            ],
        }
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.steps.iter().map(|step| step.name()))
            .finish()
    }
}
