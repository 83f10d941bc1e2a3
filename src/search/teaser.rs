// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The excerpt shown under each result.
//!
//! Every word of the body gets a weight: a word whose stem starts with a
//! stemmed search term weighs 40, the first word of a sentence 8, anything else
//! 2. A window of `word_count` words slides across the body and the heaviest
//! window wins; among equals, the one closest to the end. Without any term hit
//! the teaser is simply the opening words.
//!
//! Matching words are wrapped in `<em>`. Text between words (double spaces,
//! the `. ` ending a sentence) is copied from the body untouched.

use crate::pipeline::Stemmer;

const TERM_WEIGHT: u32 = 40;
const SENTENCE_START_WEIGHT: u32 = 8;
const WORD_WEIGHT: u32 = 2;

struct WeightedWord<'a> {
    word: &'a str,
    weight: u32,
    start: usize,
}

/// Build a teaser of at most `word_count` words from `body`.
pub fn make_teaser(body: &str, terms: &[String], word_count: usize, stemmer: &Stemmer) -> String {
    let stemmed_terms: Vec<String> = terms
        .iter()
        .filter(|term| !term.is_empty())
        .map(|term| stemmer.stem(&term.to_lowercase()))
        .collect();

    let mut words = Vec::new();
    let mut term_found = false;
    let mut offset = 0;
    for sentence in body.split(". ") {
        let mut weight = SENTENCE_START_WEIGHT;
        for word in sentence.split(' ') {
            if !word.is_empty() {
                let stemmed = stemmer.stem(&word.to_lowercase());
                if stemmed_terms.iter().any(|term| stemmed.starts_with(term.as_str())) {
                    weight = TERM_WEIGHT;
                    term_found = true;
                }
                words.push(WeightedWord {
                    word,
                    weight,
                    start: offset,
                });
                weight = WORD_WEIGHT;
            }
            // the separator after the word: ' ' or the '.' ending the sentence
            offset += word.len() + 1;
        }
        // the ' ' of ". "
        offset += 1;
    }

    if words.is_empty() {
        return body.to_string();
    }
    let window = word_count.min(words.len());
    if window == 0 {
        return String::new();
    }

    let mut window_sums = Vec::with_capacity(words.len() - window + 1);
    let mut sum: u32 = words[..window].iter().map(|w| w.weight).sum();
    window_sums.push(sum);
    for i in 0..words.len() - window {
        sum = sum - words[i].weight + words[i + window].weight;
        window_sums.push(sum);
    }

    let mut best = 0;
    if term_found {
        let mut best_sum = 0;
        for (i, &sum) in window_sums.iter().enumerate().rev() {
            if sum > best_sum {
                best_sum = sum;
                best = i;
            }
        }
    }

    let mut teaser = String::new();
    let mut index = words[best].start;
    for word in &words[best..best + window] {
        if index < word.start {
            teaser.push_str(&body[index..word.start]);
        }
        let end = word.start + word.word.len();
        if word.weight == TERM_WEIGHT {
            teaser.push_str("<em>");
            teaser.push_str(&body[word.start..end]);
            teaser.push_str("</em>");
        } else {
            teaser.push_str(&body[word.start..end]);
        }
        index = end;
    }
    teaser
}
