//! Properties of ranked results, over the fixture and over generated books.

use std::collections::HashSet;

use proptest::prelude::*;
use quire::types::BoolMode;
use quire::{IndexBuilder, QueryOptions, Searcher};

use crate::common::{fields, fixture_searcher, searcher_for};

const VOCABULARY: &[&str] = &[
    "starknet", "cairo", "contract", "token", "dao", "deploy", "templates", "games", "chapter",
    "fungible", "wallet", "bridge", "oracle", "vault",
];

fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        // single words, often a prefix of something indexed
        "[a-z]{1,3}",
        "[a-z]{4,10}",
        prop::sample::select(VOCABULARY).prop_map(str::to_string),
        prop::collection::vec(prop::sample::select(VOCABULARY), 2..4).prop_map(|w| w.join(" ")),
    ]
}

fn limit_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![Just(0), Just(1), Just(3), 1usize..=50]
}

fn corpus_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    let words = || prop::collection::vec(prop::sample::select(VOCABULARY), 1..12);
    prop::collection::vec(
        (words().prop_map(|w| w.join(" ")), words().prop_map(|w| w.join(" "))),
        1..10,
    )
}

fn corpus_searcher(corpus: &[(String, String)]) -> Searcher {
    let mut builder = IndexBuilder::new();
    for (i, (title, body)) in corpus.iter().enumerate() {
        builder.add_document(format!("s{}.html", i), fields(title, body, "Book"));
    }
    searcher_for(builder.finish())
}

fn with_mode(mode: BoolMode, limit: usize) -> QueryOptions {
    QueryOptions {
        bool_mode: Some(mode),
        limit: Some(limit),
        ..QueryOptions::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: results are sorted by score, ties by doc id, and respect the limit
    #[test]
    fn prop_results_sorted_and_limited(query in query_strategy(), limit in limit_strategy()) {
        let searcher = fixture_searcher();
        let options = QueryOptions { limit: Some(limit), ..QueryOptions::default() };
        let hits = searcher.search_with(&query, &options);

        prop_assert!(hits.len() <= limit);
        for pair in hits.windows(2) {
            prop_assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].doc_id < pair[1].doc_id),
                "out of order: {:?} then {:?}", (pair[0].doc_id, pair[0].score), (pair[1].doc_id, pair[1].score)
            );
        }
    }

    /// Property: every hit is a known document with a positive, finite score
    #[test]
    fn prop_hits_are_valid(query in query_strategy()) {
        let searcher = fixture_searcher();
        let count = searcher.index().doc_count();
        let hits = searcher.search(&query);

        let unique: HashSet<_> = hits.iter().map(|hit| hit.doc_id).collect();
        prop_assert_eq!(unique.len(), hits.len());
        for hit in &hits {
            prop_assert!(hit.doc_id < count);
            prop_assert!(hit.score.is_finite() && hit.score > 0.0, "score {}", hit.score);
            prop_assert_eq!(Some(hit.url.as_str()), searcher.index().doc_url(hit.doc_id));
        }
    }

    /// Property: AND never finds a document OR misses
    #[test]
    fn prop_and_subset_of_or(corpus in corpus_strategy(), query in query_strategy()) {
        let searcher = corpus_searcher(&corpus);
        let or: HashSet<_> = searcher
            .search_with(&query, &with_mode(BoolMode::Or, usize::MAX))
            .into_iter()
            .map(|hit| hit.doc_id)
            .collect();
        for hit in searcher.search_with(&query, &with_mode(BoolMode::And, usize::MAX)) {
            prop_assert!(or.contains(&hit.doc_id), "{} only in AND", hit.doc_id);
        }
    }

    /// Property: a smaller limit returns a prefix of the larger result list
    #[test]
    fn prop_limit_is_prefix(corpus in corpus_strategy(), query in query_strategy(), limit in limit_strategy()) {
        let searcher = corpus_searcher(&corpus);
        let all = searcher.search_with(&query, &with_mode(BoolMode::Or, usize::MAX));
        let some = searcher.search_with(&query, &with_mode(BoolMode::Or, limit));
        prop_assert_eq!(&all[..some.len()], &some[..]);
        prop_assert_eq!(some.len(), all.len().min(limit));
    }

    /// Property: turning expansion off can only drop matches
    #[test]
    fn prop_exact_subset_of_expanded(corpus in corpus_strategy(), query in query_strategy()) {
        let searcher = corpus_searcher(&corpus);
        let expanded: HashSet<_> = searcher
            .search_with(&query, &QueryOptions { expand: Some(true), limit: Some(usize::MAX), ..QueryOptions::default() })
            .into_iter()
            .map(|hit| hit.doc_id)
            .collect();
        let exact = searcher.search_with(
            &query,
            &QueryOptions { expand: Some(false), limit: Some(usize::MAX), ..QueryOptions::default() },
        );
        for hit in exact {
            prop_assert!(expanded.contains(&hit.doc_id));
        }
    }
}
