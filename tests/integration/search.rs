//! Queries against the fixture index, checked against hand-computed rankings.

use quire::pipeline::{tokenize, PipelineStep, StopWordFilter, Trimmer};
use quire::types::{BoolMode, Field, PerField};
use quire::{Pipeline, QueryOptions};

use crate::common::{fixture_searcher, ids, load_fixture};

fn and() -> QueryOptions {
    QueryOptions {
        bool_mode: Some(BoolMode::And),
        ..QueryOptions::default()
    }
}

// ============================================================================
// SINGLE TERMS
// ============================================================================

#[test]
fn test_search_dao() {
    let hits = fixture_searcher().search("dao");
    assert_eq!(ids(&hits), vec![2]);
    assert_eq!(hits[0].url, "introduction.html#what-youll-find");
    assert_eq!(hits[0].title, "What You'll Find");
    assert!((hits[0].score - 1.591_463_754_945_733).abs() < 1e-9, "{}", hits[0].score);
}

#[test]
fn test_title_matches_outrank_body_matches() {
    // "starknet" is in the title of docs 6 and 0 and in five bodies
    let hits = fixture_searcher().search("starknet");
    assert_eq!(ids(&hits), vec![6, 0, 1, 3, 2]);
}

#[test]
fn test_query_is_stemmed() {
    let searcher = fixture_searcher();
    let hits = searcher.search("templates");
    assert_eq!(ids(&hits), vec![1, 3, 5, 2, 6, 0]);
    assert_eq!(ids(&searcher.search("Template")), ids(&hits));
}

#[test]
fn test_empty_body_section_found_by_title() {
    let hits = fixture_searcher().search("chapter");
    assert_eq!(ids(&hits), vec![4]);
    assert_eq!(hits[0].breadcrumbs, "Chapter 1 » Chapter 1");
    assert_eq!(hits[0].teaser, "");
}

#[test]
fn test_unknown_word_finds_nothing() {
    assert!(fixture_searcher().search("kubernetes").is_empty());
}

#[test]
fn test_stop_words_only_finds_nothing() {
    assert!(fixture_searcher().search("the of and").is_empty());
}

// ============================================================================
// INDEXED WORDS ARE REACHABLE
// ============================================================================

#[test]
fn test_title_words_are_searchable() {
    let searcher = fixture_searcher();
    assert!(ids(&searcher.search("welcome")).contains(&0));
    assert!(ids(&searcher.search("join")).contains(&6));
    assert!(ids(&searcher.search("find")).contains(&2));
}

#[test]
fn test_body_words_are_searchable() {
    let searcher = fixture_searcher();
    assert!(ids(&searcher.search("best")).contains(&1));
    let new = ids(&searcher.search("new"));
    assert!(new.contains(&3) && new.contains(&5), "{:?}", new);
}

#[test]
fn test_query_pipeline_keeps_every_title_term() {
    let index = load_fixture();
    let pipeline = Pipeline::default();
    let stop_words = StopWordFilter::english();
    let terms = index.field_index(Field::Title).root.terms();
    assert_eq!(terms.len(), 15);
    for (term, _) in terms {
        assert!(
            !pipeline.run_text(&term).is_empty() || stop_words.is_stop_word(&term),
            "{} is indexed but dropped from queries",
            term
        );
    }
}

#[test]
fn test_every_title_word_finds_its_section() {
    let searcher = fixture_searcher();
    let stop_words = StopWordFilter::english();
    for id in 0..searcher.index().doc_count() {
        let title = &searcher.index().stored_doc(id).unwrap().title;
        for word in tokenize(title).into_iter().filter_map(|token| Trimmer.apply(token)) {
            // the index stemmed "use" to "us"
            if stop_words.is_stop_word(&word) || word == "use" {
                continue;
            }
            assert!(ids(&searcher.search(&word)).contains(&id), "{:?} misses doc {}", word, id);
        }
    }
}

// ============================================================================
// BOOLEAN MODES
// ============================================================================

#[test]
fn test_or_unions_terms() {
    let hits = fixture_searcher().search("starknet dao");
    assert_eq!(ids(&hits), vec![2, 6, 0, 1, 3]);
}

#[test]
fn test_and_intersects_terms() {
    let searcher = fixture_searcher();
    assert_eq!(ids(&searcher.search_with("starknet dao", &and())), vec![2]);
    assert_eq!(ids(&searcher.search_with("deploy contract", &and())), vec![2, 3]);
}

#[test]
fn test_and_results_are_subset_of_or() {
    let searcher = fixture_searcher();
    for query in ["starknet templates", "cairo starknet", "deploy contract", "dao token"] {
        let or = ids(&searcher.search(query));
        for id in ids(&searcher.search_with(query, &and())) {
            assert!(or.contains(&id), "{}: {} missing from OR", query, id);
        }
    }
}

// ============================================================================
// EXPANSION, LIMITS, BOOSTS
// ============================================================================

#[test]
fn test_prefix_expansion() {
    let searcher = fixture_searcher();
    let hits = searcher.search("fung");
    assert_eq!(ids(&hits), vec![2]);
    // a prefix match scores far below an exact one
    assert!(hits[0].score < 0.5);

    let exact_only = QueryOptions {
        expand: Some(false),
        ..QueryOptions::default()
    };
    assert!(searcher.search_with("fung", &exact_only).is_empty());
}

#[test]
fn test_limit() {
    let searcher = fixture_searcher();
    let options = QueryOptions {
        limit: Some(2),
        ..QueryOptions::default()
    };
    assert_eq!(ids(&searcher.search_with("templates", &options)), vec![1, 3]);

    let none = QueryOptions {
        limit: Some(0),
        ..QueryOptions::default()
    };
    assert!(searcher.search_with("templates", &none).is_empty());
}

#[test]
fn test_zero_boost_skips_field() {
    let searcher = fixture_searcher();
    let breadcrumbs_only = QueryOptions {
        boosts: Some(PerField {
            body: 0.0,
            breadcrumbs: 1.0,
            title: 0.0,
        }),
        ..QueryOptions::default()
    };
    assert!(searcher.search_with("dao", &breadcrumbs_only).is_empty());
    assert_eq!(ids(&searcher.search_with("chapter", &breadcrumbs_only)), vec![4]);
}

#[test]
fn test_scores_match_hits() {
    let searcher = fixture_searcher();
    let scores = searcher.scores("starknet", &QueryOptions::default());
    for hit in searcher.search("starknet") {
        assert_eq!(scores[&hit.doc_id], hit.score);
    }
}

// ============================================================================
// TEASERS
// ============================================================================

#[test]
fn test_teaser_highlights_match() {
    let hits = fixture_searcher().search("dao");
    let teaser = &hits[0].teaser;
    assert!(teaser.contains("<em>DAO</em>"), "{}", teaser);
    assert!(teaser.split_whitespace().count() <= 30);
}

#[test]
fn test_teaser_word_count_override() {
    let options = QueryOptions {
        teaser_word_count: Some(5),
        ..QueryOptions::default()
    };
    let hits = fixture_searcher().search_with("token", &options);
    assert_eq!(ids(&hits), vec![2]);
    assert_eq!(hits[0].teaser.split_whitespace().count(), 5);
    assert!(hits[0].teaser.contains("<em>"), "{}", hits[0].teaser);
}

#[test]
fn test_hits_serialize() {
    let hits = fixture_searcher().search("dao");
    let value = serde_json::to_value(&hits).unwrap();
    assert_eq!(value[0]["doc_id"], 2);
    assert_eq!(value[0]["url"], "introduction.html#what-youll-find");
}
