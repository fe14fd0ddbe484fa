// Page aligner tests: similarity scoring and greedy windowed assignment.

use pdf_diff::compare::page_align::{
    align_pages, identity_mappings, jaccard_similarity, text_similarity,
};

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Two empty texts are identical; exactly one empty text shares nothing.
#[test]
fn test_jaccard_empty_inputs() {
    assert_eq!(jaccard_similarity("", ""), 1.0);
    assert_eq!(jaccard_similarity("a b c", ""), 0.0);
    assert_eq!(jaccard_similarity("", "a b c"), 0.0);
    // Whitespace-only normalizes to empty.
    assert_eq!(jaccard_similarity("   \n\t ", ""), 1.0);
}

/// Identical texts score a full 1.0 through both factors.
#[test]
fn test_identical_texts_score_one() {
    let text = "The quick brown fox jumps over the lazy dog";
    assert_eq!(jaccard_similarity(text, text), 1.0);
    assert_eq!(text_similarity(text, text), 1.0);
}

/// Case and whitespace differences do not affect the score.
#[test]
fn test_similarity_normalizes_case_and_whitespace() {
    let a = "Quarterly Report   2026";
    let b = "quarterly\nreport 2026";
    assert_eq!(jaccard_similarity(a, b), 1.0);
}

/// Disjoint vocabularies score zero Jaccard.
#[test]
fn test_disjoint_texts() {
    assert_eq!(
        jaccard_similarity("alpha bravo charlie", "delta echo foxtrot"),
        0.0
    );
}

/// Half-overlapping token sets land strictly between 0 and 1.
#[test]
fn test_partial_overlap() {
    let score = jaccard_similarity("alpha bravo charlie delta", "alpha bravo echo foxtrot");
    // 2 shared of 6 distinct tokens.
    assert!((score - 2.0 / 6.0).abs() < 1e-9);
}

/// Stop words and short tokens are dropped before comparison.
#[test]
fn test_stop_words_and_short_tokens_dropped() {
    // "the", "and" are stop words; "of", "a" are too short. Only the
    // remaining content tokens count.
    let a = "the history of a kingdom and empire";
    let b = "history kingdom empire";
    assert_eq!(jaccard_similarity(a, b), 1.0);
}

/// Punctuation is stripped from tokens.
#[test]
fn test_punctuation_stripped() {
    assert_eq!(
        jaccard_similarity("hello, world! (chapter one)", "hello world chapter one"),
        1.0
    );
}

/// The combined score weights Jaccard 0.7 and length ratio 0.3.
#[test]
fn test_score_weights() {
    // Same token set, but one text is twice as long after normalization.
    let a = "alpha bravo";
    let b = "alpha alpha bravo bravo alpha br"; // tokens {alpha, bravo} minus short "br"
    let jaccard = jaccard_similarity(a, b);
    assert_eq!(jaccard, 1.0);

    let len_a = 11.0; // "alpha bravo"
    let len_b = 32.0;
    let expected = 0.7 + 0.3 * (len_a / len_b);
    assert!((text_similarity(a, b) - expected).abs() < 1e-9);
}

/// Equal page counts bypass the aligner: identity pairs at similarity 1.0.
#[test]
fn test_identity_mappings() {
    let mappings = identity_mappings(3);
    assert_eq!(mappings.len(), 3);
    for (i, m) in mappings.iter().enumerate() {
        assert_eq!(m.page_a, i as u32);
        assert_eq!(m.page_b, i as u32);
        assert_eq!(m.similarity, 1.0);
    }
}

/// Inserted page: A has 3 pages, B has the same 3 plus an unrelated page 2
/// (index 1). The aligner must map around the insertion.
#[test]
fn test_alignment_skips_inserted_page() {
    let texts_a = texts(&[
        "introduction chapter about document comparison engines",
        "methodology section describing alignment and diffing",
        "conclusion summarizing results and future directions",
    ]);
    let texts_b = texts(&[
        "introduction chapter about document comparison engines",
        "zzz unrelated advertisement insert qqq xyzzy",
        "methodology section describing alignment and diffing",
        "conclusion summarizing results and future directions",
    ]);

    let mappings = align_pages(&texts_a, &texts_b, 2, 0.3, true);
    let pairs: Vec<(u32, u32)> = mappings.iter().map(|m| (m.page_a, m.page_b)).collect();
    assert_eq!(pairs, vec![(0, 0), (1, 2), (2, 3)]);
    for m in &mappings {
        assert!(m.similarity >= 0.3, "mapping {m:?} below threshold");
    }
}

/// A claimed B page is never reused by a later A page.
#[test]
fn test_no_b_page_claimed_twice() {
    let texts_a = texts(&[
        "identical repeated content across pages",
        "identical repeated content across pages",
    ]);
    let texts_b = texts(&[
        "identical repeated content across pages",
        "identical repeated content across pages",
    ]);

    // Different counts force the smart path in practice; here the helper is
    // driven directly to check the claim bookkeeping.
    let mappings = align_pages(&texts_a, &texts_b, 2, 0.3, true);
    assert_eq!(mappings.len(), 2);
    assert_ne!(mappings[0].page_b, mappings[1].page_b);
}

/// Without a qualifying candidate, the same-index page is claimed even
/// below threshold when the fallback is enabled.
#[test]
fn test_same_index_fallback_below_threshold() {
    let texts_a = texts(&["alpha bravo charlie delta content"]);
    let texts_b = texts(&["totally different words everywhere here", "second page"]);

    let mappings = align_pages(&texts_a, &texts_b, 2, 0.3, true);
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].page_b, 0);
    assert!(mappings[0].similarity < 0.3);
}

/// With the fallback disabled, an unmatchable A page is dropped silently.
#[test]
fn test_unmappable_page_dropped_without_fallback() {
    let texts_a = texts(&["alpha bravo charlie delta content"]);
    let texts_b = texts(&["totally different words everywhere here", "second page"]);

    let mappings = align_pages(&texts_a, &texts_b, 2, 0.3, false);
    assert!(mappings.is_empty());
}

/// Candidates outside the page-index window are never considered.
#[test]
fn test_window_limits_candidates() {
    let texts_a = texts(&["unique matching sentinel content paragraph"]);
    let mut b = vec!["filler page".to_string(); 6];
    b[5] = "unique matching sentinel content paragraph".to_string();

    // The match sits at index 5, far outside tolerance 2 of index 0.
    let mappings = align_pages(&texts_a, &b, 2, 0.3, false);
    assert!(mappings.is_empty());
}
