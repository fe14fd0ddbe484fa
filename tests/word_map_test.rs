// Word-box mapper tests: snapping, fallback, dedup, idempotence.

use pdf_diff::compare::Rect;
use pdf_diff::compare::words::map_to_word_boxes;

/// A diff box overlapping a qualifying word is replaced by the word box.
#[test]
fn test_diff_box_snaps_to_word() {
    let diff = vec![Rect::new(52.0, 31.0, 4.0, 5.0)];
    let words = vec![Rect::new(50.0, 30.0, 40.0, 12.0)];

    let mapped = map_to_word_boxes(&diff, &words, 8.0);
    assert_eq!(mapped, words);
}

/// One diff box can expand into several overlapped words.
#[test]
fn test_diff_box_expands_to_all_overlapping_words() {
    let diff = vec![Rect::new(45.0, 30.0, 60.0, 10.0)];
    let words = vec![
        Rect::new(40.0, 28.0, 30.0, 12.0),
        Rect::new(75.0, 28.0, 30.0, 12.0),
        Rect::new(200.0, 28.0, 30.0, 12.0), // far away, no overlap
    ];

    let mapped = map_to_word_boxes(&diff, &words, 8.0);
    assert_eq!(mapped.len(), 2);
    assert!(mapped.contains(&words[0]));
    assert!(mapped.contains(&words[1]));
}

/// A diff box with no qualifying word falls back to the raw pixel box.
#[test]
fn test_no_word_keeps_raw_box() {
    let diff = vec![Rect::new(10.0, 10.0, 9.0, 9.0)];
    let words = vec![Rect::new(100.0, 100.0, 30.0, 12.0)];

    let mapped = map_to_word_boxes(&diff, &words, 8.0);
    assert_eq!(mapped, diff);
}

/// Words below the minimum side length never qualify, in either dimension.
#[test]
fn test_small_words_do_not_qualify() {
    let diff = vec![Rect::new(10.0, 10.0, 5.0, 5.0)];
    let thin = vec![Rect::new(8.0, 8.0, 30.0, 6.0)]; // height < 8
    let narrow = vec![Rect::new(8.0, 8.0, 6.0, 30.0)]; // width < 8

    assert_eq!(map_to_word_boxes(&diff, &thin, 8.0), diff);
    assert_eq!(map_to_word_boxes(&diff, &narrow, 8.0), diff);
}

/// Multiple diff boxes hitting the same word collapse into one highlight.
#[test]
fn test_dedup_collapses_shared_word() {
    let diff = vec![
        Rect::new(52.0, 31.0, 3.0, 3.0),
        Rect::new(70.0, 33.0, 3.0, 3.0),
    ];
    let words = vec![Rect::new(50.0, 30.0, 40.0, 12.0)];

    let mapped = map_to_word_boxes(&diff, &words, 8.0);
    assert_eq!(mapped, words);
}

/// Near-identical fallback boxes dedup on rounded geometry.
#[test]
fn test_dedup_rounds_fractional_geometry() {
    let diff = vec![
        Rect::new(10.2, 10.1, 9.0, 9.0),
        Rect::new(9.8, 9.9, 9.4, 8.6),
    ];

    let mapped = map_to_word_boxes(&diff, &[], 8.0);
    assert_eq!(mapped.len(), 1);
}

/// Open-interval intersection: touching edges are not an overlap.
#[test]
fn test_touching_edges_do_not_intersect() {
    let diff = vec![Rect::new(10.0, 10.0, 10.0, 10.0)];
    let words = vec![Rect::new(20.0, 10.0, 30.0, 12.0)]; // starts where diff ends

    let mapped = map_to_word_boxes(&diff, &words, 8.0);
    assert_eq!(mapped, diff);
}

/// Mapping an already-snapped set against the same words is a fixpoint.
#[test]
fn test_idempotent_under_reapplication() {
    let diff = vec![
        Rect::new(52.0, 31.0, 4.0, 5.0),
        Rect::new(300.0, 300.0, 9.0, 9.0), // fallback survivor
    ];
    let words = vec![
        Rect::new(50.0, 30.0, 40.0, 12.0),
        Rect::new(95.0, 30.0, 25.0, 12.0),
    ];

    let once = map_to_word_boxes(&diff, &words, 8.0);
    let twice = map_to_word_boxes(&once, &words, 8.0);
    assert_eq!(once, twice);
}

/// No diff boxes in, no highlights out.
#[test]
fn test_empty_input() {
    let words = vec![Rect::new(50.0, 30.0, 40.0, 12.0)];
    assert!(map_to_word_boxes(&[], &words, 8.0).is_empty());
}
