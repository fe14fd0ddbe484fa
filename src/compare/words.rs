// Word-box mapping: snap raw pixel-level diff boxes onto the word geometry
// they intersect. Pixel-level boxes are noisy at glyph edges; word-snapped
// highlights are stable and human-legible, at the cost of sometimes
// covering more text than strictly changed.

use std::collections::HashSet;

use crate::compare::Rect;

/// Replace each diff box with every qualifying word box it overlaps.
///
/// A word box qualifies when both its width and height are at least
/// `min_word_size`. A diff box overlapping no qualifying word is kept
/// as-is. Output is deduplicated on integer-rounded geometry, collapsing
/// multiple diff boxes that hit the same word into one highlight, and is
/// idempotent under re-application against the same word set.
pub fn map_to_word_boxes(diff_boxes: &[Rect], words: &[Rect], min_word_size: f64) -> Vec<Rect> {
    let mut seen: HashSet<(i64, i64, i64, i64)> = HashSet::new();
    let mut out = Vec::new();

    for diff_box in diff_boxes {
        let mut matched = false;
        for word in words {
            if word.width >= min_word_size
                && word.height >= min_word_size
                && diff_box.intersects(word)
            {
                matched = true;
                if seen.insert(word.rounded_key()) {
                    out.push(*word);
                }
            }
        }
        if !matched && seen.insert(diff_box.rounded_key()) {
            out.push(*diff_box);
        }
    }

    out
}
