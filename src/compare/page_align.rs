// Page alignment: when two documents have different page counts, naive
// index pairing misaligns every page after the first insertion. Pages are
// matched instead by text similarity within a small index window.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::compare::PageMapping;

/// Tokens dropped before the Jaccard comparison. Short tokens (length <= 2)
/// are dropped separately, so everything here is three letters or longer.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "was", "were", "with", "that", "this", "from",
    "have", "has", "had", "you", "your", "they", "their", "its", "can", "will", "all", "our",
];

/// Lower-case and collapse runs of whitespace to single spaces.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Token set for similarity scoring: punctuation stripped, tokens of
/// length <= 2 and stop words dropped.
fn tokenize(normalized: &str) -> HashSet<String> {
    normalized
        .split_whitespace()
        .map(|token| {
            token
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        })
        .filter(|token| token.chars().count() > 2)
        .filter(|token| !STOP_WORDS.contains(&token.as_str()))
        .collect()
}

/// Jaccard similarity over the two texts' token sets.
///
/// Empty inputs are decided on the texts themselves, before tokenization:
/// two empty texts are identical (1.0), exactly one empty text shares
/// nothing (0.0). Two non-empty texts whose tokens all get dropped are
/// equally contentless and score 1.0.
pub fn jaccard_similarity(text_a: &str, text_b: &str) -> f64 {
    let norm_a = normalize_text(text_a);
    let norm_b = normalize_text(text_b);

    if norm_a.is_empty() && norm_b.is_empty() {
        return 1.0;
    }
    if norm_a.is_empty() || norm_b.is_empty() {
        return 0.0;
    }

    let tokens_a = tokenize(&norm_a);
    let tokens_b = tokenize(&norm_b);

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 1.0;
    }
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count() as f64;
    let union = tokens_a.union(&tokens_b).count() as f64;
    intersection / union
}

/// Combined similarity score in [0, 1]: Jaccard weighted with a
/// length-ratio term over the normalized strings.
pub fn text_similarity(text_a: &str, text_b: &str) -> f64 {
    let jaccard = jaccard_similarity(text_a, text_b);

    let len_a = normalize_text(text_a).chars().count();
    let len_b = normalize_text(text_b).chars().count();
    let length_ratio = if len_a == 0 && len_b == 0 {
        1.0
    } else if len_a == 0 || len_b == 0 {
        0.0
    } else {
        len_a.min(len_b) as f64 / len_a.max(len_b) as f64
    };

    0.7 * jaccard + 0.3 * length_ratio
}

/// 1:1 index mapping used when both documents have the same page count.
pub fn identity_mappings(page_count: usize) -> Vec<PageMapping> {
    (0..page_count)
        .map(|i| PageMapping {
            page_a: i as u32,
            page_b: i as u32,
            similarity: 1.0,
        })
        .collect()
}

/// Greedy windowed assignment of A-pages to B-pages by text similarity.
///
/// For each A-page in ascending order, candidates are the unclaimed
/// B-pages within `page_tolerance` of the A index. The best candidate
/// scoring at least `similarity_threshold` wins; failing that, the
/// unclaimed same-index B-page is claimed even below threshold when
/// `fallback_to_same_index` is set. An A-page with no usable candidate is
/// dropped from the mapping, which is a logged skip rather than an error.
///
/// Greedy and order-dependent, not globally optimal: pagination shifts are
/// expected to be small and monotonic.
pub fn align_pages(
    texts_a: &[String],
    texts_b: &[String],
    page_tolerance: u32,
    similarity_threshold: f64,
    fallback_to_same_index: bool,
) -> Vec<PageMapping> {
    let mut claimed = vec![false; texts_b.len()];
    let mut mappings = Vec::new();

    for (index_a, text_a) in texts_a.iter().enumerate() {
        let lo = index_a.saturating_sub(page_tolerance as usize);
        let hi = (index_a + page_tolerance as usize).min(texts_b.len().saturating_sub(1));

        let mut best: Option<(usize, f64)> = None;
        if !texts_b.is_empty() {
            for index_b in lo..=hi {
                if claimed[index_b] {
                    continue;
                }
                let score = text_similarity(text_a, &texts_b[index_b]);
                if best.is_none_or(|(_, s)| score > s) {
                    best = Some((index_b, score));
                }
            }
        }

        let chosen = match best {
            Some((index_b, score)) if score >= similarity_threshold => Some((index_b, score)),
            _ if fallback_to_same_index
                && index_a < texts_b.len()
                && !claimed[index_a] =>
            {
                let score = text_similarity(text_a, &texts_b[index_a]);
                debug!(
                    page_a = index_a,
                    score, "falling back to same-index page below threshold"
                );
                Some((index_a, score))
            }
            _ => None,
        };

        match chosen {
            Some((index_b, score)) => {
                claimed[index_b] = true;
                mappings.push(PageMapping {
                    page_a: index_a as u32,
                    page_b: index_b as u32,
                    similarity: score,
                });
            }
            None => {
                warn!(
                    page_a = index_a,
                    "no matching page in document B, skipping page"
                );
            }
        }
    }

    mappings
}
