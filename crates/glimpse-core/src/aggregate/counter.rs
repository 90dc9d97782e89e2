//! Tokenization and frequency counting over raw model replies.

use std::collections::HashMap;

/// Split replies on commas, trim and lowercase each token, and count
/// occurrences of each distinct token.
///
/// The returned list preserves discovery order (first appearance across the
/// reply stream), which later stages rely on for stable tie-breaking.
/// Empty tokens — blank replies, doubled commas, trailing delimiters — are
/// dropped here so they never reach the merge pass.
pub fn count_tokens(replies: &[String]) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for reply in replies {
        for raw in reply.split(',') {
            let token = raw.trim().to_lowercase();
            if token.is_empty() {
                continue;
            }
            match index.get(&token) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(token.clone(), counts.len());
                    counts.push((token, 1));
                }
            }
        }
    }

    counts
}

/// Reduce a frequency table to the `n` most frequent entries.
///
/// Sort is by count descending and stable, so equal counts keep their
/// discovery order — the source token order has no ranking meaning beyond
/// frequency, and stability makes the merge pass deterministic.
pub fn top_candidates(mut counts: Vec<(String, u32)>, n: usize) -> Vec<(String, u32)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}
