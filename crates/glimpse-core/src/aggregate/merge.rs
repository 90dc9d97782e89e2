//! Substring merging of near-duplicate keywords.
//!
//! Repeated sampling inflates near-synonyms ("cat", "black cat") into
//! separate frequency entries; this pass folds substring-related tokens into
//! one group so they compete as a single ranked entry.
//!
//! The fold is first-match-wins over the groups in insertion order, and is
//! therefore neither associative nor commutative: reordering the candidate
//! list can change the final grouping. That order dependence is the defining
//! semantics, not a bug — candidates arrive in frequency order from the
//! selector, and the first (most frequent) relative wins the scan. A
//! symmetric merge over all pairwise relations would be a different, stronger
//! algorithm.

use crate::types::KeywordCount;

/// Fold substring-related candidates into canonical groups.
///
/// Processes candidates in input order against an accumulator of
/// (canonical, count) groups, scanning groups in insertion order and
/// stopping at the first substring relation:
///
/// - candidate ⊂ canonical: the candidate's count is added to the group;
/// - canonical ⊂ candidate: the group is re-keyed to the longer candidate
///   (the most specific token seen becomes the representative) and moves to
///   the end of the scan order, with counts combined;
/// - otherwise the candidate starts a new group.
///
/// Total count is conserved: every candidate's count lands in exactly one
/// group.
pub fn merge_substrings(candidates: Vec<(String, u32)>) -> Vec<(String, u32)> {
    let mut groups: Vec<(String, u32)> = Vec::new();

    'candidates: for (word, count) in candidates {
        for i in 0..groups.len() {
            // Equal strings hit this branch too (a string contains itself)
            if groups[i].0.contains(word.as_str()) {
                groups[i].1 += count;
                continue 'candidates;
            }
            if word.contains(groups[i].0.as_str()) {
                let (_, folded) = groups.remove(i);
                groups.push((word, folded + count));
                continue 'candidates;
            }
        }
        groups.push((word, count));
    }

    groups
}

/// Sort merged groups by aggregated count descending.
///
/// The sort is stable, so groups with equal counts keep the order the merge
/// produced.
pub fn rank(mut groups: Vec<(String, u32)>) -> Vec<KeywordCount> {
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups
        .into_iter()
        .map(|(keyword, count)| KeywordCount { keyword, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(pairs: &[(&str, u32)]) -> Vec<(String, u32)> {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_merge_folds_substring_into_longer_existing() {
        // "cat" ⊂ "black cat" which is already a group: count folds in,
        // no new entry
        let merged = merge_substrings(candidates(&[
            ("black cat", 1),
            ("cat", 2),
            ("feline", 2),
            ("whiskers", 1),
        ]));
        assert_eq!(
            merged,
            candidates(&[("black cat", 3), ("feline", 2), ("whiskers", 1)])
        );
    }

    #[test]
    fn test_merge_adopts_longer_candidate_as_canonical() {
        // Existing "cat" is a substring of the new "black cat": the group is
        // re-keyed to the longer token and moves to the end of the scan order
        let merged = merge_substrings(candidates(&[("cat", 2), ("feline", 2), ("black cat", 1)]));
        assert_eq!(merged, candidates(&[("feline", 2), ("black cat", 3)]));
    }

    #[test]
    fn test_merge_equal_tokens_combine() {
        let merged = merge_substrings(candidates(&[("cat", 2), ("cat", 3)]));
        assert_eq!(merged, candidates(&[("cat", 5)]));
    }

    #[test]
    fn test_merge_no_relations_is_identity() {
        let input = candidates(&[("beach", 4), ("sunset", 2), ("palm tree", 1)]);
        assert_eq!(merge_substrings(input.clone()), input);
    }

    #[test]
    fn test_merge_empty_input() {
        assert!(merge_substrings(vec![]).is_empty());
    }

    #[test]
    fn test_merge_first_match_wins_short_circuit() {
        // "cat" relates to both "black cat" and "cat door"; only the first
        // group in scan order absorbs it
        let merged = merge_substrings(candidates(&[
            ("black cat", 1),
            ("cat door", 1),
            ("cat", 5),
        ]));
        assert_eq!(merged, candidates(&[("black cat", 6), ("cat door", 1)]));
    }

    #[test]
    fn test_merge_rekeyed_group_moves_to_end_of_scan_order() {
        // After "cat" is re-keyed to "house cat", a later "house" matches the
        // still-earlier "houseboat" group first
        let merged = merge_substrings(candidates(&[
            ("cat", 3),
            ("houseboat", 1),
            ("house cat", 1),
            ("house", 2),
        ]));
        assert_eq!(merged, candidates(&[("houseboat", 3), ("house cat", 4)]));
    }

    #[test]
    fn test_merge_conserves_total_count() {
        // Short-circuit-on-first-match makes conservation non-obvious; pin it
        let inputs = vec![
            candidates(&[("black cat", 1), ("cat", 2), ("feline", 2), ("whiskers", 1)]),
            candidates(&[("cat", 2), ("feline", 2), ("black cat", 1)]),
            candidates(&[("a", 1), ("ab", 1), ("abc", 1), ("b", 1), ("bc", 7)]),
            candidates(&[("x", 9)]),
            vec![],
        ];
        for input in inputs {
            let total_in: u32 = input.iter().map(|(_, c)| c).sum();
            let merged = merge_substrings(input);
            let total_out: u32 = merged.iter().map(|(_, c)| c).sum();
            assert_eq!(total_in, total_out);
        }
    }

    #[test]
    fn test_merge_groups_are_mutually_exclusive() {
        // No canonical string may be a substring of another after merging
        // would require a symmetric algorithm; but each *candidate* lands in
        // exactly one group, which is what exclusivity means here
        let merged = merge_substrings(candidates(&[
            ("sea", 3),
            ("seashore", 2),
            ("shore", 1),
        ]));
        // "sea" re-keyed to "seashore" (5), then "shore" folds into it
        assert_eq!(merged, candidates(&[("seashore", 6)]));
    }

    #[test]
    fn test_rank_sorts_by_count_descending() {
        let ranked = rank(candidates(&[("feline", 2), ("black cat", 3), ("whiskers", 1)]));
        assert_eq!(
            ranked,
            vec![
                KeywordCount::new("black cat", 3),
                KeywordCount::new("feline", 2),
                KeywordCount::new("whiskers", 1),
            ]
        );
    }

    #[test]
    fn test_rank_ties_keep_merge_order() {
        let ranked = rank(candidates(&[("dog", 2), ("cat", 2), ("bird", 2)]));
        let names: Vec<&str> = ranked.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(names, vec!["dog", "cat", "bird"]);
    }
}
