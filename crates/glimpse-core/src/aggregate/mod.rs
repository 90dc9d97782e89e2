//! Keyword aggregation: turning noisy repeated model replies into one
//! ranked, deduplicated keyword list.
//!
//! The pass order is fixed:
//!
//! ```text
//! replies → count_tokens → top_candidates → merge_substrings → rank
//! ```
//!
//! Every stage is a pure in-memory function over small lists; nothing in
//! this module can fail.

pub(crate) mod counter;
pub(crate) mod merge;
pub(crate) mod summary;

pub use counter::{count_tokens, top_candidates};
pub use merge::{merge_substrings, rank};
pub use summary::summary_sentence;

use crate::types::KeywordCount;

/// Run the full aggregation pipeline over raw replies.
///
/// `top_n` bounds how many of the most frequent raw keywords enter the merge
/// pass. Empty input (all sampling failed) yields an empty list.
pub fn aggregate(replies: &[String], top_n: usize) -> Vec<KeywordCount> {
    let counts = count_tokens(replies);
    let candidates = top_candidates(counts, top_n);
    let merged = merge_substrings(candidates);
    rank(merged)
}
