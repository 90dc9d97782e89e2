//! One-line guess sentence over the ranked keyword list.

use crate::types::KeywordCount;

/// Build the "Image likely depicts: …" sentence.
///
/// Returns `None` for an empty list. A single keyword gets no "and" clause;
/// two or more join the head with ", " and the last with ", and ".
pub fn summary_sentence(keywords: &[KeywordCount]) -> Option<String> {
    let names: Vec<&str> = keywords.iter().map(|k| k.keyword.as_str()).collect();
    match names.as_slice() {
        [] => None,
        [only] => Some(format!("Image likely depicts: {only}.")),
        [head @ .., last] => Some(format!(
            "Image likely depicts: {}, and {last}.",
            head.join(", ")
        )),
    }
}
