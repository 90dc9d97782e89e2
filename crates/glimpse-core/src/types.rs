//! Core data types for the Glimpse keyword extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A canonical keyword with its aggregated occurrence count.
///
/// Before merging this is a plain frequency-table entry; after merging the
/// keyword is the canonical representative of a substring group and the count
/// is the group total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    /// Normalized keyword string (trimmed, lowercased)
    pub keyword: String,

    /// Number of occurrences across all sampled replies
    pub count: u32,
}

impl KeywordCount {
    pub fn new(keyword: impl Into<String>, count: u32) -> Self {
        Self {
            keyword: keyword.into(),
            count,
        }
    }
}

/// The complete output of one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Path to the input image
    pub image_path: PathBuf,

    /// Model identifier that produced the replies
    pub model: String,

    /// Sampling iterations requested
    pub iterations_requested: u32,

    /// Iterations that returned a usable reply
    pub iterations_succeeded: u32,

    /// Iterations that failed and were skipped
    pub iterations_failed: u32,

    /// Ranked, merged keywords (highest count first)
    pub keywords: Vec<KeywordCount>,

    /// One-line guess sentence, absent when no keywords were extracted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}
