//! Presentation boundary: output format selection and the keyword table.

use crate::types::KeywordCount;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Summary sentence plus a keyword count table
    Text,
    /// Single JSON report object
    Json,
    /// One JSON object per keyword (newline-delimited JSON)
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Some(Self::Text),
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// Render ranked keywords as a bordered two-column table.
///
/// ```text
/// +-----------+-------+
/// |  Keyword  | Count |
/// +-----------+-------+
/// | black cat |   3   |
/// |  feline   |   2   |
/// +-----------+-------+
/// ```
///
/// Cell content is centered; column widths track the longest entry.
pub fn render_table(keywords: &[KeywordCount]) -> String {
    let counts: Vec<String> = keywords.iter().map(|k| k.count.to_string()).collect();

    let keyword_width = keywords
        .iter()
        .map(|k| k.keyword.chars().count())
        .chain(std::iter::once("Keyword".len()))
        .max()
        .unwrap_or(0);
    let count_width = counts
        .iter()
        .map(|c| c.len())
        .chain(std::iter::once("Count".len()))
        .max()
        .unwrap_or(0);

    let border = format!(
        "+{}+{}+",
        "-".repeat(keyword_width + 2),
        "-".repeat(count_width + 2)
    );

    let mut lines = Vec::with_capacity(keywords.len() + 4);
    lines.push(border.clone());
    lines.push(row(
        &center("Keyword", keyword_width),
        &center("Count", count_width),
    ));
    lines.push(border.clone());
    for (keyword, count) in keywords.iter().zip(&counts) {
        lines.push(row(
            &center(&keyword.keyword, keyword_width),
            &center(count, count_width),
        ));
    }
    lines.push(border);
    lines.join("\n")
}

fn row(keyword_cell: &str, count_cell: &str) -> String {
    format!("| {keyword_cell} | {count_cell} |")
}

/// Center `text` within `width` display columns (left-biased on odd padding).
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = width - len;
    let left = pad / 2;
    format!(
        "{}{}{}",
        " ".repeat(left),
        text,
        " ".repeat(pad - left)
    )
}
