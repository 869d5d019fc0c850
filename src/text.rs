// Text normalization helpers shared by the serializer and the identifier
// resolver.

use once_cell::sync::Lazy;
use regex::Regex;

static DOC_GUTTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\*\s?").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize free text taken from a doc comment: strip leading `*` gutters,
/// collapse whitespace runs (line breaks included) to a single space, trim.
pub fn clean_doc_comment(text: &str) -> String {
    let without_gutter = DOC_GUTTER.replace_all(text, "");
    WHITESPACE_RUN
        .replace_all(&without_gutter, " ")
        .trim()
        .to_string()
}

/// Reduce a possibly fully-qualified name to its schema name: drop the
/// namespace qualifier, keep the last segment.
pub fn clean_schema_name(name: &str) -> String {
    name.trim_start_matches('\\')
        .rsplit('\\')
        .next()
        .unwrap_or(name)
        .to_string()
}
