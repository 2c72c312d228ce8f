//! Typed extraction of text properties from the untyped `properties` document.

use notion_types::InlineSpan;
use serde::Deserialize;
use serde_json::Value;

/// Decode a property value as a list of styled runs.
pub fn decode_runs(value: &Value) -> Result<Vec<InlineSpan>, serde_json::Error> {
    Vec::<InlineSpan>::deserialize(value)
}

/// Literal text of the first run, or `""` when there are no runs.
pub fn first_text(spans: &[InlineSpan]) -> String {
    spans.first().map(|span| span.text.clone()).unwrap_or_default()
}

/// [`decode_runs`] followed by [`first_text`].
pub fn first_run_text(value: &Value) -> Result<String, serde_json::Error> {
    decode_runs(value).map(|spans| first_text(&spans))
}

/// All runs' text concatenated, dropping styles.
pub fn plain_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(|span| span.text.as_str()).collect()
}
