//! Opaque rich-content blocks.
//!
//! # Responsibility
//! - Carry editor block nodes through the core without interpreting them.
//! - Extract plain text for previews, diffs and the reword boundary.
//!
//! # Invariants
//! - The core never inspects or validates formatting marks inside a block.
//! - Plain-text extraction reads `children[].text` only, one line per block.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Placeholder body given to freshly created notes.
pub const DEFAULT_CONTENT_TEXT: &str = "Enter a description";

/// One rich-text block node, opaque to the core.
///
/// The inner value is whatever the rich-content collaborator produced.
/// The core persists it, concatenates sequences of it and extracts plain
/// text from it, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentBlock(Value);

impl ContentBlock {
    /// Wraps a raw block node supplied by the rich-content collaborator.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Builds a paragraph block holding one run of plain text.
    pub fn paragraph(text: &str) -> Self {
        Self(json!({
            "type": "paragraph",
            "children": [{ "text": text }],
        }))
    }

    /// Returns the underlying block node.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Concatenates the text runs of this block's direct children.
    ///
    /// Unknown shapes yield an empty string rather than an error; content
    /// is opaque and a block without readable text is still a valid block.
    pub fn plain_text(&self) -> String {
        let Some(children) = self.0.get("children").and_then(Value::as_array) else {
            return String::new();
        };
        children
            .iter()
            .filter_map(|child| child.get("text").and_then(Value::as_str))
            .collect()
    }
}

/// Joins block texts with newlines, one line per block.
pub fn to_plain_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .map(ContentBlock::plain_text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds one paragraph block per input line.
///
/// An empty input still yields a single empty paragraph so the result is
/// always a usable editor document.
pub fn blocks_from_plain_text(text: &str) -> Vec<ContentBlock> {
    if text.is_empty() {
        return vec![ContentBlock::paragraph("")];
    }
    text.lines().map(ContentBlock::paragraph).collect()
}

/// Default body for notes created without explicit content.
pub fn default_content() -> Vec<ContentBlock> {
    vec![ContentBlock::paragraph(DEFAULT_CONTENT_TEXT)]
}

#[cfg(test)]
mod tests {
    use super::{
        blocks_from_plain_text, default_content, to_plain_text, ContentBlock,
        DEFAULT_CONTENT_TEXT,
    };
    use serde_json::json;

    #[test]
    fn paragraph_round_trips_plain_text() {
        let block = ContentBlock::paragraph("hello world");
        assert_eq!(block.plain_text(), "hello world");
    }

    #[test]
    fn plain_text_joins_children_and_ignores_marks() {
        let block = ContentBlock::from_value(json!({
            "type": "paragraph",
            "children": [
                { "text": "bold", "bold": true },
                { "text": " and plain" },
            ],
        }));
        assert_eq!(block.plain_text(), "bold and plain");
    }

    #[test]
    fn plain_text_of_unknown_shape_is_empty() {
        let block = ContentBlock::from_value(json!({ "kind": "divider" }));
        assert_eq!(block.plain_text(), "");
    }

    #[test]
    fn to_plain_text_emits_one_line_per_block() {
        let blocks = vec![
            ContentBlock::paragraph("first"),
            ContentBlock::paragraph("second"),
        ];
        assert_eq!(to_plain_text(&blocks), "first\nsecond");
    }

    #[test]
    fn blocks_from_plain_text_splits_lines() {
        let blocks = blocks_from_plain_text("one\ntwo");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].plain_text(), "two");

        let empty = blocks_from_plain_text("");
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].plain_text(), "");
    }

    #[test]
    fn default_content_is_single_placeholder_paragraph() {
        let blocks = default_content();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].plain_text(), DEFAULT_CONTENT_TEXT);
    }

    #[test]
    fn serde_round_trip_preserves_unknown_marks() {
        let source = json!({
            "type": "paragraph",
            "children": [{ "text": "styled", "underline": true }],
        });
        let block = ContentBlock::from_value(source.clone());
        let encoded = serde_json::to_string(&block).unwrap();
        let decoded: ContentBlock = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.as_value(), &source);
    }
}
