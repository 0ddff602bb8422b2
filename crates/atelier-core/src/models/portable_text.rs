//! Portable Text (rich text) helpers
//!
//! Rich text is stored as an array of blocks, each holding spans of text.
//! Non-text blocks (inline images, embeds) are kept but contribute no text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_default;

/// A rich text document
pub type PortableText = Vec<Block>;

/// One block of rich text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(rename = "_type", default = "default_block_type")]
    pub block_type: String,
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    pub style: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub children: Vec<Span>,
    #[serde(default, deserialize_with = "null_default")]
    pub mark_defs: Vec<Value>,
    pub list_item: Option<String>,
    pub level: Option<u32>,
}

/// A run of text with marks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_default")]
    pub marks: Vec<String>,
}

fn default_block_type() -> String {
    "block".to_string()
}

impl Block {
    /// A plain paragraph block with a single span
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            block_type: default_block_type(),
            key: None,
            style: Some("normal".to_string()),
            children: vec![Span {
                key: None,
                text: text.into(),
                marks: Vec::new(),
            }],
            mark_defs: Vec::new(),
            list_item: None,
            level: None,
        }
    }

    fn is_text(&self) -> bool {
        self.block_type == "block"
    }

    /// Concatenated text of this block's spans
    pub fn text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Plain text of a rich text document, text blocks separated by blank lines
pub fn plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .filter(|b| b.is_text())
        .map(Block::text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Single-line excerpt for meta descriptions, cut at `max_chars` characters
pub fn summary(blocks: &[Block], max_chars: usize) -> String {
    let joined = blocks
        .iter()
        .filter(|b| b.is_text())
        .map(Block::text)
        .collect::<Vec<_>>()
        .join(" ");
    joined.chars().take(max_chars).collect()
}

/// Plain text of a raw rich text value, as the store's `pt::text()` computes it
///
/// Anything that is not an array of blocks yields an empty string.
pub fn plain_text_value(value: &Value) -> String {
    let Some(blocks) = value.as_array() else {
        return String::new();
    };

    blocks
        .iter()
        .filter(|b| b.get("_type").and_then(Value::as_str).unwrap_or("block") == "block")
        .map(|b| {
            b.get("children")
                .and_then(Value::as_array)
                .map(|spans| {
                    spans
                        .iter()
                        .filter_map(|s| s.get("text").and_then(Value::as_str))
                        .collect::<String>()
                })
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
