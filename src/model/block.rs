//! Message blocks produced by segmentation.

use super::pattern::{ColorId, PatternId};
use serde::Serialize;

/// A header match plus the content that follows it up to the next header.
///
/// Offsets are character indices into the text the block was computed from.
/// `header_start <= header_end == content_start <= content_end`, and
/// `full_text` is the text of `[header_start, content_end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBlock {
    /// Pattern that matched the header.
    pub pattern_id: PatternId,
    /// Display name of that pattern.
    pub pattern_name: String,
    /// Color of that pattern.
    pub color: ColorId,
    /// First character of the header match.
    pub header_start: usize,
    /// End of the header match (exclusive).
    pub header_end: usize,
    /// Start of the content; always equals `header_end`.
    pub content_start: usize,
    /// End of the content (exclusive): the next header or end of text.
    pub content_end: usize,
    /// Header and content text.
    pub full_text: String,
}

impl MessageBlock {
    /// Header length in characters.
    pub fn header_len(&self) -> usize {
        self.header_end - self.header_start
    }

    /// Total block length in characters.
    pub fn len(&self) -> usize {
        self.content_end - self.header_start
    }

    /// Whether the block spans no characters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The header portion of `full_text`.
    pub fn header_text(&self) -> &str {
        &self.full_text[..self.header_split()]
    }

    /// The content portion of `full_text`.
    pub fn content_text(&self) -> &str {
        &self.full_text[self.header_split()..]
    }

    /// Copy of this block re-based so the header starts at offset 0.
    ///
    /// Used by the final-only view, where the displayed text is the block's
    /// own `full_text`.
    pub fn rebased(&self) -> Self {
        let header_len = self.header_len();
        Self {
            pattern_id: self.pattern_id.clone(),
            pattern_name: self.pattern_name.clone(),
            color: self.color,
            header_start: 0,
            header_end: header_len,
            content_start: header_len,
            content_end: self.len(),
            full_text: self.full_text.clone(),
        }
    }

    fn header_split(&self) -> usize {
        self.full_text
            .char_indices()
            .nth(self.header_len())
            .map(|(b, _)| b)
            .unwrap_or(self.full_text.len())
    }
}
