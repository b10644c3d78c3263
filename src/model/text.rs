//! Character offset bookkeeping.
//!
//! The regex engine reports byte offsets; every public offset in this crate
//! is a character (Unicode scalar value) index. `CharMap` converts between
//! the two for one text buffer.

/// Byte offsets of every character boundary in a text, plus its length.
#[derive(Debug, Clone)]
pub struct CharMap {
    /// `boundaries[i]` is the byte offset of char `i`; the last entry is the
    /// byte length of the text.
    boundaries: Vec<usize>,
}

impl CharMap {
    /// Index the character boundaries of `text`.
    pub fn new(text: &str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        boundaries.push(text.len());
        Self { boundaries }
    }

    /// Number of characters in the text.
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Character index of a byte offset that lies on a char boundary.
    ///
    /// Offsets inside a multi-byte character resolve to that character.
    pub fn byte_to_char(&self, byte: usize) -> usize {
        match self.boundaries.binary_search(&byte) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    /// Byte offset of a character index, clamped to the text length.
    pub fn char_to_byte(&self, ch: usize) -> usize {
        self.boundaries[ch.min(self.char_len())]
    }

    /// Byte offset of the character following the one starting at `byte`.
    pub fn next_boundary(&self, byte: usize) -> usize {
        let idx = self.byte_to_char(byte);
        self.char_to_byte(idx + 1)
    }
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Substring of `text` between two character offsets.
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let map = CharMap::new(text);
    &text[map.char_to_byte(start)..map.char_to_byte(end.max(start))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_offsets_are_identical() {
        let map = CharMap::new("hello");
        assert_eq!(map.char_len(), 5);
        assert_eq!(map.byte_to_char(3), 3);
        assert_eq!(map.char_to_byte(3), 3);
        assert_eq!(map.char_to_byte(5), 5);
    }

    #[test]
    fn multibyte_offsets_convert() {
        // 'é' is two bytes, '→' is three.
        let map = CharMap::new("é→x");
        assert_eq!(map.char_len(), 3);
        assert_eq!(map.char_to_byte(1), 2);
        assert_eq!(map.char_to_byte(2), 5);
        assert_eq!(map.byte_to_char(5), 2);
        assert_eq!(map.byte_to_char(6), 3);
    }

    #[test]
    fn byte_inside_char_resolves_to_that_char() {
        let map = CharMap::new("é→x");
        assert_eq!(map.byte_to_char(3), 1);
    }

    #[test]
    fn next_boundary_skips_whole_character() {
        let map = CharMap::new("é→x");
        assert_eq!(map.next_boundary(0), 2);
        assert_eq!(map.next_boundary(2), 5);
        assert_eq!(map.next_boundary(6), 6);
    }

    #[test]
    fn char_to_byte_clamps_past_end() {
        let map = CharMap::new("ab");
        assert_eq!(map.char_to_byte(10), 2);
    }

    #[test]
    fn empty_text_has_zero_chars() {
        let map = CharMap::new("");
        assert_eq!(map.char_len(), 0);
        assert_eq!(map.next_boundary(0), 0);
    }

    #[test]
    fn char_slice_uses_char_offsets() {
        assert_eq!(char_slice("héllo wörld", 6, 11), "wörld");
        assert_eq!(char_slice("abc", 2, 1), "");
    }
}
