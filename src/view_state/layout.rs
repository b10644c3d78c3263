//! Row layout of composed segments.
//!
//! Splits segments into terminal rows (on newlines and, when wrapping, by
//! display width) and records where each header and the current search match
//! land. The header anchor map is the explicit handle map the navigator uses
//! to scroll a header into view.

use super::compositor::{Segment, SegmentStyle};
use std::collections::HashMap;
use unicode_width::UnicodeWidthChar;

/// Columns a tab expands to.
const TAB_WIDTH: usize = 4;

// ===== Rows =====

/// A run of same-styled text within a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpan {
    /// Span text.
    pub text: String,
    /// Span style.
    pub style: SegmentStyle,
}

/// One terminal row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Styled runs, left to right.
    pub spans: Vec<RowSpan>,
}

impl Row {
    /// Plain text of the row.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

// ===== HeaderAnchors =====

/// Row of each displayed header, keyed by block index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderAnchors(HashMap<usize, usize>);

impl HeaderAnchors {
    /// Empty anchor map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the header of `block_index` starts on `row`.
    pub fn insert(&mut self, block_index: usize, row: usize) {
        self.0.insert(block_index, row);
    }

    /// Row the header of `block_index` starts on.
    pub fn row_of(&self, block_index: usize) -> Option<usize> {
        self.0.get(&block_index).copied()
    }

    /// Number of anchored headers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no header is anchored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ===== TraceLayout =====

/// Segments laid out into rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceLayout {
    /// Rows top to bottom.
    pub rows: Vec<Row>,
    /// Row of each header, by block index.
    pub header_anchors: HeaderAnchors,
    /// Row the current search match starts on, if it is rendered.
    pub current_match_row: Option<usize>,
}

impl TraceLayout {
    /// Total height in rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Lay out `segments` for a viewport `width` columns wide.
///
/// With `wrap` off (or a zero width) rows break only at newlines.
pub fn layout_segments(segments: &[Segment], width: u16, wrap: bool) -> TraceLayout {
    let mut builder = RowBuilder::new(width as usize, wrap);
    let mut header_anchors = HeaderAnchors::new();
    let mut current_match_row = None;

    for segment in segments {
        let first_row = builder.place_segment(segment);
        match segment.style {
            SegmentStyle::Header { block_index, .. } => header_anchors.insert(block_index, first_row),
            SegmentStyle::CurrentMatch => current_match_row = Some(first_row),
            SegmentStyle::Plain | SegmentStyle::Match => {}
        }
    }

    TraceLayout {
        rows: builder.rows,
        header_anchors,
        current_match_row,
    }
}

struct RowBuilder {
    rows: Vec<Row>,
    col: usize,
    width: usize,
    wrap: bool,
}

impl RowBuilder {
    fn new(width: usize, wrap: bool) -> Self {
        Self {
            rows: vec![Row::default()],
            col: 0,
            width,
            wrap: wrap && width > 0,
        }
    }

    fn current_row(&self) -> usize {
        self.rows.len() - 1
    }

    fn newline(&mut self) {
        self.rows.push(Row::default());
        self.col = 0;
    }

    /// Place a whole segment, returning the row its first character landed on.
    fn place_segment(&mut self, segment: &Segment) -> usize {
        let mut first_row = None;
        for ch in segment.text.chars() {
            match ch {
                '\n' => {
                    first_row.get_or_insert(self.current_row());
                    self.newline();
                }
                '\r' => {}
                '\t' => {
                    for _ in 0..TAB_WIDTH {
                        let row = self.push(' ', segment.style);
                        first_row.get_or_insert(row);
                    }
                }
                _ => {
                    let row = self.push(ch, segment.style);
                    first_row.get_or_insert(row);
                }
            }
        }
        first_row.unwrap_or(self.current_row())
    }

    fn push(&mut self, ch: char, style: SegmentStyle) -> usize {
        let w = ch.width().unwrap_or(0);
        if self.wrap && self.col > 0 && self.col + w > self.width {
            self.newline();
        }
        if let Some(row) = self.rows.last_mut() {
            match row.spans.last_mut() {
                Some(span) if span.style == style => span.text.push(ch),
                _ => row.spans.push(RowSpan {
                    text: ch.to_string(),
                    style,
                }),
            }
        }
        self.col += w;
        self.current_row()
    }
}
