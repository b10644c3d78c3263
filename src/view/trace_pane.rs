//! Trace pane widget.
//!
//! Draws the visible window of laid-out rows. Rows are already split and
//! wrapped by `view_state::layout`, so the paragraph itself never wraps.

use crate::view::styles::SegmentStyles;
use crate::view_state::{Row, TraceLayout};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Convert one row to a styled line.
fn row_to_line(row: &Row, styles: &SegmentStyles, pulsing: Option<usize>) -> Line<'static> {
    Line::from(
        row.spans
            .iter()
            .map(|span| Span::styled(span.text.clone(), styles.style_for(span.style, pulsing)))
            .collect::<Vec<_>>(),
    )
}

/// Lines for rows `offset..offset + height`.
pub fn visible_lines(
    layout: &TraceLayout,
    offset: usize,
    height: usize,
    styles: &SegmentStyles,
    pulsing: Option<usize>,
) -> Vec<Line<'static>> {
    layout
        .rows
        .iter()
        .skip(offset)
        .take(height)
        .map(|row| row_to_line(row, styles, pulsing))
        .collect()
}

/// Bordered pane showing the trace from a scroll offset.
pub struct TracePane<'a> {
    layout: &'a TraceLayout,
    offset: usize,
    styles: &'a SegmentStyles,
    pulsing: Option<usize>,
    title: String,
}

impl<'a> TracePane<'a> {
    /// Pane drawing `layout` from row `offset`.
    pub fn new(layout: &'a TraceLayout, offset: usize, styles: &'a SegmentStyles) -> Self {
        Self {
            layout,
            offset,
            styles,
            pulsing: None,
            title: String::new(),
        }
    }

    /// Block whose header is pulsing after a jump.
    pub fn pulsing(mut self, block_index: Option<usize>) -> Self {
        self.pulsing = block_index;
        self
    }

    /// Border title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Widget for TracePane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(self.title);
        let inner_height = block.inner(area).height as usize;
        let lines = visible_lines(self.layout, self.offset, inner_height, self.styles, self.pulsing);
        Paragraph::new(lines).block(block).render(area, buf);
    }
}
