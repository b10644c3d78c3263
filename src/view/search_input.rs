//! Search input widget for rendering the search bar.

use crate::state::SearchState;
use crate::view::styles::SegmentStyles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Hint shown while no search is active.
const IDLE_HINT: &str = "/ search  n/N match  ]/[ header  f final-only  a annotations  w wrap  q quit";

/// Search bar: prompt, query with cursor, mode flags, match counter, and
/// the regex error if the query does not compile.
pub struct SearchInput<'a> {
    search: &'a SearchState,
    styles: &'a SegmentStyles,
}

impl<'a> SearchInput<'a> {
    /// Search bar for `search`.
    pub fn new(search: &'a SearchState, styles: &'a SegmentStyles) -> Self {
        Self { search, styles }
    }

    /// Query spans, with a block cursor when focused.
    fn query_spans(&self) -> Vec<Span<'static>> {
        let query = &self.search.query;
        if !self.search.focused {
            return vec![Span::raw(query.clone())];
        }
        let cursor = self.search.cursor;
        let before: String = query.chars().take(cursor).collect();
        let mut after = query.chars().skip(cursor);
        let under = after.next().map_or_else(|| " ".to_string(), String::from);
        let rest: String = after.collect();

        vec![
            Span::raw(before),
            Span::styled(under, Style::default().add_modifier(Modifier::REVERSED)),
            Span::raw(rest),
        ]
    }

    fn flag(&self, label: &'static str, on: bool) -> Span<'static> {
        if on {
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD))
        } else {
            Span::styled(label, self.styles.dim())
        }
    }

    /// `current/total` counter, `0/0` when nothing matched.
    fn counter(&self) -> String {
        let total = self.search.match_count();
        if total == 0 {
            "0/0".to_string()
        } else {
            format!("{}/{}", self.search.current_match() + 1, total)
        }
    }

    fn line(&self) -> Line<'static> {
        if !self.search.focused && self.search.query.is_empty() {
            return Line::from(Span::styled(IDLE_HINT, self.styles.dim()));
        }

        let mut spans = vec![Span::raw("/")];
        spans.extend(self.query_spans());
        spans.push(Span::raw("  "));
        spans.push(self.flag("[Aa]", self.search.case_sensitive));
        spans.push(Span::raw(" "));
        spans.push(self.flag("[.*]", self.search.regex));
        spans.push(Span::raw(" "));
        spans.push(Span::raw(self.counter()));

        if let Some(error) = self.search.error() {
            // regex errors are multi-line; the last line carries the message
            let summary = error.lines().last().unwrap_or(error).trim().to_string();
            spans.push(Span::raw("  "));
            spans.push(Span::styled(summary, self.styles.error()));
        }
        Line::from(spans)
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}
