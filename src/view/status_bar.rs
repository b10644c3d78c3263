//! Status and jump bar.
//!
//! One line: the view mode (all messages or final-only), annotation state,
//! pattern error count, then the jump target labels starting at the selected
//! header so the selection is always visible.

use crate::state::AppState;
use crate::view::styles::{terminal_color, SegmentStyles};
use crate::view_state::JumpTarget;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// One-line status and jump bar.
pub struct StatusBar<'a> {
    state: &'a AppState,
    styles: &'a SegmentStyles,
}

impl<'a> StatusBar<'a> {
    /// Status bar for `state`.
    pub fn new(state: &'a AppState, styles: &'a SegmentStyles) -> Self {
        Self { state, styles }
    }

    fn mode_label(&self) -> String {
        let Some(id) = self.state.view_filter().final_only() else {
            return "all messages".to_string();
        };
        let name = self
            .state
            .patterns()
            .iter()
            .find(|p| &p.id == id)
            .map_or(id.as_str(), |p| p.name.as_str());
        format!("final {name}")
    }

    fn target_span(&self, target: &JumpTarget, selected: bool) -> Span<'static> {
        let mut style = Style::default();
        if self.styles.colors_enabled() {
            style = style.fg(terminal_color(target.color));
        }
        if selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Span::styled(target.label.clone(), style)
    }

    fn line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            format!("[{}]", self.mode_label()),
            Style::default().add_modifier(Modifier::BOLD),
        )];

        if !self.state.annotations_enabled() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled("[annotations off]", self.styles.dim()));
        }

        let errors = self.state.pattern_errors().len();
        if errors > 0 {
            let noun = if errors == 1 { "error" } else { "errors" };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("[{errors} pattern {noun}]"), self.styles.error()));
        }

        let targets = self.state.jump_targets();
        if !targets.is_empty() {
            spans.push(Span::raw(" "));
            let selected = self.state.selected_header();
            let start = selected.unwrap_or(0).min(targets.len() - 1);
            for (i, target) in targets[start..].iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" | ", self.styles.dim()));
                }
                spans.push(self.target_span(target, selected == Some(target.block_index)));
            }
        }

        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}
