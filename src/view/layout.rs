//! Screen layout rendering.
//!
//! Pure layout logic: splits the frame into the trace pane, status bar and
//! search bar, and renders each from the current state.

use crate::state::AppState;
use crate::view::search_input::SearchInput;
use crate::view::status_bar::StatusBar;
use crate::view::styles::SegmentStyles;
use crate::view::trace_pane::TracePane;
use crate::view_state::TraceLayout;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Screen regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Bordered trace pane.
    pub trace: Rect,
    /// Status and jump bar.
    pub status: Rect,
    /// Search bar.
    pub search: Rect,
}

impl ScreenAreas {
    /// Split `area` into the three regions.
    pub fn split(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Trace pane
                Constraint::Length(1), // Status / jump bar
                Constraint::Length(1), // Search bar
            ])
            .split(area);
        Self {
            trace: chunks[0],
            status: chunks[1],
            search: chunks[2],
        }
    }

    /// Text area inside the trace pane border, as (width, height).
    pub fn trace_viewport(&self) -> (u16, u16) {
        (
            self.trace.width.saturating_sub(2),
            self.trace.height.saturating_sub(2),
        )
    }
}

/// Everything the frame needs besides the app state.
pub struct FrameView<'a> {
    /// Rows to draw.
    pub layout: &'a TraceLayout,
    /// First visible row.
    pub scroll_offset: usize,
    /// Segment styles.
    pub styles: &'a SegmentStyles,
    /// Block whose header is pulsing after a jump.
    pub pulsing: Option<usize>,
}

fn trace_title(state: &AppState) -> String {
    let blocks = state.displayed().blocks.len();
    let noun = if blocks == 1 { "message" } else { "messages" };
    let wrap = if state.wrap { "" } else { " · nowrap" };
    format!(" tracelens · {blocks} {noun}{wrap} ")
}

/// Render the full screen.
pub fn render_layout(frame: &mut Frame, state: &AppState, view: &FrameView<'_>) {
    let areas = ScreenAreas::split(frame.area());

    frame.render_widget(
        TracePane::new(view.layout, view.scroll_offset, view.styles)
            .pulsing(view.pulsing)
            .title(trace_title(state)),
        areas.trace,
    );
    frame.render_widget(StatusBar::new(state, view.styles), areas.status);
    frame.render_widget(SearchInput::new(state.search(), view.styles), areas.search);
}
