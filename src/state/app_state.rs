//! Application state and recompute triggers.
//!
//! AppState owns the immutable snapshots the annotation engine works on
//! (source text, pattern set, flags) and the values derived from them
//! (segmentation, displayed view, search matches). Derived values are
//! recomputed explicitly by the setters below, never observed lazily.

use crate::model::{MessageBlock, Pattern, PatternError, PatternId};
use crate::segmenter::{segment, CompiledPatternSet, Segmentation};
use crate::state::navigator::{next_header, prev_header, Navigator};
use crate::state::view_filter::{final_only_candidates, reduce_view, DisplayedView, ViewFilter};
use crate::state::{next_match, prev_match, SearchState};
use crate::view_state::{compose_view, jump_targets, JumpTarget, Segment};
use tracing::debug;

// ===== AppState =====

/// Application state.
///
/// # Recompute triggers
///
/// - `set_text`: resegment, reset the final-only filter, rebuild view, re-search
/// - `set_patterns` / `set_annotations_enabled`: resegment, drop a filter whose
///   pattern lost all blocks, rebuild view, re-search
/// - `toggle_final_only` / `cycle_final_only`: rebuild view, re-search
/// - `edit_search`: re-search when the query or a flag changed
///
/// Rebuilding the view also resets header selection and the navigator, since
/// block indices refer to the displayed block list.
#[derive(Debug, Clone)]
pub struct AppState {
    source_text: String,
    patterns: Vec<Pattern>,
    annotations_enabled: bool,
    segmentation: Segmentation,
    view_filter: ViewFilter,
    displayed: DisplayedView,

    /// Search box and match list over the displayed text.
    search: SearchState,

    /// Jump-to-header state.
    pub navigator: Navigator,

    /// Block index last selected with next/previous header.
    selected_header: Option<usize>,

    /// Whether long rows wrap to the viewport width.
    pub wrap: bool,
}

impl AppState {
    /// Create state for `text` annotated with `patterns`.
    pub fn new(text: impl Into<String>, patterns: Vec<Pattern>) -> Self {
        let mut state = Self {
            source_text: text.into(),
            patterns,
            annotations_enabled: true,
            segmentation: Segmentation::default(),
            view_filter: ViewFilter::off(),
            displayed: DisplayedView::default(),
            search: SearchState::default(),
            navigator: Navigator::default(),
            selected_header: None,
            wrap: true,
        };
        state.resegment();
        state.rebuild_view();
        state
    }

    /// Start with the given search flags instead of case-insensitive plain text.
    pub fn with_search_flags(mut self, case_sensitive: bool, regex: bool) -> Self {
        self.search = SearchState::new(case_sensitive, regex);
        self
    }

    /// Use `navigator` for header jumps.
    pub fn with_navigator(mut self, navigator: Navigator) -> Self {
        self.navigator = navigator;
        self
    }

    // ===== Accessors =====

    /// Full source text.
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Pattern set in order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Whether headers are being annotated.
    pub fn annotations_enabled(&self) -> bool {
        self.annotations_enabled
    }

    /// Full, unfiltered block list.
    pub fn blocks(&self) -> &[MessageBlock] {
        &self.segmentation.blocks
    }

    /// Per-pattern compile errors from the last segmentation.
    pub fn pattern_errors(&self) -> &[PatternError] {
        &self.segmentation.errors
    }

    /// Current final-only filter.
    pub fn view_filter(&self) -> &ViewFilter {
        &self.view_filter
    }

    /// Text and blocks currently displayed.
    pub fn displayed(&self) -> &DisplayedView {
        &self.displayed
    }

    /// Search box and matches.
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Header last selected with next/previous header.
    pub fn selected_header(&self) -> Option<usize> {
        self.selected_header
    }

    // ===== Source triggers =====

    /// Replace the source text. Always turns the final-only filter off.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.source_text = text.into();
        self.view_filter.clear();
        self.resegment();
        self.rebuild_view();
    }

    /// Replace the pattern set.
    pub fn set_patterns(&mut self, patterns: Vec<Pattern>) {
        self.patterns = patterns;
        self.resegment();
        self.drop_stale_filter();
        self.rebuild_view();
    }

    /// Turn header annotation on or off without touching the pattern set.
    pub fn set_annotations_enabled(&mut self, enabled: bool) {
        if self.annotations_enabled == enabled {
            return;
        }
        self.annotations_enabled = enabled;
        self.resegment();
        self.drop_stale_filter();
        self.rebuild_view();
    }

    // ===== View triggers =====

    /// Patterns that may be offered as a final-only toggle.
    pub fn final_only_candidates(&self) -> Vec<PatternId> {
        final_only_candidates(&self.patterns, &self.segmentation.blocks)
    }

    /// Toggle final-only for `id`. Returns false if the pattern has no blocks.
    pub fn toggle_final_only(&mut self, id: &PatternId) -> bool {
        let changed = self.view_filter.toggle(id, &self.segmentation.blocks);
        if changed {
            self.rebuild_view();
        }
        changed
    }

    /// Step the final-only filter through the candidates, then off.
    pub fn cycle_final_only(&mut self) {
        let candidates = self.final_only_candidates();
        self.view_filter.cycle(&candidates);
        self.rebuild_view();
    }

    // ===== Search triggers =====

    /// Apply a search input transition, re-searching if the query or a flag changed.
    pub fn edit_search(&mut self, edit: impl FnOnce(SearchState) -> SearchState) {
        let before = self.search.to_query();
        self.search = edit(std::mem::take(&mut self.search));
        if self.search.to_query() != before {
            self.search.refresh(&self.displayed.text);
        }
    }

    /// Advance to the next match, wrapping.
    pub fn next_match(&mut self) {
        self.search = next_match(std::mem::take(&mut self.search));
    }

    /// Go back to the previous match, wrapping.
    pub fn prev_match(&mut self) {
        self.search = prev_match(std::mem::take(&mut self.search));
    }

    // ===== Header selection =====

    /// Select the next displayed header, wrapping.
    pub fn select_next_header(&mut self) -> Option<usize> {
        self.selected_header = next_header(self.selected_header, self.displayed.blocks.len());
        self.selected_header
    }

    /// Select the previous displayed header, wrapping.
    pub fn select_prev_header(&mut self) -> Option<usize> {
        self.selected_header = prev_header(self.selected_header, self.displayed.blocks.len());
        self.selected_header
    }

    // ===== Derived output =====

    /// Renderable segments for the displayed text.
    pub fn segments(&self) -> Vec<Segment> {
        compose_view(
            &self.displayed.text,
            &self.displayed.blocks,
            self.search.matches(),
            self.search.current_match(),
        )
    }

    /// Jump targets for the displayed blocks.
    pub fn jump_targets(&self) -> Vec<JumpTarget> {
        jump_targets(&self.displayed.blocks)
    }

    // ===== Internals =====

    fn resegment(&mut self) {
        self.segmentation = if self.annotations_enabled {
            segment(&self.source_text, &self.patterns)
        } else {
            Segmentation {
                blocks: Vec::new(),
                errors: CompiledPatternSet::compile(&self.patterns).errors().to_vec(),
            }
        };
    }

    fn drop_stale_filter(&mut self) {
        if let Some(id) = self.view_filter.final_only() {
            if !self.segmentation.blocks.iter().any(|b| &b.pattern_id == id) {
                debug!(pattern_id = %id, "Final-only pattern has no blocks, clearing filter");
                self.view_filter.clear();
            }
        }
    }

    fn rebuild_view(&mut self) {
        self.displayed = reduce_view(&self.source_text, &self.segmentation.blocks, &self.view_filter);
        self.selected_header = None;
        self.navigator.reset();
        self.search.refresh(&self.displayed.text);
        debug!(
            blocks = self.displayed.blocks.len(),
            final_only = ?self.view_filter.final_only(),
            matches = self.search.match_count(),
            "Rebuilt displayed view"
        );
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
