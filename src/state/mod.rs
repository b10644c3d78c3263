//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod match_navigation_handler;
pub mod navigator;
pub mod search;
pub mod search_input_handler;
pub mod view_filter;

// Re-export for convenience
pub use app_state::AppState;
pub use match_navigation_handler::{next_match, prev_match};
pub use navigator::{next_header, prev_header, Navigator, ScrollRequest};
pub use search::{execute_search, MatchPosition, SearchOutcome, SearchQuery, SearchState};
pub use view_filter::{
    final_only_candidates, last_block_per_pattern, reduce_view, DisplayedView, ViewFilter,
};
