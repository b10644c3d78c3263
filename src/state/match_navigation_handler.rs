//! Match navigation handler.
//!
//! Pure functions for navigating between search matches with wrap-around.
//! Scrolling the current match into view is the renderer's job; these only
//! move the index.

use crate::state::SearchState;

/// Navigate to the next search match.
///
/// Behavior:
/// - If there are no matches, does nothing
/// - Increments current_match by 1
/// - Wraps from last match to first (0)
pub fn next_match(mut state: SearchState) -> SearchState {
    let count = state.match_count();
    if count == 0 {
        return state;
    }
    let next_index = (state.current_match() + 1) % count;
    state.set_current_match(next_index);
    state
}

/// Navigate to the previous search match.
///
/// Behavior:
/// - If there are no matches, does nothing
/// - Decrements current_match by 1
/// - Wraps from first match (0) to last
pub fn prev_match(mut state: SearchState) -> SearchState {
    let count = state.match_count();
    if count == 0 {
        return state;
    }
    let prev_index = (state.current_match() + count - 1) % count;
    state.set_current_match(prev_index);
    state
}
