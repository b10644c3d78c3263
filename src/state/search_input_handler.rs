//! Search input handling (pure state transitions).
//!
//! Edits the query, cursor, focus, and flags of a [`SearchState`]. These
//! functions never execute the search; the caller refreshes matches after any
//! transition that changes the query or a flag (see `AppState::edit_search`).
//! Cursor positions are character indices.

use crate::state::SearchState;

/// Byte offset of character index `cursor` in `query`.
fn byte_offset(query: &str, cursor: usize) -> usize {
    query
        .char_indices()
        .nth(cursor)
        .map(|(b, _)| b)
        .unwrap_or(query.len())
}

/// Give the search box keyboard focus, cursor at end of the query.
pub fn focus_search(mut state: SearchState) -> SearchState {
    state.focused = true;
    state.cursor = state.query.chars().count();
    state
}

/// Remove keyboard focus, keeping query and matches.
pub fn blur_search(mut state: SearchState) -> SearchState {
    state.focused = false;
    state
}

/// Insert a character at the cursor and advance the cursor.
pub fn handle_char_input(mut state: SearchState, ch: char) -> SearchState {
    let at = byte_offset(&state.query, state.cursor);
    state.query.insert(at, ch);
    state.cursor += 1;
    state
}

/// Delete the character before the cursor, if any.
pub fn handle_backspace(mut state: SearchState) -> SearchState {
    if state.cursor == 0 {
        return state;
    }
    let at = byte_offset(&state.query, state.cursor - 1);
    state.query.remove(at);
    state.cursor -= 1;
    state
}

/// Move cursor left by one position. Saturates at 0.
pub fn handle_cursor_left(mut state: SearchState) -> SearchState {
    state.cursor = state.cursor.saturating_sub(1);
    state
}

/// Move cursor right by one position. Saturates at query length.
pub fn handle_cursor_right(mut state: SearchState) -> SearchState {
    state.cursor = (state.cursor + 1).min(state.query.chars().count());
    state
}

/// Clear the query text.
pub fn clear_query(mut state: SearchState) -> SearchState {
    state.query.clear();
    state.cursor = 0;
    state
}

/// Flip case sensitivity.
pub fn toggle_case_sensitive(mut state: SearchState) -> SearchState {
    state.case_sensitive = !state.case_sensitive;
    state
}

/// Flip regex mode.
pub fn toggle_regex(mut state: SearchState) -> SearchState {
    state.regex = !state.regex;
    state
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_input_handler_tests.rs"]
mod tests;
