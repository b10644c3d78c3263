//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Actions only apply while the search box is unfocused; keys typed into a
/// focused search box are handled by the search input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll transcript up by one row. Default: k/↑
    ScrollUp,
    /// Scroll transcript down by one row. Default: j/↓
    ScrollDown,
    /// Scroll up by one page height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one page height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to top of transcript. Default: g/Home
    ScrollToTop,
    /// Jump to bottom of transcript. Default: G/End
    ScrollToBottom,

    // Header navigation
    /// Jump to the next message header. Default: ]
    NextHeader,
    /// Jump to the previous message header. Default: [
    PrevHeader,

    // View
    /// Cycle the final-only filter through patterns that have blocks, then off. Default: f
    CycleFinalOnly,
    /// Toggle header annotation on/off. Default: a
    ToggleAnnotations,
    /// Toggle line wrapping. Default: w
    ToggleWrap,

    // Search
    /// Focus the search box. Default: / or Ctrl+f
    StartSearch,
    /// Navigate to next search match. Default: n
    NextMatch,
    /// Navigate to previous search match. Default: N
    PrevMatch,
    /// Clear the search query. Default: Esc
    ClearSearch,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}
