//! TUI rendering and terminal management (impure shell)

mod layout;
mod search_input;
mod status_bar;
pub mod styles;
mod trace_pane;

pub use layout::{render_layout, FrameView, ScreenAreas};
pub use search_input::SearchInput;
pub use status_bar::StatusBar;
pub use styles::{ColorConfig, SegmentStyles};
pub use trace_pane::TracePane;

use crate::config::keybindings::KeyBindings;
use crate::model::KeyAction;
use crate::state::{search_input_handler, AppState, SearchState};
use crate::view_state::{layout_segments, TraceLayout, TraceScroll};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Poll interval while a smooth scroll or header pulse is in progress.
const ANIMATION_INTERVAL: Duration = Duration::from_millis(30);
/// Poll interval when idle.
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    styles: SegmentStyles,
    scroll: TraceScroll,
    /// Rows for the current state and viewport width.
    trace_layout: TraceLayout,
    /// Trace text area as (width, height).
    viewport: (u16, u16),
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, colors: ColorConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(
            terminal,
            app_state,
            SegmentStyles::with_color_config(colors),
        ))
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build the app around an already-initialized terminal.
    pub fn with_terminal(terminal: Terminal<B>, app_state: AppState, styles: SegmentStyles) -> Self {
        let mut app = Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            styles,
            scroll: TraceScroll::new(),
            trace_layout: TraceLayout::default(),
            viewport: (0, 0),
        };
        app.viewport = app.measure_viewport();
        app.relayout();
        if app.app_state.search().match_count() > 0 {
            app.center_on_current_match();
        }
        app
    }

    /// Current application state.
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Trace pane scroll position.
    pub fn scroll(&self) -> &TraceScroll {
        &self.scroll
    }

    /// Rows for the current state and viewport.
    pub fn trace_layout(&self) -> &TraceLayout {
        &self.trace_layout
    }

    /// Underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Redraws on input, resize, and
    /// animation ticks only.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let interval = if self.is_animating(Instant::now()) {
                ANIMATION_INTERVAL
            } else {
                IDLE_INTERVAL
            };

            if event::poll(interval)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                        self.draw()?;
                    }
                    _ => {}
                }
            } else if self.tick(Instant::now()) {
                self.draw()?;
            }
        }
    }

    /// Advance animations. Returns true if a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let scrolled = self.scroll.step();
        let expired = self.app_state.navigator.expire(now);
        scrolled || expired
    }

    fn is_animating(&self, now: Instant) -> bool {
        self.scroll.is_animating() || self.app_state.navigator.highlighted(now).is_some()
    }

    /// Handle a key press. Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even while typing a query
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.app_state.search().focused {
            self.handle_search_key(key);
            return false;
        }

        match self.key_bindings.get(key) {
            Some(action) => self.handle_action(action),
            None => false,
        }
    }

    /// Keys while the search box has focus.
    fn handle_search_key(&mut self, key: KeyEvent) {
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.app_state.edit_search(search_input_handler::blur_search),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.step_match(false)
            }
            KeyCode::Enter | KeyCode::Down => self.step_match(true),
            KeyCode::Up => self.step_match(false),
            KeyCode::Backspace => self.edit_query(search_input_handler::handle_backspace),
            KeyCode::Left => self.app_state.edit_search(search_input_handler::handle_cursor_left),
            KeyCode::Right => self.app_state.edit_search(search_input_handler::handle_cursor_right),
            KeyCode::Char('c') if alt => self.edit_query(search_input_handler::toggle_case_sensitive),
            KeyCode::Char('r') if alt => self.edit_query(search_input_handler::toggle_regex),
            KeyCode::Char(ch) if !alt && !ctrl => {
                self.edit_query(|s| search_input_handler::handle_char_input(s, ch))
            }
            _ => {}
        }
    }

    /// Apply an edit that may change matches, then follow the current match.
    fn edit_query(&mut self, edit: impl FnOnce(SearchState) -> SearchState) {
        self.app_state.edit_search(edit);
        self.relayout();
        self.center_on_current_match();
    }

    fn step_match(&mut self, forward: bool) {
        if forward {
            self.app_state.next_match();
        } else {
            self.app_state.prev_match();
        }
        self.relayout();
        self.center_on_current_match();
    }

    /// Dispatch a bound action. Returns true if the app should quit.
    fn handle_action(&mut self, action: KeyAction) -> bool {
        let (_, page) = self.viewport;
        let page = page.max(1) as isize;

        match action {
            KeyAction::Quit => return true,
            KeyAction::ScrollUp => self.scroll_by(-1),
            KeyAction::ScrollDown => self.scroll_by(1),
            KeyAction::PageUp => self.scroll_by(-page),
            KeyAction::PageDown => self.scroll_by(page),
            KeyAction::ScrollToTop => self.scroll_to(0, false),
            KeyAction::ScrollToBottom => self.scroll_to(usize::MAX, false),
            KeyAction::NextHeader => {
                let selected = self.app_state.select_next_header();
                self.jump_to_header(selected);
            }
            KeyAction::PrevHeader => {
                let selected = self.app_state.select_prev_header();
                self.jump_to_header(selected);
            }
            KeyAction::CycleFinalOnly => {
                self.app_state.cycle_final_only();
                self.relayout();
                self.scroll.reset();
                self.center_on_current_match();
            }
            KeyAction::ToggleAnnotations => {
                let enabled = self.app_state.annotations_enabled();
                self.app_state.set_annotations_enabled(!enabled);
                self.relayout();
                self.center_on_current_match();
            }
            KeyAction::ToggleWrap => {
                self.app_state.wrap = !self.app_state.wrap;
                self.relayout();
            }
            KeyAction::StartSearch => self.app_state.edit_search(search_input_handler::focus_search),
            KeyAction::NextMatch => self.step_match(true),
            KeyAction::PrevMatch => self.step_match(false),
            KeyAction::ClearSearch => {
                self.app_state.edit_search(search_input_handler::clear_query);
                self.relayout();
            }
        }
        false
    }

    fn jump_to_header(&mut self, block_index: Option<usize>) {
        let Some(block_index) = block_index else {
            return;
        };
        let request = self.app_state.navigator.jump_to(
            block_index,
            &self.trace_layout.header_anchors,
            self.scroll.offset(),
            Instant::now(),
        );
        if let Some(request) = request {
            debug!(block_index, target = request.target, delta = request.delta, "Jumping to header");
            self.scroll_to(request.target, request.smooth);
        }
    }

    fn center_on_current_match(&mut self) {
        if let Some(row) = self.trace_layout.current_match_row {
            let (_, height) = self.viewport;
            self.scroll
                .center_on(row, self.trace_layout.height(), height as usize);
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        let (_, height) = self.viewport;
        self.scroll
            .scroll_by(delta, self.trace_layout.height(), height as usize);
    }

    fn scroll_to(&mut self, target: usize, smooth: bool) {
        let (_, height) = self.viewport;
        self.scroll
            .scroll_to(target, smooth, self.trace_layout.height(), height as usize);
    }

    fn measure_viewport(&self) -> (u16, u16) {
        let (width, height) = match self.terminal.size() {
            Ok(size) if size.width > 0 => (size.width, size.height),
            _ => (80, 24),
        };
        ScreenAreas::split(Rect::new(0, 0, width, height)).trace_viewport()
    }

    /// Recompute rows from the current state and viewport width.
    fn relayout(&mut self) {
        let (width, height) = self.viewport;
        let segments = self.app_state.segments();
        self.trace_layout = layout_segments(&segments, width.max(1), self.app_state.wrap);
        self.scroll.clamp(self.trace_layout.height(), height as usize);
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        self.viewport = ScreenAreas::split(Rect::new(0, 0, width.max(1), height)).trace_viewport();
        self.relayout();
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let now = Instant::now();
        let view = FrameView {
            layout: &self.trace_layout,
            scroll_offset: self.scroll.offset(),
            styles: &self.styles,
            pulsing: self.app_state.navigator.highlighted(now),
        };
        let state = &self.app_state;
        self.terminal.draw(|frame| render_layout(frame, state, &view))?;
        Ok(())
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit, including when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(app_state: AppState, colors: ColorConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(app_state, colors)?;
    let result = app.run();
    restore_terminal()?;
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
