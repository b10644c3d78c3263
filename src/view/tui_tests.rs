//! Tests for TuiApp key handling and rendering.

use super::*;
use crate::model::{ColorId, Pattern, PatternId};
use ratatui::backend::TestBackend;

// ===== Test Helpers =====

fn patterns() -> Vec<Pattern> {
    vec![
        Pattern::new(
            PatternId::new("ai").expect("id"),
            "AI Message",
            "--- AI Message ---",
            ColorId::Blue,
        ),
        Pattern::new(
            PatternId::new("tool").expect("id"),
            "Tool Message",
            "--- Tool Message ---",
            ColorId::Yellow,
        ),
    ]
}

/// Three AI blocks of 30 rows each; headers on rows 0, 30 and 60.
fn long_transcript() -> String {
    let mut text = String::new();
    for i in 0..3 {
        text.push_str("--- AI Message ---\n");
        for j in 0..29 {
            text.push_str(&format!("line {i}.{j}\n"));
        }
    }
    text
}

fn create_test_app(text: &str) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(80, 24)).expect("test terminal");
    let styles = SegmentStyles::with_color_config(ColorConfig::with_colors(false));
    TuiApp::with_terminal(terminal, AppState::new(text, patterns()), styles)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_str(app: &mut TuiApp<TestBackend>, text: &str) {
    for ch in text.chars() {
        app.handle_key(key(KeyCode::Char(ch)));
    }
}

fn settle(app: &mut TuiApp<TestBackend>) {
    let now = Instant::now();
    for _ in 0..64 {
        if !app.tick(now) {
            break;
        }
    }
}

fn screen_text(app: &TuiApp<TestBackend>) -> String {
    let buffer = app.terminal().backend().buffer();
    let area = buffer.area;
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ===== Quit Tests =====

#[test]
fn handle_key_q_returns_true() {
    let mut app = create_test_app("text");
    assert!(app.handle_key(key(KeyCode::Char('q'))));
}

#[test]
fn handle_key_ctrl_c_returns_true_even_while_searching() {
    let mut app = create_test_app("text");
    app.handle_key(key(KeyCode::Char('/')));

    assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}

#[test]
fn handle_key_other_returns_false() {
    let mut app = create_test_app("text");
    assert!(!app.handle_key(key(KeyCode::Char('z'))));
}

// ===== Search Tests =====

#[test]
fn slash_focuses_search_and_typed_keys_edit_query() {
    let mut app = create_test_app(&long_transcript());
    app.handle_key(key(KeyCode::Char('/')));
    assert!(app.app_state().search().focused);

    type_str(&mut app, "q line");

    assert_eq!(app.app_state().search().query, "q line");
    assert_eq!(app.app_state().search().match_count(), 0);
}

#[test]
fn typing_updates_matches_as_you_type() {
    let mut app = create_test_app(&long_transcript());
    app.handle_key(key(KeyCode::Char('/')));

    type_str(&mut app, "line 2.");
    assert_eq!(app.app_state().search().match_count(), 29);

    app.handle_key(key(KeyCode::Backspace));
    app.handle_key(key(KeyCode::Backspace));
    assert_eq!(app.app_state().search().query, "line ");
    assert_eq!(app.app_state().search().match_count(), 87);
}

#[test]
fn enter_and_shift_enter_step_through_matches() {
    let mut app = create_test_app(&long_transcript());
    app.handle_key(key(KeyCode::Char('/')));
    type_str(&mut app, "ai message");

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.app_state().search().current_match(), 1);
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
    assert_eq!(app.app_state().search().current_match(), 0);
    app.handle_key(key(KeyCode::Up));
    assert_eq!(app.app_state().search().current_match(), 2);
}

#[test]
fn esc_unfocuses_and_n_navigates_matches() {
    let mut app = create_test_app(&long_transcript());
    app.handle_key(key(KeyCode::Char('/')));
    type_str(&mut app, "ai message");
    app.handle_key(key(KeyCode::Esc));
    assert!(!app.app_state().search().focused);

    app.handle_key(key(KeyCode::Char('n')));
    app.handle_key(key(KeyCode::Char('n')));
    assert_eq!(app.app_state().search().current_match(), 2);
    app.handle_key(KeyEvent::new(KeyCode::Char('N'), KeyModifiers::SHIFT));
    assert_eq!(app.app_state().search().current_match(), 1);
}

#[test]
fn navigating_to_far_match_scrolls_it_into_view() {
    let mut app = create_test_app(&long_transcript());
    app.handle_key(key(KeyCode::Char('/')));
    type_str(&mut app, "line 2.20");
    settle(&mut app);

    let row = app.trace_layout().current_match_row.expect("match rendered");
    let offset = app.scroll().offset();
    assert!(row >= offset && row < offset + 20, "row {row} outside viewport at {offset}");
}

#[test]
fn alt_keys_toggle_search_flags() {
    let mut app = create_test_app("AI ai");
    app.handle_key(key(KeyCode::Char('/')));
    type_str(&mut app, "ai");
    assert_eq!(app.app_state().search().match_count(), 2);

    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::ALT));
    assert!(app.app_state().search().case_sensitive);
    assert_eq!(app.app_state().search().match_count(), 1);

    app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::ALT));
    assert!(app.app_state().search().regex);
    assert_eq!(app.app_state().search().query, "ai");
}

// ===== Header Navigation Tests =====

#[test]
fn bracket_jumps_to_header_with_top_padding() {
    let mut app = create_test_app(&long_transcript());
    assert_eq!(app.trace_layout().header_anchors.row_of(1), Some(30));

    app.handle_key(key(KeyCode::Char(']')));
    app.handle_key(key(KeyCode::Char(']')));
    assert_eq!(app.scroll().target(), 29);
    assert_eq!(app.scroll().offset(), 0, "jump is smooth");

    settle(&mut app);
    assert_eq!(app.scroll().offset(), 29);
}

#[test]
fn jumped_header_pulses_until_expired() {
    let mut app = create_test_app(&long_transcript());
    app.handle_key(key(KeyCode::Char('[')));

    let now = Instant::now();
    assert_eq!(app.app_state().navigator.highlighted(now), Some(2));
    assert!(app.tick(now + Duration::from_secs(3)));
    assert_eq!(app.app_state().navigator.last_jumped(), None);
}

// ===== View Toggle Tests =====

#[test]
fn f_cycles_final_only_and_resets_scroll() {
    let mut app = create_test_app(&long_transcript());
    app.handle_key(key(KeyCode::Char('G')));
    assert!(app.scroll().offset() > 0);

    app.handle_key(key(KeyCode::Char('f')));

    assert!(app.app_state().view_filter().is_active());
    assert_eq!(app.app_state().displayed().blocks.len(), 1);
    assert_eq!(app.scroll().offset(), 0);
    assert!(app.trace_layout().rows[1].text().starts_with("line 2.0"));
}

#[test]
fn a_toggles_annotations() {
    let mut app = create_test_app(&long_transcript());
    app.handle_key(key(KeyCode::Char('a')));

    assert!(!app.app_state().annotations_enabled());
    assert!(app.trace_layout().header_anchors.is_empty());
}

#[test]
fn toggling_annotations_follows_reset_current_match() {
    let mut app = create_test_app(&long_transcript());
    app.handle_key(key(KeyCode::Char('/')));
    type_str(&mut app, "line");
    app.handle_key(key(KeyCode::Up));
    app.handle_key(key(KeyCode::Esc));
    settle(&mut app);
    assert!(app.scroll().offset() > 60, "last match is near the bottom");

    app.handle_key(key(KeyCode::Char('a')));
    settle(&mut app);

    assert_eq!(app.app_state().search().current_match(), 0);
    let row = app.trace_layout().current_match_row.expect("match rendered");
    let offset = app.scroll().offset();
    assert!(row >= offset && row < offset + 20, "row {row} outside viewport at {offset}");
}

#[test]
fn w_toggles_wrap() {
    let long_line = "x".repeat(200);
    let mut app = create_test_app(&long_line);
    assert_eq!(app.trace_layout().height(), 3);

    app.handle_key(key(KeyCode::Char('w')));

    assert!(!app.app_state().wrap);
    assert_eq!(app.trace_layout().height(), 1);
}

#[test]
fn page_down_and_g_scroll() {
    let mut app = create_test_app(&long_transcript());
    app.handle_key(key(KeyCode::PageDown));
    assert_eq!(app.scroll().offset(), 20);

    app.handle_key(key(KeyCode::Char('g')));
    assert_eq!(app.scroll().offset(), 0);
}

// ===== Rendering Tests =====

#[test]
fn draw_renders_trace_status_and_hint() {
    let mut app = create_test_app(&long_transcript());
    app.draw().expect("draw");

    let screen = screen_text(&app);
    assert!(screen.contains("--- AI Message ---"));
    assert!(screen.contains("[all messages] AI Message #1 | AI Message #2"));
    assert!(screen.contains("/ search"));
}

#[test]
fn resize_relayouts_rows() {
    let long_line = "x".repeat(100);
    let mut app = create_test_app(&long_line);
    assert_eq!(app.trace_layout().height(), 2);

    app.handle_resize(42, 24);

    assert_eq!(app.trace_layout().height(), 3);
}
