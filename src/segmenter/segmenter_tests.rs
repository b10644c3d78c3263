//! Tests for header segmentation.

use super::*;

const TRANSCRIPT: &str = "--- AI Message ---\nhello\n--- Tool Message (call_id: abc) ---\n{}\n--- AI Message ---\nbye";

fn pattern(id: &str, regex: &str) -> Pattern {
    Pattern::new(
        PatternId::new(id).expect("valid pattern id"),
        id.to_uppercase(),
        regex,
        ColorId::Blue,
    )
}

fn ai_and_tool() -> Vec<Pattern> {
    vec![
        pattern("ai", "--- AI Message ---"),
        pattern("tool", r"--- Tool Message \(call_id: .+\) ---"),
    ]
}

fn ids(blocks: &[MessageBlock]) -> Vec<&str> {
    blocks.iter().map(|b| b.pattern_id.as_str()).collect()
}

fn assert_tiles(text: &str, blocks: &[MessageBlock]) {
    for pair in blocks.windows(2) {
        assert_eq!(pair[0].content_end, pair[1].header_start);
    }
    for b in blocks {
        assert!(b.header_start <= b.header_end);
        assert_eq!(b.header_end, b.content_start);
        assert!(b.content_start <= b.content_end);
    }
    if let Some(first) = blocks.first() {
        let rebuilt: String = blocks
            .iter()
            .map(|b| format!("{}{}", b.header_text(), b.content_text()))
            .collect();
        let suffix: String = text.chars().skip(first.header_start).collect();
        assert_eq!(rebuilt, suffix);
    }
}

// ===== Basic segmentation =====

#[test]
fn transcript_produces_three_alternating_blocks() {
    let result = segment(TRANSCRIPT, &ai_and_tool());

    assert!(result.errors.is_empty());
    assert_eq!(ids(&result.blocks), vec!["ai", "tool", "ai"]);
    assert_tiles(TRANSCRIPT, &result.blocks);
}

#[test]
fn last_block_runs_to_end_of_text() {
    let result = segment(TRANSCRIPT, &ai_and_tool());
    let last = result.blocks.last().expect("has blocks");

    assert_eq!(last.full_text, "--- AI Message ---\nbye");
    assert_eq!(last.content_end, TRANSCRIPT.chars().count());
}

#[test]
fn block_carries_pattern_name_and_color() {
    let patterns = vec![Pattern::new(
        PatternId::new("ai").expect("valid id"),
        "AI Message",
        "--- AI Message ---",
        ColorId::Green,
    )];
    let result = segment(TRANSCRIPT, &patterns);

    assert_eq!(result.blocks[0].pattern_name, "AI Message");
    assert_eq!(result.blocks[0].color, ColorId::Green);
}

#[test]
fn preamble_before_first_header_belongs_to_no_block() {
    let text = "intro\n--- AI Message ---\nhi";
    let result = segment(text, &ai_and_tool());

    assert_eq!(result.blocks.len(), 1);
    assert_eq!(result.blocks[0].header_start, 6);
    assert_tiles(text, &result.blocks);
}

#[test]
fn offsets_are_character_indices() {
    let text = "é --- AI Message ---\n→ done";
    let result = segment(text, &ai_and_tool());
    let block = &result.blocks[0];

    assert_eq!(block.header_start, 2);
    assert_eq!(block.header_end, 20);
    assert_eq!(block.content_end, text.chars().count());
    assert_eq!(block.content_text(), "\n→ done");
}

// ===== Exclusions =====

#[test]
fn no_patterns_yields_no_blocks() {
    let result = segment(TRANSCRIPT, &[]);

    assert!(result.blocks.is_empty());
    assert!(result.errors.is_empty());
}

#[test]
fn no_matches_yields_no_blocks_without_error() {
    let result = segment(TRANSCRIPT, &[pattern("sys", "--- System Message ---")]);

    assert!(result.blocks.is_empty());
    assert!(result.errors.is_empty());
}

#[test]
fn disabled_pattern_is_ignored() {
    let mut patterns = ai_and_tool();
    patterns[1].enabled = false;
    let result = segment(TRANSCRIPT, &patterns);

    assert_eq!(ids(&result.blocks), vec!["ai", "ai"]);
}

#[test]
fn empty_pattern_does_not_steal_matches() {
    let patterns = vec![pattern("empty", ""), pattern("ai", "--- AI Message ---")];
    let result = segment(TRANSCRIPT, &patterns);

    assert_eq!(ids(&result.blocks), vec!["ai", "ai"]);
}

// ===== Invalid patterns =====

#[test]
fn invalid_pattern_is_reported_and_skipped() {
    let patterns = vec![pattern("broken", "(unclosed"), pattern("ai", "--- AI Message ---")];
    let result = segment(TRANSCRIPT, &patterns);

    assert_eq!(ids(&result.blocks), vec!["ai", "ai"]);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].pattern_id().as_str(), "broken");
}

#[test]
fn error_for_finds_pattern_error() {
    let patterns = vec![pattern("broken", "[a-"), pattern("ai", "AI")];
    let result = segment(TRANSCRIPT, &patterns);

    let broken = PatternId::new("broken").expect("valid id");
    let ai = PatternId::new("ai").expect("valid id");
    assert!(result.error_for(&broken).is_some());
    assert!(result.error_for(&ai).is_none());
}

#[test]
fn all_patterns_invalid_yields_no_blocks() {
    let result = segment(TRANSCRIPT, &[pattern("a", "("), pattern("b", "*")]);

    assert!(result.blocks.is_empty());
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn stray_closing_paren_is_rejected() {
    assert!(validate_pattern(&pattern("p", "a)")).is_err());
}

#[test]
fn pattern_valid_only_when_wrapped_is_rejected() {
    // `(a)|(b)` compiles, but `a)|(b` on its own does not.
    let bad = pattern("bad", "a)|(b");

    assert!(matches!(
        validate_pattern(&bad),
        Err(PatternError::InvalidRegex { .. })
    ));

    let result = segment("xx b yy a", &[bad, pattern("yy", "yy")]);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].pattern_id().as_str(), "bad");
    assert_eq!(ids(&result.blocks), vec!["yy"]);
    assert_eq!(result.blocks[0].header_start, 5);
}

#[test]
fn validate_pattern_accepts_empty_regex() {
    assert!(validate_pattern(&pattern("p", "")).is_ok());
}

#[test]
fn validate_patterns_checks_disabled_patterns_too() {
    let patterns = vec![pattern("bad", "(").with_enabled(false), pattern("ok", "x")];
    let errors = validate_patterns(&patterns);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].pattern_id().as_str(), "bad");
}

// ===== Group mapping and tie-break =====

#[test]
fn inner_capture_groups_do_not_shift_pattern_mapping() {
    let patterns = vec![
        pattern("tool", r"--- (Tool) Message \((call_id): .+\) ---"),
        pattern("ai", "--- AI Message ---"),
    ];
    let result = segment(TRANSCRIPT, &patterns);

    assert_eq!(ids(&result.blocks), vec!["ai", "tool", "ai"]);
}

#[test]
fn earlier_pattern_wins_when_both_match_same_text() {
    let patterns = vec![pattern("first", "AI Message"), pattern("second", "AI Message")];
    let result = segment(TRANSCRIPT, &patterns);

    assert_eq!(ids(&result.blocks), vec!["first", "first"]);
}

#[test]
fn anchors_keep_their_meaning_inside_the_group() {
    let patterns = vec![pattern("start", "^---")];
    let result = segment(TRANSCRIPT, &patterns);

    assert_eq!(result.blocks.len(), 1);
    assert_eq!(result.blocks[0].header_start, 0);
    assert_eq!(result.blocks[0].full_text, TRANSCRIPT);
}

#[test]
fn inline_multiline_flag_is_respected() {
    let patterns = vec![pattern("line", "(?m)^---")];
    let result = segment(TRANSCRIPT, &patterns);

    assert_eq!(result.blocks.len(), 3);
    assert_tiles(TRANSCRIPT, &result.blocks);
}

// ===== Zero-width safety =====

#[test]
fn empty_group_pattern_terminates() {
    let text = "abc";
    let result = segment(text, &[pattern("z", "(?:)")]);

    // One zero-width header at every character boundary.
    assert_eq!(result.blocks.len(), 4);
    assert_tiles(text, &result.blocks);
}

#[test]
fn star_pattern_terminates_and_tiles() {
    let text = "xxaxb";
    let result = segment(text, &[pattern("x", "x*")]);

    assert!(!result.blocks.is_empty());
    assert_eq!(result.blocks[0].header_end, 2);
    assert_tiles(text, &result.blocks);
}

#[test]
fn zero_width_scan_steps_over_multibyte_chars() {
    let text = "é→";
    let result = segment(text, &[pattern("z", "")]);
    assert!(result.blocks.is_empty(), "empty pattern is inactive");

    let result = segment(text, &[pattern("z", "(?:)")]);
    assert_eq!(result.blocks.len(), 3);
    assert_tiles(text, &result.blocks);
}

#[test]
fn zero_width_on_empty_text_yields_single_block() {
    let result = segment("", &[pattern("z", "(?:)")]);

    assert_eq!(result.blocks.len(), 1);
    assert_eq!(result.blocks[0].full_text, "");
}

// ===== CompiledPatternSet reuse =====

#[test]
fn compiled_set_segments_multiple_texts() {
    let compiled = CompiledPatternSet::compile(&ai_and_tool());

    assert!(!compiled.is_empty());
    assert_eq!(compiled.segment(TRANSCRIPT).len(), 3);
    assert_eq!(compiled.segment("--- AI Message ---").len(), 1);
    assert!(compiled.segment("nothing here").is_empty());
}

#[test]
fn compiled_set_without_active_patterns_is_empty() {
    let compiled = CompiledPatternSet::compile(&[pattern("off", "x").with_enabled(false)]);

    assert!(compiled.is_empty());
    assert!(compiled.errors().is_empty());
}
