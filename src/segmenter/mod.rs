//! Header segmentation of transcript text.
//!
//! This module turns an ordered pattern set into message blocks over a text
//! buffer. All active patterns are combined into one alternation so a single
//! scan finds every header regardless of which pattern matched:
//!
//! ```text
//! (p1)|(p2)|(p3)
//! ```
//!
//! Each match becomes the header of a block whose content runs up to the next
//! header (or end of text), so blocks tile the text from the first header on.

use crate::model::{CharMap, ColorId, MessageBlock, Pattern, PatternError, PatternId};
use regex::{Captures, Regex};
use tracing::{debug, error, warn};

// ===== Segmentation =====

/// Result of segmenting one text with one pattern set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Blocks in text order.
    pub blocks: Vec<MessageBlock>,
    /// Per-pattern compile errors. Offending patterns were left out of the scan.
    pub errors: Vec<PatternError>,
}

impl Segmentation {
    /// Compile error for a specific pattern, if any.
    pub fn error_for(&self, id: &PatternId) -> Option<&PatternError> {
        self.errors.iter().find(|e| e.pattern_id() == id)
    }
}

/// Segment `text` with `patterns`.
///
/// Disabled patterns and patterns with empty regex text are ignored. Invalid
/// patterns are reported in [`Segmentation::errors`] and skipped. A text with
/// no header matches yields zero blocks.
pub fn segment(text: &str, patterns: &[Pattern]) -> Segmentation {
    let compiled = CompiledPatternSet::compile(patterns);
    let blocks = compiled.segment(text);
    debug!(
        blocks = blocks.len(),
        patterns = compiled.slots.len(),
        errors = compiled.errors.len(),
        "Segmented text"
    );
    Segmentation {
        blocks,
        errors: compiled.errors,
    }
}

// ===== Validation =====

/// Compile-check a single pattern.
///
/// Used for inline feedback while a pattern is being edited. Empty regex text
/// is valid (the pattern simply has no effect).
pub fn validate_pattern(pattern: &Pattern) -> Result<(), PatternError> {
    if pattern.regex.is_empty() {
        return Ok(());
    }
    compile_standalone(pattern).map(|_| ())
}

/// Compile-check every pattern, returning the errors in set order.
pub fn validate_patterns(patterns: &[Pattern]) -> Vec<PatternError> {
    patterns
        .iter()
        .filter_map(|p| validate_pattern(p).err())
        .collect()
}

/// Compile the pattern on its own, exactly as written. Returns the number of
/// capture groups the pattern itself contains.
///
/// Text like `a)|(b` only becomes valid once wrapped in a group, so the
/// wrapped form is never what gets checked.
fn compile_standalone(pattern: &Pattern) -> Result<usize, PatternError> {
    let regex = Regex::new(&pattern.regex).map_err(|e| PatternError::InvalidRegex {
        pattern_id: pattern.id.clone(),
        message: e.to_string(),
    })?;
    // captures_len counts the implicit whole-match group.
    Ok(regex.captures_len().saturating_sub(1))
}

fn wrap(source: &str) -> String {
    format!("({source})")
}

// ===== CompiledPatternSet =====

/// One active pattern's position in the combined expression.
#[derive(Debug, Clone)]
struct PatternSlot {
    id: PatternId,
    name: String,
    color: ColorId,
    /// Index of the pattern's outer capture group.
    group: usize,
}

/// An active pattern set compiled into one combined expression.
///
/// Reusable across texts: compile once per pattern-set change, then call
/// [`CompiledPatternSet::segment`] for each text.
#[derive(Debug, Clone)]
pub struct CompiledPatternSet {
    combined: Option<Regex>,
    slots: Vec<PatternSlot>,
    errors: Vec<PatternError>,
}

impl CompiledPatternSet {
    /// Compile the active patterns of `patterns`, in set order.
    pub fn compile(patterns: &[Pattern]) -> Self {
        let mut slots = Vec::new();
        let mut sources = Vec::new();
        let mut errors = Vec::new();
        let mut next_group = 1;

        for pattern in patterns.iter().filter(|p| p.is_active()) {
            match compile_standalone(pattern) {
                Ok(inner_groups) => {
                    slots.push(PatternSlot {
                        id: pattern.id.clone(),
                        name: pattern.name.clone(),
                        color: pattern.color,
                        group: next_group,
                    });
                    sources.push(wrap(&pattern.regex));
                    next_group += 1 + inner_groups;
                }
                Err(err) => {
                    warn!(pattern_id = %pattern.id, error = %err, "Skipping invalid header pattern");
                    errors.push(err);
                }
            }
        }

        let combined = if sources.is_empty() {
            None
        } else {
            match Regex::new(&sources.join("|")) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    error!(error = %err, "Combined header expression failed to compile");
                    None
                }
            }
        };

        Self {
            combined,
            slots,
            errors,
        }
    }

    /// Per-pattern compile errors found while compiling.
    pub fn errors(&self) -> &[PatternError] {
        &self.errors
    }

    /// Whether any pattern made it into the combined expression.
    pub fn is_empty(&self) -> bool {
        self.combined.is_none()
    }

    /// Split `text` into blocks, one per header match.
    pub fn segment(&self, text: &str) -> Vec<MessageBlock> {
        let Some(regex) = &self.combined else {
            return Vec::new();
        };
        let map = CharMap::new(text);
        let headers = self.scan(regex, text, &map);

        let mut blocks = Vec::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let content_end = headers.get(i + 1).map_or(text.len(), |next| next.start);
            let slot = &self.slots[header.slot];
            blocks.push(MessageBlock {
                pattern_id: slot.id.clone(),
                pattern_name: slot.name.clone(),
                color: slot.color,
                header_start: map.byte_to_char(header.start),
                header_end: map.byte_to_char(header.end),
                content_start: map.byte_to_char(header.end),
                content_end: map.byte_to_char(content_end),
                full_text: text[header.start..content_end].to_string(),
            });
        }
        blocks
    }

    /// Find every header match, left to right.
    fn scan(&self, regex: &Regex, text: &str, map: &CharMap) -> Vec<HeaderMatch> {
        let mut headers = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let Some(caps) = regex.captures_at(text, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            if let Some(slot) = self.slot_for(&caps) {
                headers.push(HeaderMatch {
                    slot,
                    start: whole.start(),
                    end: whole.end(),
                });
            }

            if whole.start() == whole.end() {
                // Zero-width: step one character so the scan makes progress.
                if whole.end() >= text.len() {
                    break;
                }
                pos = map.next_boundary(whole.end());
            } else {
                pos = whole.end();
            }
        }
        headers
    }

    /// The pattern that produced a match: the lowest-indexed slot whose group
    /// captured non-empty text, else the lowest-indexed participating slot.
    fn slot_for(&self, caps: &Captures<'_>) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| caps.get(s.group).is_some_and(|m| !m.as_str().is_empty()))
            .or_else(|| self.slots.iter().position(|s| caps.get(s.group).is_some()))
    }
}

/// Byte span of one header match and the slot that produced it.
#[derive(Debug, Clone, Copy)]
struct HeaderMatch {
    slot: usize,
    start: usize,
    end: usize,
}

// ===== Tests =====

#[cfg(test)]
#[path = "segmenter_tests.rs"]
mod tests;
