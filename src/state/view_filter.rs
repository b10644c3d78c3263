//! Final-only view filter.
//!
//! Derives the text and blocks actually displayed from the full segmentation.
//! When the filter names a pattern, only the last block of that pattern is
//! shown, re-based so downstream consumers index into the displayed text.

use crate::model::{MessageBlock, Pattern, PatternId};
use std::collections::HashMap;

// ===== ViewFilter =====

/// Which pattern, if any, is restricted to its final message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    final_only: Option<PatternId>,
}

impl ViewFilter {
    /// Filter with nothing selected.
    pub fn off() -> Self {
        Self::default()
    }

    /// Pattern the view is restricted to, if any.
    pub fn final_only(&self) -> Option<&PatternId> {
        self.final_only.as_ref()
    }

    /// Whether a final-only filter is set.
    pub fn is_active(&self) -> bool {
        self.final_only.is_some()
    }

    /// Toggle final-only for `id`.
    ///
    /// Patterns without any block are never offered as a toggle; for those this
    /// is a no-op returning `false`. Toggling the currently selected pattern
    /// turns the filter off.
    pub fn toggle(&mut self, id: &PatternId, blocks: &[MessageBlock]) -> bool {
        if self.final_only.as_ref() == Some(id) {
            self.final_only = None;
            return true;
        }
        if !blocks.iter().any(|b| &b.pattern_id == id) {
            return false;
        }
        self.final_only = Some(id.clone());
        true
    }

    /// Advance to the next candidate pattern, wrapping to off after the last.
    pub fn cycle(&mut self, candidates: &[PatternId]) {
        self.final_only = match &self.final_only {
            None => candidates.first().cloned(),
            Some(current) => candidates
                .iter()
                .position(|c| c == current)
                .and_then(|i| candidates.get(i + 1))
                .cloned(),
        };
    }

    /// Turn the filter off.
    pub fn clear(&mut self) {
        self.final_only = None;
    }
}

// ===== Projections =====

/// Index of the last block for every pattern id that has blocks.
///
/// Later blocks overwrite earlier ones of the same pattern.
pub fn last_block_per_pattern(blocks: &[MessageBlock]) -> HashMap<PatternId, usize> {
    let mut last = HashMap::new();
    for (index, block) in blocks.iter().enumerate() {
        last.insert(block.pattern_id.clone(), index);
    }
    last
}

/// Pattern ids, in set order, that have at least one block.
pub fn final_only_candidates(patterns: &[Pattern], blocks: &[MessageBlock]) -> Vec<PatternId> {
    let last = last_block_per_pattern(blocks);
    patterns
        .iter()
        .filter(|p| last.contains_key(&p.id))
        .map(|p| p.id.clone())
        .collect()
}

// ===== DisplayedView =====

/// The text and blocks currently shown.
///
/// Offsets in `blocks` always index into `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayedView {
    /// Displayed text.
    pub text: String,
    /// Displayed blocks, offsets into `text`.
    pub blocks: Vec<MessageBlock>,
}

impl DisplayedView {
    /// Unfiltered view of the full text.
    pub fn full(text: &str, blocks: &[MessageBlock]) -> Self {
        Self {
            text: text.to_string(),
            blocks: blocks.to_vec(),
        }
    }
}

/// Apply `filter` to the full text and block list.
///
/// A filter naming a pattern with no blocks behaves like no filter.
pub fn reduce_view(text: &str, blocks: &[MessageBlock], filter: &ViewFilter) -> DisplayedView {
    let Some(id) = filter.final_only() else {
        return DisplayedView::full(text, blocks);
    };
    let last = last_block_per_pattern(blocks);
    match last.get(id) {
        Some(&index) => {
            let block = blocks[index].rebased();
            DisplayedView {
                text: block.full_text.clone(),
                blocks: vec![block],
            }
        }
        None => DisplayedView::full(text, blocks),
    }
}
