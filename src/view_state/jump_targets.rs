//! Jump targets for header navigation controls.

use crate::model::{ColorId, MessageBlock, PatternId};
use serde::Serialize;
use std::collections::HashMap;

/// One "jump to" control: a displayed block and its human label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JumpTarget {
    /// Index into the displayed block list.
    pub block_index: usize,
    /// Pattern name plus running count of that pattern, e.g. `AI Message #2`.
    pub label: String,
    /// Pattern of the block.
    pub pattern_id: PatternId,
    /// Color of that pattern.
    pub color: ColorId,
}

/// Build jump targets for the displayed blocks, in display order.
pub fn jump_targets(blocks: &[MessageBlock]) -> Vec<JumpTarget> {
    let mut counts: HashMap<&PatternId, usize> = HashMap::new();
    blocks
        .iter()
        .enumerate()
        .map(|(block_index, block)| {
            let count = counts.entry(&block.pattern_id).or_insert(0);
            *count += 1;
            JumpTarget {
                block_index,
                label: format!("{} #{}", block.pattern_name, count),
                pattern_id: block.pattern_id.clone(),
                color: block.color,
            }
        })
        .collect()
}
