//! Machine-readable snapshot of the annotated view.
//!
//! Backs `--dump`: everything the viewer would render, as JSON, without a
//! terminal.

use crate::model::{MessageBlock, PatternId};
use crate::state::{AppState, SearchOutcome};
use crate::view_state::{JumpTarget, Segment};
use serde::Serialize;

/// A pattern that failed to compile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternErrorReport {
    /// Id of the failing pattern.
    pub pattern_id: PatternId,
    /// Compiler message.
    pub message: String,
}

/// Search part of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// Query text.
    pub query: String,
    /// Whether matching was case sensitive.
    pub case_sensitive: bool,
    /// Whether the query was a regex.
    pub regex: bool,
    /// Index of the current match, if there are matches.
    pub current_match: Option<usize>,
    /// Matches and regex error.
    #[serde(flatten)]
    pub outcome: SearchOutcome,
}

/// Everything derived from one source text and pattern set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Pattern the view is restricted to, if any.
    pub final_only: Option<PatternId>,
    /// Displayed blocks.
    pub blocks: Vec<MessageBlock>,
    /// Styled segments covering the displayed text.
    pub segments: Vec<Segment>,
    /// Jump targets for the displayed blocks.
    pub jump_targets: Vec<JumpTarget>,
    /// Patterns that failed to compile.
    pub pattern_errors: Vec<PatternErrorReport>,
    /// Search over the displayed text.
    pub search: SearchReport,
}

impl Report {
    /// Snapshot the displayed view of `state`.
    pub fn from_state(state: &AppState) -> Self {
        let search = state.search();
        Self {
            final_only: state.view_filter().final_only().cloned(),
            blocks: state.displayed().blocks.clone(),
            segments: state.segments(),
            jump_targets: state.jump_targets(),
            pattern_errors: state
                .pattern_errors()
                .iter()
                .map(|e| PatternErrorReport {
                    pattern_id: e.pattern_id().clone(),
                    message: e.to_string(),
                })
                .collect(),
            search: SearchReport {
                query: search.query.clone(),
                case_sensitive: search.case_sensitive,
                regex: search.regex,
                current_match: search.current().map(|_| search.current_match()),
                outcome: search.outcome(),
            },
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
