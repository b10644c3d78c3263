//! Header navigator.
//!
//! Scrolls a message header into view and marks it as recently jumped to so
//! the renderer can pulse it. The header rows come from an explicit anchor map
//! produced by layout; the navigator holds no references into the view.

use crate::view_state::HeaderAnchors;
use std::time::{Duration, Instant};

/// How long a jumped-to header stays highlighted.
pub const DEFAULT_PULSE_DURATION: Duration = Duration::from_secs(2);

/// Rows kept above a jumped-to header.
pub const DEFAULT_TOP_PADDING: usize = 1;

/// A scroll the renderer should perform. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Row to bring to the top of the viewport.
    pub target: usize,
    /// Rows to move from the scroll offset the jump was measured against.
    pub delta: isize,
    /// Whether to animate the scroll.
    pub smooth: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Jump {
    block_index: usize,
    at: Instant,
}

/// Jump-to-header state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    top_padding: usize,
    pulse_duration: Duration,
    last_jump: Option<Jump>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_PADDING, DEFAULT_PULSE_DURATION)
    }
}

impl Navigator {
    /// Navigator keeping `top_padding` rows above a jumped-to header.
    pub fn new(top_padding: usize, pulse_duration: Duration) -> Self {
        Self {
            top_padding,
            pulse_duration,
            last_jump: None,
        }
    }

    /// Scroll request that brings the header of `block_index` into view.
    ///
    /// The target is the header row shifted up by the top padding; `delta`
    /// is that target measured from `scroll_offset`. Marks the block as
    /// recently jumped to. Returns `None` if the block has no anchor.
    pub fn jump_to(
        &mut self,
        block_index: usize,
        anchors: &HeaderAnchors,
        scroll_offset: usize,
        now: Instant,
    ) -> Option<ScrollRequest> {
        let row = anchors.row_of(block_index)?;
        let target = row.saturating_sub(self.top_padding);
        self.last_jump = Some(Jump { block_index, at: now });
        Some(ScrollRequest {
            target,
            delta: target as isize - scroll_offset as isize,
            smooth: true,
        })
    }

    /// Block currently pulsing, if its pulse has not elapsed.
    pub fn highlighted(&self, now: Instant) -> Option<usize> {
        self.last_jump
            .filter(|j| now.saturating_duration_since(j.at) < self.pulse_duration)
            .map(|j| j.block_index)
    }

    /// Block most recently jumped to, pulsing or not.
    pub fn last_jumped(&self) -> Option<usize> {
        self.last_jump.map(|j| j.block_index)
    }

    /// Drop an elapsed highlight. Returns true if one was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.last_jump.is_some() && self.highlighted(now).is_none() {
            self.last_jump = None;
            return true;
        }
        false
    }

    /// Forget the last jump (e.g. after the displayed blocks changed).
    pub fn reset(&mut self) {
        self.last_jump = None;
    }
}

/// Next block index after `current`, wrapping. `None` when there are no blocks.
pub fn next_header(current: Option<usize>, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(current.map_or(0, |i| (i + 1) % count))
}

/// Previous block index before `current`, wrapping. `None` when there are no blocks.
pub fn prev_header(current: Option<usize>, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(current.map_or(count - 1, |i| (i + count - 1) % count))
}
