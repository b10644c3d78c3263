//! Scroll position of the trace pane.

/// Vertical scroll state with an optional smooth-scroll target.
///
/// # Clamping Behavior
/// Offsets are clamped to `[0, max(0, total_height - viewport_height)]` so a
/// scroll request never produces a blank viewport.
///
/// # Smooth scrolling
/// A smooth request only sets `target`; each [`TraceScroll::step`] (one per
/// timer tick) moves `offset` half the remaining distance, at least one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceScroll {
    offset: usize,
    target: usize,
}

impl TraceScroll {
    /// Scrolled to the top.
    pub fn new() -> Self {
        Self::default()
    }

    /// First visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Row the scroll is moving towards.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Whether a smooth scroll is still moving.
    pub fn is_animating(&self) -> bool {
        self.offset != self.target
    }

    /// Largest valid offset.
    pub fn max_offset(total_height: usize, viewport_height: usize) -> usize {
        total_height.saturating_sub(viewport_height)
    }

    /// Request a scroll to `target`, clamped to the document.
    pub fn scroll_to(&mut self, target: usize, smooth: bool, total_height: usize, viewport_height: usize) {
        self.target = target.min(Self::max_offset(total_height, viewport_height));
        if !smooth {
            self.offset = self.target;
        }
    }

    /// Scroll immediately by `delta` rows.
    pub fn scroll_by(&mut self, delta: isize, total_height: usize, viewport_height: usize) {
        let target = self.offset.saturating_add_signed(delta);
        self.scroll_to(target, false, total_height, viewport_height);
    }

    /// Smoothly scroll so `row` sits in the middle of the viewport.
    pub fn center_on(&mut self, row: usize, total_height: usize, viewport_height: usize) {
        let target = row.saturating_sub(viewport_height / 2);
        self.scroll_to(target, true, total_height, viewport_height);
    }

    /// Advance one animation frame. Returns true if the offset moved.
    pub fn step(&mut self) -> bool {
        if self.offset == self.target {
            return false;
        }
        let distance = self.offset.abs_diff(self.target);
        let stride = distance.div_ceil(2).max(1);
        if self.offset < self.target {
            self.offset += stride;
        } else {
            self.offset -= stride;
        }
        true
    }

    /// Re-clamp after the document or viewport changed size.
    pub fn clamp(&mut self, total_height: usize, viewport_height: usize) {
        let max = Self::max_offset(total_height, viewport_height);
        self.offset = self.offset.min(max);
        self.target = self.target.min(max);
    }

    /// Back to the top, cancelling any animation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
