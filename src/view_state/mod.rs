//! View-state layer - composition, layout, and scrolling
//!
//! Turns the displayed text, its blocks, and the search matches into styled
//! rows the renderer can draw.
//!
//! # Module Structure
//!
//! - `compositor`: Region priority resolution into non-overlapping segments
//! - `layout`: Segments split into terminal rows, plus header anchors
//! - `jump_targets`: Labels for header navigation
//! - `scroll`: TraceScroll - clamped, optionally smooth scroll offset

pub mod compositor;
pub mod jump_targets;
pub mod layout;
pub mod scroll;

pub use compositor::{
    collect_regions, compose, compose_view, Region, RegionKind, Segment, SegmentStyle,
};
pub use jump_targets::{jump_targets, JumpTarget};
pub use layout::{layout_segments, HeaderAnchors, Row, RowSpan, TraceLayout};
pub use scroll::TraceScroll;
