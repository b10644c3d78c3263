//! Region compositor.
//!
//! Merges two independently computed span lists, message headers and search
//! matches, into one ordered list of non-overlapping styled segments that
//! covers the displayed text exactly once.
//!
//! # Overlap policy
//! Regions are sorted by start (stable, headers before matches at equal
//! starts). Walking them with a cursor, a region that starts before the cursor
//! overlaps something already emitted and is dropped whole. Headers never
//! overlap each other, so only search matches can be dropped.

use crate::model::{CharMap, ColorId, MessageBlock};
use crate::state::MatchPosition;
use serde::Serialize;

// ===== Region =====

/// What a region annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// A message header, linked to its block in the displayed block list.
    Header {
        /// Color of the header's pattern.
        color: ColorId,
        /// Index into the displayed blocks.
        block_index: usize,
    },
    /// A search match other than the current one.
    Match,
    /// The current search match.
    CurrentMatch,
}

/// A tagged span in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// First character.
    pub start: usize,
    /// End (exclusive).
    pub end: usize,
    /// What the span annotates.
    pub kind: RegionKind,
}

/// Build the region list: headers first, then search matches.
pub fn collect_regions(
    blocks: &[MessageBlock],
    matches: &[MatchPosition],
    current_match: usize,
) -> Vec<Region> {
    let headers = blocks.iter().enumerate().map(|(block_index, b)| Region {
        start: b.header_start,
        end: b.header_end,
        kind: RegionKind::Header {
            color: b.color,
            block_index,
        },
    });
    let hits = matches.iter().enumerate().map(|(i, m)| Region {
        start: m.start,
        end: m.end,
        kind: if i == current_match {
            RegionKind::CurrentMatch
        } else {
            RegionKind::Match
        },
    });
    headers.chain(hits).collect()
}

// ===== Segment =====

/// Render style of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentStyle {
    /// No annotation.
    Plain,
    /// A header in its pattern's color.
    Header {
        /// Color of the header's pattern.
        color: ColorId,
        /// Index into the displayed blocks.
        block_index: usize,
    },
    /// A search match other than the current one.
    Match,
    /// The current search match.
    CurrentMatch,
}

impl From<RegionKind> for SegmentStyle {
    fn from(kind: RegionKind) -> Self {
        match kind {
            RegionKind::Header { color, block_index } => SegmentStyle::Header { color, block_index },
            RegionKind::Match => SegmentStyle::Match,
            RegionKind::CurrentMatch => SegmentStyle::CurrentMatch,
        }
    }
}

/// A styled chunk of the displayed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// First character in the displayed text.
    pub start: usize,
    /// End (exclusive).
    pub end: usize,
    /// Segment text.
    pub text: String,
    /// How to render it.
    pub style: SegmentStyle,
}

/// Turn `regions` into contiguous segments covering `text`.
pub fn compose(text: &str, regions: &[Region]) -> Vec<Segment> {
    let map = CharMap::new(text);
    let len = map.char_len();
    let slice = |start: usize, end: usize| text[map.char_to_byte(start)..map.char_to_byte(end)].to_string();

    let mut sorted: Vec<Region> = regions.to_vec();
    sorted.sort_by_key(|r| r.start);

    let mut segments = Vec::with_capacity(sorted.len() * 2 + 1);
    let mut cursor = 0;
    for region in sorted {
        let start = region.start.min(len);
        let end = region.end.clamp(start, len);
        if start < cursor {
            continue;
        }
        if start > cursor {
            segments.push(Segment {
                start: cursor,
                end: start,
                text: slice(cursor, start),
                style: SegmentStyle::Plain,
            });
        }
        segments.push(Segment {
            start,
            end,
            text: slice(start, end),
            style: region.kind.into(),
        });
        cursor = end;
    }
    if cursor < len {
        segments.push(Segment {
            start: cursor,
            end: len,
            text: slice(cursor, len),
            style: SegmentStyle::Plain,
        });
    }
    segments
}

/// Collect and compose in one step.
pub fn compose_view(
    text: &str,
    blocks: &[MessageBlock],
    matches: &[MatchPosition],
    current_match: usize,
) -> Vec<Segment> {
    compose(text, &collect_regions(blocks, matches, current_match))
}
