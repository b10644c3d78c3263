//! Header pattern definitions.
//!
//! A pattern set is an ordered list of named, colored regex definitions used
//! to locate message headers inside a transcript. Order is significant: the
//! segmenter resolves ties in favor of the earlier pattern.

use serde::{Deserialize, Serialize};
use std::fmt;

// ===== PatternId =====

/// Stable identifier of a pattern within a pattern set.
/// NEVER export the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PatternId(String);

impl PatternId {
    /// Smart constructor: validates non-empty, non-blank id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidPatternId> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            Err(InvalidPatternId::Empty)
        } else {
            Ok(Self(raw))
        }
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons a pattern id is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPatternId {
    /// The id is empty or whitespace only.
    #[error("Pattern ID cannot be empty")]
    Empty,
}

// ===== ColorId =====

/// Palette tag attached to a pattern.
///
/// The engine only carries the tag; mapping it to a terminal color is the
/// renderer's job (see `view::styles`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorId {
    /// Blue.
    Blue,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Red.
    Red,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// Orange.
    Orange,
    /// Gray.
    Gray,
}

impl ColorId {
    /// All palette entries in assignment order.
    pub const PALETTE: [ColorId; 8] = [
        ColorId::Blue,
        ColorId::Green,
        ColorId::Yellow,
        ColorId::Red,
        ColorId::Magenta,
        ColorId::Cyan,
        ColorId::Orange,
        ColorId::Gray,
    ];

    /// Palette entry for the n-th pattern, cycling when the set is larger
    /// than the palette.
    pub fn nth(n: usize) -> Self {
        Self::PALETTE[n % Self::PALETTE.len()]
    }

    /// Lowercase name, as written in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorId::Blue => "blue",
            ColorId::Green => "green",
            ColorId::Yellow => "yellow",
            ColorId::Red => "red",
            ColorId::Magenta => "magenta",
            ColorId::Cyan => "cyan",
            ColorId::Orange => "orange",
            ColorId::Gray => "gray",
        }
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Pattern =====

/// A named, colored header pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern {
    /// Stable identifier, unique within the set.
    pub id: PatternId,
    /// Human label shown in jump targets.
    pub name: String,
    /// Header regex. Empty text disables the pattern.
    pub regex: String,
    /// Header highlight color.
    pub color: ColorId,
    /// Disabled patterns take no part in segmentation.
    pub enabled: bool,
}

impl Pattern {
    /// Create an enabled pattern.
    pub fn new(
        id: PatternId,
        name: impl Into<String>,
        regex: impl Into<String>,
        color: ColorId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            regex: regex.into(),
            color,
            enabled: true,
        }
    }

    /// Builder-style toggle of the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether this pattern takes part in segmentation.
    ///
    /// Disabled patterns and patterns with empty regex text never receive a
    /// capture group in the combined expression.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.regex.is_empty()
    }
}
