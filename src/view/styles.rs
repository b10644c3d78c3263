//! Segment styling.
//!
//! Maps composed segment styles (headers, search matches) to ratatui styles,
//! honoring `NO_COLOR`.

use crate::model::ColorId;
use crate::view_state::SegmentStyle;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Explicit setting, bypassing the environment.
    pub fn with_colors(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== SegmentStyles =====

/// Terminal color for a palette entry.
pub fn terminal_color(color: ColorId) -> Color {
    match color {
        ColorId::Blue => Color::LightBlue,
        ColorId::Green => Color::LightGreen,
        ColorId::Yellow => Color::Yellow,
        ColorId::Red => Color::LightRed,
        ColorId::Magenta => Color::LightMagenta,
        ColorId::Cyan => Color::Cyan,
        ColorId::Orange => Color::Indexed(208),
        ColorId::Gray => Color::Gray,
    }
}

/// Styles for every kind of composed segment.
///
/// Match styles are fixed; header styles come from the pattern's color. Without
/// colors, modifiers alone distinguish the kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentStyles {
    colors: bool,
    match_style: Style,
    current_match_style: Style,
}

impl SegmentStyles {
    /// Styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                colors: true,
                match_style: Style::default().fg(Color::Black).bg(Color::Yellow),
                current_match_style: Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                colors: false,
                match_style: Style::default().add_modifier(Modifier::UNDERLINED),
                current_match_style: Style::default()
                    .add_modifier(Modifier::REVERSED | Modifier::BOLD),
            }
        }
    }

    /// Whether colors are in use.
    pub fn colors_enabled(&self) -> bool {
        self.colors
    }

    /// Header style for a pattern color.
    pub fn header(&self, color: ColorId) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        if self.colors {
            style.fg(terminal_color(color))
        } else {
            style
        }
    }

    /// Style for a segment. `pulsing` is the block whose header was just jumped to.
    pub fn style_for(&self, style: SegmentStyle, pulsing: Option<usize>) -> Style {
        match style {
            SegmentStyle::Plain => Style::default(),
            SegmentStyle::Match => self.match_style,
            SegmentStyle::CurrentMatch => self.current_match_style,
            SegmentStyle::Header { color, block_index } => {
                let header = self.header(color);
                if pulsing == Some(block_index) {
                    header.add_modifier(Modifier::REVERSED)
                } else {
                    header
                }
            }
        }
    }

    /// Style for inline error text.
    pub fn error(&self) -> Style {
        if self.colors {
            Style::default().fg(Color::LightRed)
        } else {
            Style::default().add_modifier(Modifier::ITALIC)
        }
    }

    /// Style for secondary text (hints, inactive flags).
    pub fn dim(&self) -> Style {
        if self.colors {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        }
    }
}

impl Default for SegmentStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // ===== ColorConfig Tests =====

    #[test]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(!config.colors_enabled(), "--no-color flag should disable colors");
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");

        assert!(!config.colors_enabled(), "NO_COLOR env var should disable colors");
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_no_color_env_any_value_disables() {
        std::env::set_var("NO_COLOR", "");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");

        assert!(!config.colors_enabled(), "NO_COLOR with empty string should disable colors");
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        assert!(ColorConfig::from_env_and_args(false).colors_enabled());
    }

    // ===== SegmentStyles Tests =====

    #[test]
    fn header_uses_pattern_color() {
        let styles = SegmentStyles::with_color_config(ColorConfig::with_colors(true));

        assert_eq!(styles.header(ColorId::Blue).fg, Some(Color::LightBlue));
        assert_eq!(styles.header(ColorId::Orange).fg, Some(Color::Indexed(208)));
    }

    #[test]
    fn every_palette_color_maps_to_distinct_terminal_color() {
        let colors: std::collections::HashSet<Color> =
            ColorId::PALETTE.iter().map(|c| terminal_color(*c)).collect();
        assert_eq!(colors.len(), ColorId::PALETTE.len());
    }

    #[test]
    fn no_color_styles_have_no_fg_or_bg() {
        let styles = SegmentStyles::with_color_config(ColorConfig::with_colors(false));

        for kind in [
            SegmentStyle::Plain,
            SegmentStyle::Match,
            SegmentStyle::CurrentMatch,
            SegmentStyle::Header {
                color: ColorId::Red,
                block_index: 0,
            },
        ] {
            let style = styles.style_for(kind, None);
            assert_eq!(style.fg, None, "{:?} should have no fg", kind);
            assert_eq!(style.bg, None, "{:?} should have no bg", kind);
        }
    }

    #[test]
    fn match_and_current_match_differ() {
        let styles = SegmentStyles::with_color_config(ColorConfig::with_colors(true));
        assert_ne!(
            styles.style_for(SegmentStyle::Match, None),
            styles.style_for(SegmentStyle::CurrentMatch, None)
        );
    }

    #[test]
    fn pulsing_header_is_reversed_only_for_its_block() {
        let styles = SegmentStyles::with_color_config(ColorConfig::with_colors(true));
        let header = |block_index| SegmentStyle::Header {
            color: ColorId::Green,
            block_index,
        };

        let pulsing = styles.style_for(header(1), Some(1));
        let other = styles.style_for(header(0), Some(1));

        assert!(pulsing.add_modifier.contains(Modifier::REVERSED));
        assert!(!other.add_modifier.contains(Modifier::REVERSED));
    }
}
