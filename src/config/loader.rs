//! Configuration file loading with precedence handling.

use crate::model::{ColorId, Pattern, PatternId};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "TRACELENS_CONFIG";
/// Env var overriding default search case sensitivity.
pub const CASE_SENSITIVE_ENV: &str = "TRACELENS_CASE_SENSITIVE";
/// Env var overriding default regex search mode.
pub const REGEX_SEARCH_ENV: &str = "TRACELENS_REGEX_SEARCH";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A pattern entry has a blank id.
    #[error("Pattern #{index} has an empty id")]
    EmptyPatternId {
        /// 1-based position in the pattern list.
        index: usize,
    },

    /// Two pattern entries share an id.
    #[error("Duplicate pattern id: {0}")]
    DuplicatePatternId(String),

    /// A `--pattern` argument is not of the form `NAME=REGEX`.
    #[error("Invalid pattern argument '{0}': expected NAME=REGEX")]
    InvalidPatternArg(String),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/tracelens/config.toml`.
///
/// ```toml
/// case_sensitive = false
/// top_padding = 2
///
/// [[patterns]]
/// name = "AI Message"
/// pattern = "--- AI Message ---"
/// color = "blue"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Default search case sensitivity.
    #[serde(default)]
    pub case_sensitive: Option<bool>,

    /// Default search mode (regex vs plain text).
    #[serde(default)]
    pub regex_search: Option<bool>,

    /// Rows kept above a jumped-to header.
    #[serde(default)]
    pub top_padding: Option<usize>,

    /// How long a jumped-to header stays highlighted.
    #[serde(default)]
    pub pulse_duration_ms: Option<u64>,

    /// Line wrapping enabled.
    #[serde(default)]
    pub line_wrap: Option<bool>,

    /// Header annotation enabled on startup.
    #[serde(default)]
    pub annotations_enabled: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Header patterns, in priority order. Replaces the defaults when present.
    #[serde(default)]
    pub patterns: Option<Vec<PatternEntry>>,
}

/// One `[[patterns]]` entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PatternEntry {
    /// Stable id. Defaults to `pattern-N` (1-based position).
    #[serde(default)]
    pub id: Option<String>,

    /// Display name.
    pub name: String,

    /// Header regex.
    pub pattern: String,

    /// Highlight color. Defaults to the palette entry for the position.
    #[serde(default)]
    pub color: Option<ColorId>,

    /// Whether the pattern starts enabled. Defaults to true.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Default search case sensitivity.
    pub case_sensitive: bool,
    /// Default search mode.
    pub regex_search: bool,
    /// Rows kept above a jumped-to header.
    pub top_padding: usize,
    /// Header highlight pulse length.
    pub pulse_duration: Duration,
    /// Line wrapping.
    pub line_wrap: bool,
    /// Header annotation on startup.
    pub annotations_enabled: bool,
    /// Header patterns, in priority order.
    pub patterns: Vec<Pattern>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            regex_search: false,
            top_padding: 1,
            pulse_duration: Duration::from_millis(2000),
            line_wrap: true,
            annotations_enabled: true,
            patterns: default_patterns(),
            log_file_path: default_log_path(),
        }
    }
}

/// Built-in header patterns for chat-style agent transcripts.
pub fn default_patterns() -> Vec<Pattern> {
    let builtin = [
        ("human", "Human Message", "--- Human Message ---", ColorId::Green),
        ("ai", "AI Message", "--- AI Message ---", ColorId::Blue),
        (
            "tool",
            "Tool Message",
            r"--- Tool Message(?: \(call_id: [^)\n]*\))? ---",
            ColorId::Yellow,
        ),
        ("system", "System Message", "--- System Message ---", ColorId::Gray),
    ];
    builtin
        .into_iter()
        .filter_map(|(id, name, regex, color)| {
            PatternId::new(id)
                .ok()
                .map(|id| Pattern::new(id, name, regex, color))
        })
        .collect()
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/tracelens/tracelens.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("tracelens").join("tracelens.log"),
        None => PathBuf::from("tracelens.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/tracelens/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tracelens").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TRACELENS_CONFIG` environment variable
/// 3. Default path `~/.config/tracelens/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Convert `[[patterns]]` entries into patterns, filling in ids and colors.
///
/// # Errors
///
/// Returns an error for blank or duplicate ids.
pub fn patterns_from_entries(entries: Vec<PatternEntry>) -> Result<Vec<Pattern>, ConfigError> {
    let mut seen = HashSet::new();
    let mut patterns = Vec::with_capacity(entries.len());

    for (i, entry) in entries.into_iter().enumerate() {
        let raw_id = entry.id.unwrap_or_else(|| format!("pattern-{}", i + 1));
        let id = PatternId::new(raw_id).map_err(|_| ConfigError::EmptyPatternId { index: i + 1 })?;
        if !seen.insert(id.clone()) {
            return Err(ConfigError::DuplicatePatternId(id.to_string()));
        }
        let color = entry.color.unwrap_or_else(|| ColorId::nth(i));
        patterns.push(
            Pattern::new(id, entry.name, entry.pattern, color)
                .with_enabled(entry.enabled.unwrap_or(true)),
        );
    }

    Ok(patterns)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
///
/// # Errors
///
/// Returns an error if the pattern list has blank or duplicate ids.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let patterns = match config.patterns {
        Some(entries) => patterns_from_entries(entries)?,
        None => defaults.patterns,
    };

    Ok(ResolvedConfig {
        case_sensitive: config.case_sensitive.unwrap_or(defaults.case_sensitive),
        regex_search: config.regex_search.unwrap_or(defaults.regex_search),
        top_padding: config.top_padding.unwrap_or(defaults.top_padding),
        pulse_duration: config
            .pulse_duration_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.pulse_duration),
        line_wrap: config.line_wrap.unwrap_or(defaults.line_wrap),
        annotations_enabled: config
            .annotations_enabled
            .unwrap_or(defaults.annotations_enabled),
        patterns,
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Parse a boolean env value: `1/true/yes/on` or `0/false/no/off`.
fn parse_env_bool(name: &str) -> Option<bool> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!(var = name, value = %raw, "Ignoring unrecognized boolean env value");
            None
        }
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TRACELENS_CASE_SENSITIVE`: Override default case sensitivity
/// - `TRACELENS_REGEX_SEARCH`: Override default search mode
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(case_sensitive) = parse_env_bool(CASE_SENSITIVE_ENV) {
        config.case_sensitive = case_sensitive;
    }
    if let Some(regex_search) = parse_env_bool(REGEX_SEARCH_ENV) {
        config.regex_search = regex_search;
    }
    config
}

/// Flags explicitly set on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--case-sensitive`
    pub case_sensitive: bool,
    /// `--regex`
    pub regex_search: bool,
    /// `--no-wrap`
    pub no_wrap: bool,
    /// `--pattern NAME=REGEX`, appended after the configured patterns.
    pub patterns: Vec<(String, String)>,
}

/// Split a `NAME=REGEX` argument at the first `=`.
///
/// # Errors
///
/// Returns an error if there is no `=` or the name is blank.
pub fn parse_pattern_arg(arg: &str) -> Result<(String, String), ConfigError> {
    match arg.split_once('=') {
        Some((name, regex)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), regex.to_string()))
        }
        _ => Err(ConfigError::InvalidPatternArg(arg.to_string())),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Boolean flags only ever turn their setting on (or wrap off). Extra patterns
/// get ids `cli-N` and the next palette colors.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Errors
///
/// Returns an error if an extra pattern's id collides with a configured one.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    overrides: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    if overrides.case_sensitive {
        config.case_sensitive = true;
    }
    if overrides.regex_search {
        config.regex_search = true;
    }
    if overrides.no_wrap {
        config.line_wrap = false;
    }

    for (i, (name, regex)) in overrides.patterns.into_iter().enumerate() {
        let raw_id = format!("cli-{}", i + 1);
        if config.patterns.iter().any(|p| p.id.as_str() == raw_id) {
            return Err(ConfigError::DuplicatePatternId(raw_id));
        }
        let id = PatternId::new(raw_id).map_err(|_| ConfigError::EmptyPatternId { index: i + 1 })?;
        let color = ColorId::nth(config.patterns.len());
        config.patterns.push(Pattern::new(id, name, regex, color));
    }

    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
