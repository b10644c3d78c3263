//! Configuration module.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_log_path, default_patterns,
    load_config_with_precedence, merge_config, parse_pattern_arg, CliOverrides, ConfigError,
    ConfigFile, PatternEntry, ResolvedConfig,
};
