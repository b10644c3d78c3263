//! tracelens - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracelens::config::{CliOverrides, ResolvedConfig};
use tracelens::model::PatternId;
use tracelens::state::{search_input_handler, AppState, Navigator};
use tracing::{info, warn};

/// tracelens - annotate and search agent transcripts in the terminal
#[derive(Parser, Debug)]
#[command(name = "tracelens")]
#[command(version)]
#[command(about = "Annotate message headers in agent transcripts and search them in a TUI")]
pub struct Args {
    /// Path to transcript file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Start with this search query active
    #[arg(short, long)]
    pub search: Option<String>,

    /// Case-sensitive search by default
    #[arg(short = 'c', long)]
    pub case_sensitive: bool,

    /// Treat search queries as regular expressions
    #[arg(short = 'r', long)]
    pub regex: bool,

    /// Disable line wrapping
    #[arg(long)]
    pub no_wrap: bool,

    /// Extra header pattern, appended after configured ones (repeatable)
    #[arg(short, long = "pattern", value_name = "NAME=REGEX", value_parser = tracelens::config::parse_pattern_arg)]
    pub patterns: Vec<(String, String)>,

    /// Start showing only the final message of this pattern id
    #[arg(long, value_name = "ID")]
    pub final_only: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Print the annotated view as JSON instead of starting the TUI
    #[arg(long)]
    pub dump: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            case_sensitive: self.case_sensitive,
            regex_search: self.regex,
            no_wrap: self.no_wrap,
            patterns: self.patterns.clone(),
        }
    }
}

/// Build the initial application state from resolved config and CLI args.
fn build_state(text: String, config: &ResolvedConfig, args: &Args) -> AppState {
    let mut state = AppState::new(text, config.patterns.clone())
        .with_search_flags(config.case_sensitive, config.regex_search)
        .with_navigator(Navigator::new(config.top_padding, config.pulse_duration));
    state.wrap = config.line_wrap;
    state.set_annotations_enabled(config.annotations_enabled);

    for error in state.pattern_errors() {
        warn!(error = %error, "Header pattern disabled");
    }

    if let Some(raw) = &args.final_only {
        let accepted = PatternId::new(raw.as_str())
            .map(|id| state.toggle_final_only(&id))
            .unwrap_or(false);
        if !accepted {
            warn!(pattern_id = %raw, "--final-only pattern has no blocks, showing all messages");
        }
    }

    if let Some(query) = &args.search {
        state.edit_search(|search| {
            query
                .chars()
                .fold(search_input_handler::clear_query(search), search_input_handler::handle_char_input)
        });
    }

    state
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = tracelens::config::load_config_with_precedence(args.config.clone())?;
        let merged = tracelens::config::merge_config(config_file)?;
        let with_env = tracelens::config::apply_env_overrides(merged);
        tracelens::config::apply_cli_overrides(with_env, args.cli_overrides())?
    };

    tracelens::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let text = tracelens::source::read_transcript(args.file.clone())?;
    let state = build_state(text, &config, &args);

    if args.dump {
        let report = tracelens::report::Report::from_state(&state);
        println!("{}", report.to_json()?);
        return Ok(());
    }

    let colors = tracelens::view::ColorConfig::from_env_and_args(args.no_color);
    tracelens::view::run(state, colors)?;

    Ok(())
}
