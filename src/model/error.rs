//! Error types for tracelens.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping host failures
//!   - [`InputError`] - Transcript file/stdin reading failures
//!   - `ConfigError` - Config file read/parse failures (see `config::loader`)
//!   - `std::io::Error` - Terminal/TUI rendering failures
//! - [`PatternError`] - A single header pattern failed to compile
//!
//! # Error Recovery Strategy
//!
//! Nothing in the annotation engine is fatal. Pattern compile errors are scoped to
//! their pattern and reported next to it; segmentation continues with the remaining
//! patterns. A failure of the combined header expression degrades to zero blocks.
//! Search regex errors are stored in the search state and shown inline. In every case
//! the viewer still shows the transcript as plain text.
//!
//! Only host errors (missing input, unreadable config, broken terminal) propagate to
//! `main`.

use crate::config::ConfigError;
use crate::model::pattern::PatternId;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// # Recovery Behavior
///
/// All variants are fatal: `main` reports them on stderr and exits non-zero.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the transcript from file or stdin.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Config file exists but could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Terminal or TUI rendering error.
    ///
    /// **Recovery**: Attempt graceful terminal cleanup, then exit.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading a transcript from files or stdin.
///
/// # Recovery Patterns
///
/// - **FileNotFound**: Display error and exit (user provided invalid path)
/// - **NoInput**: Display usage - user must provide a file path or pipe stdin
/// - **Io**: Generic I/O failures (permissions, broken pipe) - display and exit
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified transcript file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use tracelens::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.txt")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.txt"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No input source was provided - user must supply a file path or pipe stdin.
    ///
    /// Occurs when the application is invoked without a file argument and stdin is
    /// an interactive terminal.
    ///
    /// # Examples
    ///
    /// ```
    /// use tracelens::model::error::InputError;
    ///
    /// let err = InputError::NoInput;
    /// assert!(err.to_string().contains("file path or pipe data to stdin"));
    /// ```
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O error reading from the input source (permissions, broken pipe).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A header pattern that could not be compiled.
///
/// Scoped to a single pattern: the segmenter omits the pattern from the combined
/// expression and keeps annotating with the others. The message is shown next to the
/// pattern so the user gets inline feedback while editing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The pattern's regex text does not compile.
    #[error("Pattern '{pattern_id}' is not a valid regular expression: {message}")]
    InvalidRegex {
        /// Id of the offending pattern.
        pattern_id: PatternId,
        /// Compiler diagnostic from the `regex` crate.
        message: String,
    },
}

impl PatternError {
    /// Id of the pattern this error belongs to.
    pub fn pattern_id(&self) -> &PatternId {
        match self {
            PatternError::InvalidRegex { pattern_id, .. } => pattern_id,
        }
    }
}
