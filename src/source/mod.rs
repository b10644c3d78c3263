//! Transcript input sources.
//!
//! A transcript is read once, in full, from a file or from piped stdin.
//! Invalid UTF-8 is replaced rather than rejected so any captured trace can
//! be viewed.

use crate::model::error::InputError;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::info;

/// Where the transcript comes from.
///
/// Sum type enforces exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Read from a file path.
    File(PathBuf),
    /// Read from piped stdin until EOF.
    Stdin,
}

impl InputSource {
    /// Read the whole transcript.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` for a missing file, `InputError::Io`
    /// for other read failures.
    pub fn read_to_string(&self) -> Result<String, InputError> {
        let text = match self {
            InputSource::File(path) => {
                let bytes = std::fs::read(path).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => InputError::FileNotFound { path: path.clone() },
                    _ => InputError::Io(e),
                })?;
                decode(bytes)
            }
            InputSource::Stdin => read_all(std::io::stdin().lock())?,
        };
        info!(source = ?self, chars = text.chars().count(), "Loaded transcript");
        Ok(text)
    }
}

/// Detect the input source.
///
/// # Logic:
/// 1. If file path is provided: read that file
/// 2. If stdin is piped: read stdin
/// 3. Else: return InputError::NoInput
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a terminal.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(path)),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}

/// Detect the source and read the transcript in one go.
pub fn read_transcript(file: Option<PathBuf>) -> Result<String, InputError> {
    detect_input_source(file)?.read_to_string()
}

/// Read a reader to EOF, replacing invalid UTF-8.
fn read_all(mut reader: impl Read) -> Result<String, InputError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(decode(bytes))
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
