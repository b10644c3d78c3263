//! tracelens - trace annotation engine and terminal viewer
//!
//! Segments agent transcripts into message blocks by user-defined header
//! patterns, searches the displayed text, and composes both into styled
//! segments for a terminal viewer.
//!
//! The engine (`segmenter`, `state`, `view_state`) is pure; `view` and
//! `source` are the impure shell around it.

pub mod config;
pub mod logging;
pub mod model;
pub mod report;
pub mod segmenter;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
