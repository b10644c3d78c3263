//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod block;
pub mod error;
pub mod key_action;
pub mod pattern;
pub mod text;

// Re-export for convenience
pub use block::MessageBlock;
pub use error::{AppError, InputError, PatternError};
pub use key_action::KeyAction;
pub use pattern::{ColorId, InvalidPatternId, Pattern, PatternId};
pub use text::{char_len, char_slice, CharMap};
