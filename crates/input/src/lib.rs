//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::ControlAction`]s. The
//! viewer only needs discrete presses: no repeat handling, no key-release state.

pub mod map;

pub use fieldview_types as types;

pub use map::{handle_key_event, should_quit};
