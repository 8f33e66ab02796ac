//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and provides a
//! held-key repeat handler for the catcher, suitable for terminals that never
//! report key releases.

pub mod handler;
pub mod map;

pub use neural_juggler_types as types;

pub use handler::{HorizontalDirection, InputHandler};
pub use map::{handle_key_event, should_quit};
