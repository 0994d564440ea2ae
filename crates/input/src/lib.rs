//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The game
//! reacts to presses only: the map ignores release events, so terminals with
//! and without release reporting behave the same.

pub mod map;

pub use tick_tetris_types as types;

pub use map::{handle_key_event, should_quit};
