//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders into a plain framebuffer that is then flushed to a terminal
//! backend, instead of going through a widget toolkit.
//!
//! - [`game_view`] is pure: snapshot in, framebuffer out
//! - [`renderer`] owns the terminal and sends only what changed

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tick_tetris_core as core;
pub use tick_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{FieldLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
