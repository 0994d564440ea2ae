//! Tick Tetris (workspace facade crate).
//!
//! Re-exports the member crates under `tick_tetris::{core,input,term,types}`
//! and holds the pieces that only the binary needs, such as the event log.

pub use tick_tetris_core as core;
pub use tick_tetris_input as input;
pub use tick_tetris_term as term;
pub use tick_tetris_types as types;

pub mod event_log;

pub use event_log::EventLog;
