//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules and the simulation of the falling-block game.
//! It has **zero dependencies** on terminal, clock, or I/O:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Time comes from an injected [`Scheduler`]; tests use
//!   [`ManualScheduler`] and step milliseconds by hand
//! - **Portable**: The host only needs "fire this timer kind later" and
//!   "list the occupied cells"
//!
//! # Module Structure
//!
//! - [`grid`]: settled-block bitmap with row clearing and top-out detection
//! - [`piece`]: tetromino geometry, rotation and collision checks
//! - [`game_state`]: the tick state machine (spawn, fall, merge, clear, score)
//! - [`game`]: timer-driven controller (start, pause, reset, fast-drop)
//! - [`scheduler`]: timer capability trait and a virtual-clock implementation
//! - [`rng`]: seeded uniform piece selection
//! - [`snapshot`]: render-facing copy of a game
//!
//! # Game Rules
//!
//! - Pieces spawn one row above the field, horizontally centered
//! - A piece falls one row per tick and merges as soon as anything is below it
//! - Each cleared row scores one point
//! - The game ends when a settled block sits in the second row from the top
//!   after rows are cleared
//! - No hold, no kicks, no hard drop
//!
//! # Example
//!
//! ```
//! use tick_tetris_core::{Game, ManualScheduler};
//! use tick_tetris_types::{GameAction, GameConfig, TickOutcome};
//!
//! let mut sched = ManualScheduler::new();
//! let mut game = Game::new(GameConfig::default());
//! game.start_game(&mut sched);
//!
//! // Fire timers up to 200ms: the first tick spawns a piece.
//! while let Some(kind) = sched.pop_due(200) {
//!     let outcome = game.on_timer(kind, &mut sched);
//!     assert!(matches!(outcome, Some(TickOutcome::Spawned(_))));
//! }
//!
//! game.apply_action(GameAction::MoveLeft, &mut sched);
//! assert_eq!(game.current_score(), 0);
//! assert_eq!(game.occupied_cells_of_active_piece().len(), 4);
//! ```

pub mod game;
pub mod game_state;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scheduler;
pub mod snapshot;

pub use tick_tetris_types as types;

// Re-export commonly used types for convenience
pub use game::Game;
pub use game_state::GameState;
pub use grid::Grid;
pub use piece::Piece;
pub use rng::SimpleRng;
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TimerInfo, TimerKind};
pub use snapshot::GameSnapshot;
