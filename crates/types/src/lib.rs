//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no required dependencies, making them
//! usable in any context (core logic, terminal rendering, event logging).
//!
//! # Field Dimensions
//!
//! The playfield is tall and narrow:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 40 rows (indexed 0-39, bottom to top)
//! - **Spawn position**: (`width / 2`, `height`), one row above the field
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 200 | Normal interval between simulation ticks |
//! | `FAST_DROP_DIVISOR` | 10 | Fast-drop ticks 10x faster |
//! | `FAST_DROP_REVERT_MULTIPLIER` | 2 | Fast-drop reverts after 2 normal intervals |
//!
//! # Examples
//!
//! ```
//! use tick_tetris_types::{PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! assert_eq!(PieceKind::ALL.len(), 7);
//! assert_eq!(PieceKind::T.offsets()[0], (0, 0));
//!
//! assert_eq!(Rotation::R0.rotated_by(4), Rotation::R0);
//! assert_eq!(Rotation::R1.apply((1, 0)), (0, 1));
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 40);
//! ```

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: u16 = 10;

/// Field height in cells (40 rows)
pub const FIELD_HEIGHT: u16 = 40;

/// Normal tick interval in milliseconds
pub const TICK_MS: u32 = 200;

/// Fast-drop tick interval divisor (10x normal speed)
pub const FAST_DROP_DIVISOR: u32 = 10;

/// Fast-drop auto-revert delay, in normal tick intervals
pub const FAST_DROP_REVERT_MULTIPLIER: u32 = 2;

/// Narrowest field that still fits a horizontal I at the spawn column
pub const MIN_FIELD_WIDTH: u16 = 5;

/// Lowest field with a kill zone above room to play
pub const MIN_FIELD_HEIGHT: u16 = 4;

/// A (column, row) grid coordinate. Row 0 is the bottom of the field.
pub type Cell = (i32, i32);

/// Offset of a single block relative to the piece anchor
pub type BlockOffset = (i32, i32);

/// The seven tetromino piece kinds
///
/// Rotation-0 shapes (rows grow upward):
/// - **I**: horizontal bar, anchor second from the left
/// - **L**, **J**: vertical bar hanging below the anchor with a foot to the side
/// - **O**: 2x2 square, anchor bottom-left
/// - **Z**, **S**: the two squiggles
/// - **T**: vertical bar with a nub to the right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    I,
    L,
    J,
    O,
    Z,
    S,
    T,
}

impl PieceKind {
    /// All kinds, in spawn-table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
    ];

    /// Block offsets relative to the anchor at rotation 0.
    pub const fn offsets(&self) -> [BlockOffset; 4] {
        match self {
            PieceKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
            PieceKind::L => [(1, 0), (0, 0), (0, -1), (0, -2)],
            PieceKind::J => [(-1, 0), (0, 0), (0, -1), (0, -2)],
            PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            PieceKind::Z => [(-1, 0), (0, 0), (0, -1), (1, -1)],
            PieceKind::S => [(-1, -1), (0, -1), (0, 0), (1, 0)],
            PieceKind::T => [(0, 0), (1, 0), (0, -1), (0, 1)],
        }
    }
}

/// Rotation state of a piece, in quarter turns from the spawn orientation.
///
/// The transform is anchor-centered: every offset is turned about the anchor
/// block, not about the piece's geometric center.
///
/// | state | transform |
/// |-------|-----------|
/// | `R0` | (dx, dy) |
/// | `R1` | (-dy, dx) |
/// | `R2` | (-dx, -dy) |
/// | `R3` | (dy, -dx) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    R0,
    R1,
    R2,
    R3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R1, Rotation::R2, Rotation::R3];

    /// Build from any quarter-turn count (taken mod 4).
    pub fn from_quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            0 => Rotation::R0,
            1 => Rotation::R1,
            2 => Rotation::R2,
            _ => Rotation::R3,
        }
    }

    pub fn quarter_turns(&self) -> i32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R1 => 1,
            Rotation::R2 => 2,
            Rotation::R3 => 3,
        }
    }

    /// Add a signed rotation delta (mod 4).
    ///
    /// # Examples
    ///
    /// ```
    /// use tick_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::R0.rotated_by(1), Rotation::R1);
    /// assert_eq!(Rotation::R0.rotated_by(-1), Rotation::R3);
    /// assert_eq!(Rotation::R3.rotated_by(1), Rotation::R0);
    /// ```
    pub fn rotated_by(&self, delta: i32) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + delta)
    }

    /// Apply this rotation to a block offset.
    pub fn apply(&self, (dx, dy): BlockOffset) -> BlockOffset {
        match self {
            Rotation::R0 => (dx, dy),
            Rotation::R1 => (-dy, dx),
            Rotation::R2 => (-dx, -dy),
            Rotation::R3 => (dy, -dx),
        }
    }
}

/// Player commands
///
/// Movement commands are advisory: an invalid move or rotation is dropped
/// silently rather than reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece one quarter turn clockwise
    RotateCw,
    /// Rotate piece one quarter turn counter-clockwise
    RotateCcw,
    /// Temporarily speed up ticks
    FastDrop,
    /// Toggle pause
    Pause,
    /// Start ticking (no-op if already running)
    Start,
    /// Clear the field and score, stop ticking
    Reset,
}

/// Result of one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickOutcome {
    /// A new piece entered above the field.
    Spawned(PieceKind),
    /// The active piece moved down one row without landing.
    Fell,
    /// The active piece merged into the grid.
    Locked { rows_cleared: u32 },
    /// Top-out. Returned by every tick once the game is over.
    GameOver,
}

impl TickOutcome {
    /// False once the tick timer should stop firing.
    pub fn keeps_running(&self) -> bool {
        !matches!(self, TickOutcome::GameOver)
    }
}

/// Outcome of a row-clear pass over the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearResult {
    pub rows_cleared: u32,
    pub top_out: bool,
}

/// Something that happened in a game, in order.
///
/// Drained by the host and written to the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "camelCase")
)]
pub enum GameEvent {
    Spawned {
        kind: PieceKind,
        col: i32,
        row: i32,
    },
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Locked {
        rows_cleared: u32,
        score: u32,
    },
    GameOver {
        score: u32,
    },
    Started,
    Paused,
    Resumed,
    Reset,
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    FastDrop {
        interval_ms: u32,
    },
}

/// Game settings supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub tick_ms: u32,
    pub seed: u32,
}

impl GameConfig {
    /// Tick interval while fast-drop is active (never 0).
    pub fn fast_tick_ms(&self) -> u32 {
        (self.tick_ms / FAST_DROP_DIVISOR).max(1)
    }

    /// Delay before fast-drop reverts to the normal interval.
    pub fn fast_drop_revert_ms(&self) -> u32 {
        self.tick_ms.saturating_mul(FAST_DROP_REVERT_MULTIPLIER)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            tick_ms: TICK_MS,
            seed: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(TICK_MS, 200);
        assert_eq!(TICK_MS / FAST_DROP_DIVISOR, 20);
        assert_eq!(TICK_MS * FAST_DROP_REVERT_MULTIPLIER, 400);
    }

    #[test]
    fn rotation_is_periodic() {
        for r in Rotation::ALL {
            assert_eq!(r.rotated_by(4), r);
            assert_eq!(r.rotated_by(-4), r);
            assert_eq!(r.rotated_by(1).rotated_by(-1), r);
        }
    }

    #[test]
    fn rotation_transform_table() {
        let off = (2, 1);
        assert_eq!(Rotation::R0.apply(off), (2, 1));
        assert_eq!(Rotation::R1.apply(off), (-1, 2));
        assert_eq!(Rotation::R2.apply(off), (-2, -1));
        assert_eq!(Rotation::R3.apply(off), (1, -2));
    }

    #[test]
    fn every_kind_has_four_distinct_offsets() {
        for kind in PieceKind::ALL {
            let offs = kind.offsets();
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(offs[i], offs[j], "{:?}", kind);
                }
            }
        }
    }

    #[test]
    fn tick_outcome_running() {
        assert!(TickOutcome::Spawned(PieceKind::O).keeps_running());
        assert!(TickOutcome::Fell.keeps_running());
        assert!(TickOutcome::Locked { rows_cleared: 2 }.keeps_running());
        assert!(!TickOutcome::GameOver.keeps_running());
    }
}
