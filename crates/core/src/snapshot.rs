//! Render-facing copy of a game, built pull-style from the controller queries.

use crate::types::{Cell, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Settled cells, bottom row first
    pub settled: Vec<Cell>,
    /// Active piece cells (empty if none)
    pub active: Vec<Cell>,
    pub active_kind: Option<PieceKind>,
    pub score: u32,
    pub game_over: bool,
    pub paused: bool,
    pub running: bool,
}

impl GameSnapshot {
    /// True when commands currently reach the piece
    pub fn playable(&self) -> bool {
        self.running && !self.game_over
    }
}
