//! Game state module - the tick-driven simulation
//!
//! Owns the grid, the optional active piece, the score and the game-over flag.
//! Each [`GameState::tick`] call is one discrete step:
//!
//! - no active piece: spawn one (uniform random kind) above the field
//! - active piece: merge it if anything is directly below, otherwise move it
//!   down and merge it if it reached the floor; then clear full rows and check
//!   for top-out
//! - game over: nothing changes
//!
//! This module knows nothing about time. Interval, pause and fast-drop handling
//! live in [`crate::game`].

use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::types::{Cell, GameConfig, GameEvent, PieceKind, TickOutcome};

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    active: Option<Piece>,
    rng: SimpleRng,
    score: u32,
    game_over: bool,
    /// Events not yet taken by the host.
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with an empty `width` x `height` grid
    pub fn new(width: u16, height: u16, seed: u32) -> Self {
        Self {
            grid: Grid::new(width, height),
            active: None,
            rng: SimpleRng::new(seed),
            score: 0,
            game_over: false,
            events: Vec::new(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.width, config.height, config.seed)
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access, for setting up positions
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Current RNG state (the seed a rematch would continue from)
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    pub(crate) fn record(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn a specific piece at the spawn position, replacing any active one.
    ///
    /// Returns false (and spawns nothing) once the game is over.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        if self.game_over {
            return false;
        }
        let piece = Piece::spawn(kind, self.grid.width(), self.grid.height());
        let (col, row) = piece.anchor();
        self.active = Some(piece);
        self.events.push(GameEvent::Spawned { kind, col, row });
        true
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.game_over {
            return TickOutcome::GameOver;
        }

        let Some(mut piece) = self.active else {
            let kind = self.rng.next_kind();
            self.spawn(kind);
            return TickOutcome::Spawned(kind);
        };

        // Look below the current cells: anything blocking means the piece
        // lands where it is. Row 0 rests on the floor.
        let cells = piece.occupied_cells();
        let blocked = cells
            .iter()
            .any(|&(col, row)| row <= 0 || self.grid.is_occupied(col, row - 1));

        let locked = if blocked {
            self.merge(&cells);
            true
        } else {
            piece.move_down();
            let moved = piece.occupied_cells();
            if moved.iter().any(|&(_, row)| row == 0) {
                self.merge(&moved);
                true
            } else {
                self.active = Some(piece);
                false
            }
        };

        let clear = self.grid.clear_full_rows_and_check_top_out();
        if clear.top_out {
            self.game_over = true;
            self.events.push(GameEvent::GameOver { score: self.score });
            return TickOutcome::GameOver;
        }

        self.score += clear.rows_cleared;

        if locked {
            self.events.push(GameEvent::Locked {
                rows_cleared: clear.rows_cleared,
                score: self.score,
            });
            TickOutcome::Locked {
                rows_cleared: clear.rows_cleared,
            }
        } else {
            TickOutcome::Fell
        }
    }

    fn merge(&mut self, cells: &[Cell]) {
        self.grid.set_occupied(cells);
        self.active = None;
    }

    /// Move the active piece one column left (no-op when rejected)
    pub fn move_left(&mut self) -> bool {
        self.with_active(|piece, grid| piece.move_left(grid))
    }

    /// Move the active piece one column right (no-op when rejected)
    pub fn move_right(&mut self) -> bool {
        self.with_active(|piece, grid| piece.move_right(grid))
    }

    /// Rotate the active piece clockwise (no-op when rejected)
    pub fn rotate_clockwise(&mut self) -> bool {
        self.with_active(|piece, grid| piece.rotate_clockwise(grid))
    }

    /// Rotate the active piece counter-clockwise (no-op when rejected)
    pub fn rotate_counterclockwise(&mut self) -> bool {
        self.with_active(|piece, grid| piece.rotate_counterclockwise(grid))
    }

    fn with_active(&mut self, f: impl FnOnce(&mut Piece, &Grid) -> bool) -> bool {
        if self.game_over {
            return false;
        }
        match self.active.as_mut() {
            Some(piece) => f(piece, &self.grid),
            None => false,
        }
    }

    /// Settled cells, for rendering
    pub fn occupied_cells_of_settled_grid(&self) -> Vec<Cell> {
        self.grid.occupied_cells()
    }

    /// Cells of the active piece (empty if none), for rendering
    pub fn occupied_cells_of_active_piece(&self) -> Vec<Cell> {
        self.active
            .map(|piece| piece.occupied_cells().to_vec())
            .unwrap_or_default()
    }

    /// Score so far: one point per cleared row
    pub fn current_score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
