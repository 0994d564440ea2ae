//! Game module - timer-driven controller around [`GameState`]
//!
//! The controller turns the pure simulation into a running game. It owns the
//! handles of its two timers and talks to an injected [`Scheduler`]:
//!
//! - the recurring **tick** timer, present while the game is running
//! - the one-shot **fast-drop revert** timer, present while fast-drop is armed
//!
//! # Fast-drop
//!
//! The first [`Game::request_fast_drop`] swaps the tick interval to
//! `tick_ms / 10` and arms a revert after `2 * tick_ms`. Further requests while
//! armed only push the revert deadline out. The revert, or the next spawn,
//! restores the normal interval through [`Game::cancel_fast_drop`].
//!
//! # Pause
//!
//! Pausing cancels the tick timer *and* any pending revert, so a paused game
//! never wakes up on its own. Resuming always starts at the normal interval.

use crate::game_state::GameState;
use crate::scheduler::{Scheduler, TimerHandle, TimerKind};
use crate::snapshot::GameSnapshot;
use crate::types::{Cell, GameAction, GameConfig, GameEvent, TickOutcome};

/// A running (or stopped) game session
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    tick_timer: Option<TimerHandle>,
    revert_timer: Option<TimerHandle>,
    paused: bool,
}

impl Game {
    /// Create a stopped game; nothing ticks until [`Game::start_game`].
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            state: GameState::from_config(&config),
            tick_timer: None,
            revert_timer: None,
            paused: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable simulation access, for setting up positions
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// True while the tick timer is scheduled
    pub fn is_running(&self) -> bool {
        self.tick_timer.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_fast_drop(&self) -> bool {
        self.revert_timer.is_some()
    }

    /// Interval the tick timer currently runs at, `None` when stopped
    pub fn tick_interval_ms(&self) -> Option<u32> {
        if !self.is_running() {
            return None;
        }
        if self.is_fast_drop() {
            Some(self.config.fast_tick_ms())
        } else {
            Some(self.config.tick_ms)
        }
    }

    /// Start ticking at the normal interval.
    ///
    /// No-op when already running or once the game is over.
    pub fn start_game(&mut self, sched: &mut impl Scheduler) -> bool {
        if self.is_running() || self.state.is_game_over() {
            return false;
        }
        self.tick_timer = Some(sched.schedule_repeating(self.config.tick_ms, TimerKind::Tick));
        let event = if self.paused {
            GameEvent::Resumed
        } else {
            GameEvent::Started
        };
        self.paused = false;
        self.state.record(event);
        true
    }

    /// Pause a running game or resume a stopped one.
    pub fn toggle_pause(&mut self, sched: &mut impl Scheduler) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        if self.is_running() {
            self.stop_timers(sched);
            self.paused = true;
            self.state.record(GameEvent::Paused);
            true
        } else {
            self.start_game(sched)
        }
    }

    /// Stop every timer and start over with an empty field and zero score.
    ///
    /// The new game is stopped; call [`Game::start_game`] to play. The random
    /// sequence continues from where the previous game left it.
    pub fn reset_game(&mut self, sched: &mut impl Scheduler) {
        self.stop_timers(sched);
        let seed = self.state.rng_state();
        self.state = GameState::new(self.config.width, self.config.height, seed);
        self.paused = false;
        self.state.record(GameEvent::Reset);
    }

    /// Speed up ticks for a short while (see the module docs).
    ///
    /// Only acts while running.
    pub fn request_fast_drop(&mut self, sched: &mut impl Scheduler) -> bool {
        let Some(tick) = self.tick_timer else {
            return false;
        };

        match self.revert_timer.take() {
            Some(revert) => sched.cancel(revert),
            None => {
                sched.cancel(tick);
                let interval = self.config.fast_tick_ms();
                self.tick_timer = Some(sched.schedule_repeating(interval, TimerKind::Tick));
                self.state.record(GameEvent::FastDrop {
                    interval_ms: interval,
                });
            }
        }

        self.revert_timer = Some(
            sched.schedule_once(self.config.fast_drop_revert_ms(), TimerKind::EndFastDrop),
        );
        true
    }

    /// Drop any pending revert and return to the normal interval now.
    ///
    /// Idempotent: without an armed fast-drop nothing changes.
    pub fn cancel_fast_drop(&mut self, sched: &mut impl Scheduler) {
        let Some(revert) = self.revert_timer.take() else {
            return;
        };
        sched.cancel(revert);

        if let Some(tick) = self.tick_timer.take() {
            sched.cancel(tick);
            self.tick_timer = Some(sched.schedule_repeating(self.config.tick_ms, TimerKind::Tick));
        }
    }

    /// Handle a fired timer.
    ///
    /// Returns the tick outcome for [`TimerKind::Tick`].
    pub fn on_timer(&mut self, kind: TimerKind, sched: &mut impl Scheduler) -> Option<TickOutcome> {
        match kind {
            TimerKind::Tick => {
                let outcome = self.state.tick();
                if matches!(outcome, TickOutcome::Spawned(_)) {
                    self.cancel_fast_drop(sched);
                }
                if !outcome.keeps_running() {
                    self.stop_timers(sched);
                }
                Some(outcome)
            }
            TimerKind::EndFastDrop => {
                self.cancel_fast_drop(sched);
                None
            }
        }
    }

    fn stop_timers(&mut self, sched: &mut impl Scheduler) {
        if let Some(tick) = self.tick_timer.take() {
            sched.cancel(tick);
        }
        if let Some(revert) = self.revert_timer.take() {
            sched.cancel(revert);
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.is_running() && self.state.move_left()
    }

    pub fn move_right(&mut self) -> bool {
        self.is_running() && self.state.move_right()
    }

    pub fn rotate_clockwise(&mut self) -> bool {
        self.is_running() && self.state.rotate_clockwise()
    }

    pub fn rotate_counterclockwise(&mut self) -> bool {
        self.is_running() && self.state.rotate_counterclockwise()
    }

    /// Apply a player command
    pub fn apply_action(&mut self, action: GameAction, sched: &mut impl Scheduler) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::RotateCw => self.rotate_clockwise(),
            GameAction::RotateCcw => self.rotate_counterclockwise(),
            GameAction::FastDrop => self.request_fast_drop(sched),
            GameAction::Pause => self.toggle_pause(sched),
            GameAction::Start => self.start_game(sched),
            GameAction::Reset => {
                self.reset_game(sched);
                true
            }
        }
    }

    pub fn occupied_cells_of_settled_grid(&self) -> Vec<Cell> {
        self.state.occupied_cells_of_settled_grid()
    }

    pub fn occupied_cells_of_active_piece(&self) -> Vec<Cell> {
        self.state.occupied_cells_of_active_piece()
    }

    pub fn current_score(&self) -> u32 {
        self.state.current_score()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Take all events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.state.take_events()
    }

    /// Render-facing copy of the current state, reusing `out`'s buffers
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let grid = self.state.grid();
        out.width = grid.width();
        out.height = grid.height();

        out.settled.clear();
        out.settled.extend(grid.occupied_cells());

        out.active.clear();
        out.active_kind = None;
        if let Some(piece) = self.state.active() {
            out.active.extend_from_slice(&piece.occupied_cells());
            out.active_kind = Some(piece.kind());
        }

        out.score = self.current_score();
        out.game_over = self.is_game_over();
        out.paused = self.paused;
        out.running = self.is_running();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
