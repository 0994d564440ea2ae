//! Terminal runner (default binary).
//!
//! Drives the core controller from a monotonic clock: timers live in a
//! `ManualScheduler` whose virtual time is pulled forward to "now" before every
//! input and every frame.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};

use tick_tetris::core::{Game, GameSnapshot, ManualScheduler};
use tick_tetris::input::{handle_key_event, should_quit};
use tick_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tick_tetris::types::{GameConfig, FIELD_HEIGHT, FIELD_WIDTH, MIN_FIELD_HEIGHT, MIN_FIELD_WIDTH, TICK_MS};
use tick_tetris::EventLog;

/// Poll timeout while no timer is pending (stopped or paused game).
const IDLE_POLL_MS: u64 = 250;

#[derive(Debug, Parser)]
#[command(name = "tick-tetris", version, about = "Falling-block puzzle in the terminal")]
struct Args {
    /// Field width in columns
    #[arg(long, env = "TETRIS_WIDTH", default_value_t = FIELD_WIDTH,
          value_parser = clap::value_parser!(u16).range(MIN_FIELD_WIDTH as i64..))]
    width: u16,

    /// Field height in rows
    #[arg(long, env = "TETRIS_HEIGHT", default_value_t = FIELD_HEIGHT,
          value_parser = clap::value_parser!(u16).range(MIN_FIELD_HEIGHT as i64..))]
    height: u16,

    /// Normal tick interval in milliseconds
    #[arg(long, env = "TETRIS_TICK_MS", default_value_t = TICK_MS,
          value_parser = clap::value_parser!(u32).range(1..))]
    tick_ms: u32,

    /// RNG seed (defaults to one derived from the system clock)
    #[arg(long, env = "TETRIS_SEED")]
    seed: Option<u32>,

    /// Append game events as JSON lines to this file
    #[arg(long, env = "TETRIS_LOG_PATH")]
    log_path: Option<String>,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            tick_ms: self.tick_ms,
            seed: self.seed.unwrap_or_else(clock_seed),
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut log = EventLog::from_path(args.log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, args.config(), &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();
    log.flush();
    result
}

/// Fire every timer due by `now_ms`, then log what happened.
fn pump(game: &mut Game, sched: &mut ManualScheduler, now_ms: u64, log: &mut EventLog) {
    while let Some(kind) = sched.pop_due(now_ms) {
        game.on_timer(kind, sched);
    }
    log.record_all(&game.take_events());
}

fn run(term: &mut TerminalRenderer, config: GameConfig, log: &mut EventLog) -> Result<()> {
    let mut game = Game::new(config);
    let mut sched = ManualScheduler::new();
    // Ticking starts with the window; Enter is only needed after a reset.
    game.start_game(&mut sched);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    loop {
        pump(&mut game, &mut sched, now_ms(), log);

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next timer.
        let timeout = match sched.next_deadline() {
            Some(deadline) => Duration::from_millis(deadline.saturating_sub(now_ms())),
            None => Duration::from_millis(IDLE_POLL_MS),
        };
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    // Commands see the field as of now, not as of the last frame.
                    pump(&mut game, &mut sched, now_ms(), log);
                    game.apply_action(action, &mut sched);
                    log.record_all(&game.take_events());
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
