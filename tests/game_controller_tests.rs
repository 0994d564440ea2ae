//! Game controller tests - timers, fast-drop, pause and reset

use tick_tetris::core::{Game, ManualScheduler, TimerKind};
use tick_tetris::types::{GameAction, GameConfig, GameEvent, TickOutcome};

fn run_until(game: &mut Game, sched: &mut ManualScheduler, until: u64) -> Vec<TickOutcome> {
    let mut outcomes = Vec::new();
    while let Some(kind) = sched.pop_due(until) {
        if let Some(outcome) = game.on_timer(kind, sched) {
            outcomes.push(outcome);
        }
    }
    outcomes
}

fn tick_timers(sched: &ManualScheduler) -> Vec<Option<u32>> {
    sched
        .timers()
        .iter()
        .filter(|t| t.kind == TimerKind::Tick)
        .map(|t| t.interval_ms)
        .collect()
}

fn fast_drop_events(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::FastDrop { .. }))
        .count()
}

#[test]
fn test_first_tick_after_one_interval() {
    let mut sched = ManualScheduler::new();
    let mut game = Game::default();
    game.start_game(&mut sched);

    assert!(run_until(&mut game, &mut sched, 199).is_empty());
    let outcomes = run_until(&mut game, &mut sched, 200);
    assert!(matches!(outcomes[..], [TickOutcome::Spawned(_)]));
    assert_eq!(run_until(&mut game, &mut sched, 1000).len(), 4);
}

#[test]
fn test_launch_ticks_then_reset_waits_for_start() {
    let mut sched = ManualScheduler::new();
    let mut game = Game::default();
    game.start_game(&mut sched);
    assert!(game.is_running());
    assert_eq!(tick_timers(&sched), vec![Some(200)]);
    assert_eq!(run_until(&mut game, &mut sched, 400).len(), 2);

    game.reset_game(&mut sched);
    assert!(!game.is_running());
    assert!(tick_timers(&sched).is_empty());
    assert!(run_until(&mut game, &mut sched, 1000).is_empty());

    assert!(game.start_game(&mut sched));
    let outcomes = run_until(&mut game, &mut sched, 1200);
    assert!(matches!(outcomes[..], [TickOutcome::Spawned(_)]));
}

#[test]
fn test_repeated_fast_drop_swaps_interval_once() {
    let mut sched = ManualScheduler::new();
    let mut game = Game::default();
    game.start_game(&mut sched);
    run_until(&mut game, &mut sched, 200);

    assert!(game.request_fast_drop(&mut sched));
    assert_eq!(game.tick_interval_ms(), Some(20));
    assert_eq!(tick_timers(&sched), vec![Some(20)]);

    let outcomes = run_until(&mut game, &mut sched, 300);
    assert_eq!(outcomes, vec![TickOutcome::Fell; 5]);

    assert!(game.request_fast_drop(&mut sched));
    assert_eq!(tick_timers(&sched), vec![Some(20)]);
    let reverts: Vec<u64> = sched
        .timers()
        .iter()
        .filter(|t| t.kind == TimerKind::EndFastDrop)
        .map(|t| t.deadline_ms)
        .collect();
    assert_eq!(reverts, vec![700]);
    assert_eq!(fast_drop_events(&game.take_events()), 1);

    // The first revert deadline (600) no longer applies.
    let outcomes = run_until(&mut game, &mut sched, 699);
    assert!(outcomes.iter().all(|o| *o == TickOutcome::Fell));
    assert!(game.is_fast_drop());

    run_until(&mut game, &mut sched, 700);
    assert!(!game.is_fast_drop());
    assert_eq!(game.tick_interval_ms(), Some(200));
    assert_eq!(tick_timers(&sched), vec![Some(200)]);
    assert_eq!(sched.next_deadline(), Some(900));
}

#[test]
fn test_spawn_ends_fast_drop() {
    let config = GameConfig {
        height: 8,
        ..GameConfig::default()
    };
    let mut sched = ManualScheduler::new();
    let mut game = Game::new(config);
    game.start_game(&mut sched);
    run_until(&mut game, &mut sched, 200);
    game.request_fast_drop(&mut sched);

    let mut spawned = false;
    while let Some(kind) = sched.pop_due(600) {
        if let Some(TickOutcome::Spawned(_)) = game.on_timer(kind, &mut sched) {
            spawned = true;
            break;
        }
    }

    assert!(spawned, "a short field lands the piece inside the window");
    assert!(!game.is_fast_drop());
    assert_eq!(game.tick_interval_ms(), Some(200));
    assert!(sched.timers().iter().all(|t| t.kind == TimerKind::Tick));
}

#[test]
fn test_cancel_fast_drop_without_request_is_noop() {
    let mut sched = ManualScheduler::new();
    let mut game = Game::default();
    game.start_game(&mut sched);
    let before = sched.timers().to_vec();

    game.cancel_fast_drop(&mut sched);
    game.cancel_fast_drop(&mut sched);
    assert_eq!(sched.timers(), &before[..]);
}

#[test]
fn test_pause_during_fast_drop_resumes_at_normal_speed() {
    let mut sched = ManualScheduler::new();
    let mut game = Game::default();
    game.start_game(&mut sched);
    run_until(&mut game, &mut sched, 200);
    game.request_fast_drop(&mut sched);

    assert!(game.toggle_pause(&mut sched));
    assert!(game.is_paused());
    assert!(!game.is_running());
    assert!(!game.is_fast_drop());
    assert!(sched.timers().is_empty());

    // Nothing happens while paused.
    let active = game.occupied_cells_of_active_piece();
    assert!(run_until(&mut game, &mut sched, 5000).is_empty());
    assert_eq!(game.occupied_cells_of_active_piece(), active);

    assert!(game.toggle_pause(&mut sched));
    assert!(!game.is_paused());
    assert_eq!(game.tick_interval_ms(), Some(200));
    assert_eq!(tick_timers(&sched), vec![Some(200)]);
}

#[test]
fn test_game_over_cancels_timers() {
    let mut sched = ManualScheduler::new();
    let mut game = Game::default();
    game.state_mut().grid_mut().set_occupied(&[(0, 38)]);
    game.start_game(&mut sched);

    let outcomes = run_until(&mut game, &mut sched, 1000);
    assert_eq!(outcomes.last(), Some(&TickOutcome::GameOver));
    assert!(game.is_game_over());
    assert!(!game.is_running());
    assert!(sched.timers().is_empty());

    assert!(!game.start_game(&mut sched));
    assert!(!game.toggle_pause(&mut sched));
    assert!(!game.request_fast_drop(&mut sched));
    let events = game.take_events();
    assert!(matches!(events.last(), Some(GameEvent::GameOver { score: 0 })));
}

#[test]
fn test_reset_starts_over_stopped() {
    let mut sched = ManualScheduler::new();
    let mut game = Game::default();
    game.state_mut().grid_mut().set_occupied(&[(0, 38)]);
    game.start_game(&mut sched);
    run_until(&mut game, &mut sched, 1000);
    assert!(game.is_game_over());

    assert!(game.apply_action(GameAction::Reset, &mut sched));
    assert!(!game.is_game_over());
    assert!(!game.is_running());
    assert_eq!(game.current_score(), 0);
    assert!(game.occupied_cells_of_settled_grid().is_empty());
    assert!(game.occupied_cells_of_active_piece().is_empty());
    assert_eq!(game.take_events().last(), Some(&GameEvent::Reset));

    assert!(game.apply_action(GameAction::Start, &mut sched));
    let first_tick = sched.now_ms() + 200;
    let outcomes = run_until(&mut game, &mut sched, first_tick);
    assert!(matches!(outcomes[..], [TickOutcome::Spawned(_)]));
}

#[test]
fn test_reset_while_fast_dropping_clears_every_timer() {
    let mut sched = ManualScheduler::new();
    let mut game = Game::default();
    game.start_game(&mut sched);
    run_until(&mut game, &mut sched, 200);
    game.request_fast_drop(&mut sched);

    game.reset_game(&mut sched);
    assert!(sched.timers().is_empty());
    assert!(!game.is_fast_drop());
}

#[test]
fn test_actions_route_to_commands() {
    let mut sched = ManualScheduler::new();
    let mut game = Game::default();

    // Moves need a running game.
    assert!(!game.apply_action(GameAction::MoveLeft, &mut sched));
    assert!(game.apply_action(GameAction::Start, &mut sched));
    run_until(&mut game, &mut sched, 200);

    let before = game.occupied_cells_of_active_piece();
    assert!(game.apply_action(GameAction::MoveLeft, &mut sched));
    let after = game.occupied_cells_of_active_piece();
    for (b, a) in before.iter().zip(&after) {
        assert_eq!((b.0 - 1, b.1), *a);
    }

    assert!(game.apply_action(GameAction::FastDrop, &mut sched));
    assert!(game.is_fast_drop());
    assert!(game.apply_action(GameAction::Pause, &mut sched));
    assert!(game.is_paused());
}

#[test]
fn test_snapshot_reflects_controller_state() {
    let mut sched = ManualScheduler::new();
    let mut game = Game::default();

    let snap = game.snapshot();
    assert_eq!((snap.width, snap.height), (10, 40));
    assert!(!snap.running);
    assert!(snap.active.is_empty());

    game.start_game(&mut sched);
    run_until(&mut game, &mut sched, 200);
    let snap = game.snapshot();
    assert!(snap.running);
    assert!(snap.playable());
    assert_eq!(snap.active.len(), 4);
    assert!(snap.active_kind.is_some());
}
