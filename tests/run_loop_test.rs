//! Integration test: run loop scenarios
//!
//! Drives a `Session` tick by tick the way the terminal loop and the
//! simulator do, and checks pacing, spawning, collisions and restarts.

use dino_sura::config::Config;
use dino_sura::runner::{Obstacle, TickOutcome};
use dino_sura::session::{Action, Session};
use dino_sura::store::{MemoryStore, ScoreStore};

fn new_session(config: Config) -> Session<MemoryStore> {
    Session::new(config, MemoryStore::new(), Some(42))
}

/// Config with spawning switched off, so the player can idle safely.
fn no_spawn_config() -> Config {
    let mut config = Config::default();
    config.spawn.first_interval = u32::MAX;
    config
}

fn run_ticks<S: ScoreStore>(session: &mut Session<S>, count: u32) {
    for _ in 0..count {
        assert_eq!(session.step(), TickOutcome::Continued);
    }
}

/// Put a small obstacle right where the player is standing after the next
/// scroll step.
fn obstacle_under_player<S: ScoreStore>(session: &mut Session<S>) {
    let run = session.run_mut();
    run.obstacles.push(Obstacle {
        x: run.player.x + run.speed,
        y: run.player.y,
        width: 20.0,
        height: 20.0,
        passed: false,
    });
}

#[test]
fn test_first_spawn_at_frame_90_scrolls_at_base_speed() {
    let mut session = new_session(Config::default());

    run_ticks(&mut session, 89);
    assert!(session.run().obstacles.is_empty());

    run_ticks(&mut session, 1);
    let run = session.run();
    assert_eq!(run.frame_count, 90);
    assert_eq!(run.obstacles.len(), 1);
    // Spawned at width + 30, then scrolled once in the same tick
    assert_eq!(run.obstacles[0].x, 925.0);
    assert_eq!(run.obstacles[0].y + run.obstacles[0].height, 280.0);

    run_ticks(&mut session, 1);
    assert_eq!(session.run().obstacles[0].x, 920.0);
    run_ticks(&mut session, 1);
    assert_eq!(session.run().obstacles[0].x, 915.0);
}

#[test]
fn test_idle_player_stays_grounded_for_100_ticks() {
    let mut session = new_session(no_spawn_config());
    let start_y = session.run().player.y;

    run_ticks(&mut session, 100);

    let run = session.run();
    assert_eq!(run.player.y, start_y);
    assert!(run.player.grounded);
    assert!(run.is_running());
}

#[test]
fn test_jump_leaves_ground_immediately() {
    let mut session = new_session(no_spawn_config());
    session.handle(Action::JumpOrRestart);

    let run = session.run();
    assert_eq!(run.player.velocity_y, -11.0);
    assert!(!run.player.grounded);

    // A second press mid-air does nothing
    session.handle(Action::JumpOrRestart);
    assert_eq!(session.run().player.velocity_y, -11.0);
}

#[test]
fn test_speed_steps_only_on_cadence() {
    let mut session = new_session(no_spawn_config());
    let mut previous = session.run().speed;

    for frame in 1..=1200u64 {
        session.step();
        let speed = session.run().speed;
        assert!(speed >= previous);
        if frame % 600 == 0 {
            assert_eq!(speed, previous + 0.5);
        } else {
            assert_eq!(speed, previous);
        }
        previous = speed;
    }
    assert_eq!(session.run().speed, 6.0);
}

#[test]
fn test_collision_ends_run_once_and_records_best() {
    let mut session = new_session(no_spawn_config());
    run_ticks(&mut session, 10);

    session.run_mut().score = 3;
    obstacle_under_player(&mut session);

    assert_eq!(session.step(), TickOutcome::GameOver { score: 3 });
    assert_eq!(session.run().frame_count, 11);
    assert_eq!(session.best(), 3);
    assert_eq!(session.last_score(), Some(3));

    // Further ticks leave the finished run untouched
    let frozen = session.run().clone();
    for _ in 0..5 {
        assert_eq!(session.step(), TickOutcome::Idle);
    }
    assert!(!session.advance(500));
    assert_eq!(session.run().frame_count, frozen.frame_count);
    assert_eq!(session.run().player, frozen.player);
    assert_eq!(session.run().obstacles.len(), frozen.obstacles.len());
}

#[test]
fn test_lower_score_keeps_previous_best() {
    let mut session = new_session(no_spawn_config());
    session.run_mut().score = 5;
    obstacle_under_player(&mut session);
    session.step();
    assert_eq!(session.best(), 5);

    session.handle(Action::Restart);
    session.run_mut().score = 2;
    obstacle_under_player(&mut session);
    session.step();

    assert_eq!(session.best(), 5);
    assert_eq!(session.last_score(), Some(2));
}

#[test]
fn test_jump_input_restarts_after_game_over() {
    let mut session = new_session(Config::default());
    obstacle_under_player(&mut session);
    session.step();
    assert!(session.run().is_game_over());

    session.handle(Action::JumpOrRestart);

    let run = session.run();
    assert!(run.is_running());
    assert_eq!(run.score, 0);
    assert_eq!(run.frame_count, 0);
    assert_eq!(run.speed, 5.0);
    assert!(run.obstacles.is_empty());
    assert!(run.player.grounded);
}

#[test]
fn test_restart_mid_run_resets_pacing() {
    let mut session = new_session(Config::default());
    run_ticks(&mut session, 95);
    assert!(!session.run().obstacles.is_empty());

    session.handle(Action::Restart);
    assert!(session.run().obstacles.is_empty());
    assert_eq!(session.run().spawn_interval, 90);

    run_ticks(&mut session, 89);
    assert!(session.run().obstacles.is_empty());
}

#[test]
fn test_advance_runs_whole_steps() {
    let mut session = new_session(no_spawn_config());

    assert!(!session.advance(10));
    assert_eq!(session.run().frame_count, 0);

    // 10 + 22 = 32 ms, two 16 ms steps
    assert!(session.advance(22));
    assert_eq!(session.run().frame_count, 2);

    // Long stalls are clamped to 100 ms
    session.advance(5_000);
    assert_eq!(session.run().frame_count, 8);
}

#[test]
fn test_mute_does_not_touch_the_run() {
    let mut session = new_session(no_spawn_config());
    run_ticks(&mut session, 3);

    session.handle(Action::ToggleMute);
    assert!(session.is_muted());
    assert_eq!(session.run().frame_count, 3);
    assert!(session.run().is_running());

    session.handle(Action::ToggleMute);
    assert!(!session.is_muted());
}
