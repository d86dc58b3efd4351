//! Runner simulation step: pacing, spawning, physics, scoring, culling and
//! collision detection.

use super::types::*;
use crate::config::ScoringPolicy;
use rand::Rng;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The run was already over; nothing changed.
    Idle,
    /// The run is still going.
    Continued,
    /// The player hit an obstacle on this tick.
    GameOver { score: u32 },
}

/// Advance the run by one fixed step.
pub fn tick<R: Rng>(run: &mut RunState, rng: &mut R) -> TickOutcome {
    if run.is_game_over() {
        return TickOutcome::Idle;
    }

    // 1. Frame counter and difficulty ramp
    run.frame_count += 1;
    if run.frame_count % run.config.pace.speed_increase_every == 0 {
        run.speed += run.config.pace.speed_increment;
        log::debug!(
            "speed up to {:.1} at frame {}",
            run.speed,
            run.frame_count
        );
    }

    // 2. Spawn control
    run.spawn_timer += 1;
    if run.spawn_timer >= run.spawn_interval {
        run.spawn_obstacle(rng);
        run.spawn_timer = 0;
        run.reroll_spawn_interval(rng);
    }

    // 3. Physics
    apply_physics(run);

    // 4. Scroll obstacles and score
    for obstacle in &mut run.obstacles {
        obstacle.x -= run.speed;
    }
    award_score(run);

    // 5. Cull obstacles past the left margin
    let margin = run.config.obstacle.cull_margin;
    run.obstacles.retain(|o| o.right() >= -margin);

    // 6. Collision
    if check_collision(run) {
        run.phase = RunPhase::GameOver;
        log::info!(
            "game over at frame {} with score {}",
            run.frame_count,
            run.score
        );
        return TickOutcome::GameOver { score: run.score };
    }

    TickOutcome::Continued
}

/// Gravity is applied every tick, grounded or not; the ground clamp hides it.
fn apply_physics(run: &mut RunState) {
    let ground_y = run.config.world.ground_y();
    let player = &mut run.player;

    player.velocity_y += player.gravity;
    player.y += player.velocity_y;

    if player.y + player.height >= ground_y {
        player.y = ground_y - player.height;
        player.velocity_y = 0.0;
        player.grounded = true;
    } else {
        player.grounded = false;
    }
}

fn award_score(run: &mut RunState) {
    match run.config.scoring {
        ScoringPolicy::EdgePass => {
            let player_left = run.player.x;
            for obstacle in &mut run.obstacles {
                if !obstacle.passed && obstacle.right() < player_left {
                    obstacle.passed = true;
                    run.score += 1;
                }
            }
        }
        ScoringPolicy::FrameCadence { every } => {
            if run.frame_count % u64::from(every) == 0 {
                run.score += 1;
            }
        }
    }
}

/// True if the player overlaps any live obstacle.
pub fn check_collision(run: &RunState) -> bool {
    let player = run.player.bounds();
    run.obstacles
        .iter()
        .any(|obstacle| player.intersects(&obstacle.bounds()))
}

/// Start a jump if the run is live and the player is on the ground.
/// Returns true if the jump happened.
pub fn jump(run: &mut RunState) -> bool {
    if !run.is_running() || !run.player.grounded {
        return false;
    }
    run.player.velocity_y = run.player.jump_impulse;
    run.player.grounded = false;
    true
}

/// Put the run back to its initial state and resume it.
pub fn reset_game(run: &mut RunState) {
    run.obstacles.clear();
    run.player = Player::resting(&run.config);
    run.frame_count = 0;
    run.speed = run.config.pace.base_speed;
    run.spawn_timer = 0;
    run.spawn_interval = run.config.spawn.first_interval;
    run.score = 0;
    run.phase = RunPhase::Running;
}
