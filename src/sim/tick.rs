//! Per-frame simulation step
//!
//! The host calls `tick` once per rendered frame. Each call replenishes the
//! asteroid field, resolves collisions, advances every entity group and
//! compacts out the dead, then applies game-state transitions.

use super::collision::{self, circles_overlap};
use super::entity::{Entity, advance_and_compact};
use super::spawn;
use super::state::{Asteroid, AsteroidSize, GamePhase, Particle, World};
use crate::consts::*;

/// Input actions sampled by the host once per frame.
///
/// `confirm` and `clear_asteroids` are edge-triggered: the caller reports the
/// key-press transition, not the held state. The rest are held state.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Start or restart a run (Enter)
    pub confirm: bool,
    /// Debug action: wipe the field and reset the wave counter
    pub clear_asteroids: bool,
}

/// Advance the world by one frame.
pub fn tick(world: &mut World, input: &FrameInput) {
    if input.confirm && world.phase != GamePhase::Running {
        start_game(world);
    }

    // Replenish before collisions so a wave never spawns on top of a sweep.
    if world.asteroids.is_empty() {
        world.asteroid_base_count += WAVE_INCREMENT;
        spawn_wave(world, world.asteroid_base_count);
    }

    resolve_bullet_hits(world);
    resolve_ship_hits(world);

    let viewport = world.viewport;
    advance_and_compact(&mut world.particles, &viewport);
    advance_and_compact(&mut world.asteroids, &viewport);
    advance_and_compact(&mut world.bullets, &viewport);
    update_ship(world, input);

    // Debug clear runs after replenishment on purpose: the next frame's
    // replenish pass regenerates a fresh (base 0 + 2) wave.
    if input.clear_asteroids {
        world.asteroid_base_count = 0;
        world.asteroids.clear();
    }
}

/// Reset for a new run: fresh score, initial wave size, ship at the center.
fn start_game(world: &mut World) {
    log::info!("starting run (seed {})", world.seed());
    world.phase = GamePhase::Running;
    world.score = 0;
    world.needs_name_entry = false;
    world.asteroid_base_count = INITIAL_ASTEROID_COUNT;
    world.bullets.clear();
    world.particles.clear();
    world.asteroids.clear();
    world.ship = Some(super::state::Ship::spawn(world.viewport.center()));
    spawn_wave(world, INITIAL_ASTEROID_COUNT);
}

/// Spawn `count` large asteroids, keeping clear of the ship.
fn spawn_wave(world: &mut World, count: u32) {
    let ship_pos = world
        .ship
        .as_ref()
        .map(|s| s.position())
        .unwrap_or_else(|| world.viewport.center());
    for _ in 0..count {
        let pos = spawn::asteroid_spawn_position(&mut world.rng, &world.viewport, ship_pos);
        let rock = Asteroid::spawn(AsteroidSize::Large, pos, &mut world.rng);
        world.asteroids.push(rock);
    }
    log::debug!("wave spawned: {} asteroids", count);
}

/// Bullets vs asteroids: both die, children and debris join their groups
/// after the sweep so new rocks are not re-checked this frame.
fn resolve_bullet_hits(world: &mut World) {
    let hits = collision::sweep(&world.bullets, &world.asteroids);
    if hits.is_empty() {
        return;
    }

    let mut children = Vec::new();
    let mut score_delta = 0u64;
    for (bi, ai) in hits {
        world.bullets[bi].mark_deleted();
        if let Some(kill) = world.asteroids[ai].destroy(&mut world.rng) {
            score_delta += kill.score;
            children.extend(kill.children);
            world.particles.extend(kill.debris);
        }
    }
    world.asteroids.extend(children);

    if world.phase == GamePhase::Running {
        world.score += score_delta;
    }
}

/// Ship vs asteroids: skipped entirely during the spawn grace period.
/// A hit destroys both sides and ends the run.
fn resolve_ship_hits(world: &mut World) {
    let Some(ship) = world.ship.as_ref() else {
        return;
    };
    if ship.is_invincible() || ship.is_deleted() {
        return;
    }

    let hits: Vec<usize> = world
        .asteroids
        .iter()
        .enumerate()
        .filter(|(_, rock)| !rock.is_deleted() && circles_overlap(ship, *rock))
        .map(|(i, _)| i)
        .collect();
    if hits.is_empty() {
        return;
    }

    let mut children = Vec::new();
    let mut score_delta = 0u64;
    for ai in hits {
        if let Some(kill) = world.asteroids[ai].destroy(&mut world.rng) {
            score_delta += kill.score;
            children.extend(kill.children);
            world.particles.extend(kill.debris);
        }
    }
    world.asteroids.extend(children);
    // Ramming a rock still counts while the run is live.
    if world.phase == GamePhase::Running {
        world.score += score_delta;
    }

    if let Some(ship) = world.ship.as_mut() {
        if let Some(burst) = ship.destroy(&mut world.rng) {
            world.particles.extend(burst);
        }
    }
    game_over(world);
}

/// End the run; flag the name-entry prompt when the score makes the board.
fn game_over(world: &mut World) {
    world.phase = GamePhase::GameOver;
    world.needs_name_entry = world.score > world.lowest_top_score;
    log::info!(
        "game over at {} points (top cutoff {})",
        world.score,
        world.lowest_top_score
    );
}

/// Apply held controls, then advance the ship like any other entity.
fn update_ship(world: &mut World, input: &FrameInput) {
    // Drop a ship destroyed by this frame's sweep.
    if world.ship.as_ref().is_some_and(|s| s.is_deleted()) {
        world.ship = None;
        return;
    }
    let Some(ship) = world.ship.as_mut() else {
        return;
    };

    if input.left {
        ship.turn(-1.0);
    }
    if input.right {
        ship.turn(1.0);
    }
    if input.thrust {
        ship.apply_thrust();
        let puff = Particle::exhaust(&mut world.rng, ship.tail(), ship.rotation);
        world.particles.push(puff);
    }
    if input.fire {
        if let Some(bullet) = ship.try_fire() {
            world.bullets.push(bullet);
        }
    }

    let viewport = world.viewport;
    ship.advance(&viewport);
}
