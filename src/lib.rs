//! Glimmeroids - a toroidal asteroids arcade simulation
//!
//! Core modules:
//! - `sim`: frame-locked simulation (entities, physics, collisions, game state)
//! - `highscores`: player ranking and top-N leaderboard
//! - `persistence`: injected score storage backends

pub mod highscores;
pub mod persistence;
pub mod sim;

pub use highscores::{Leaderboard, Player};

use glam::Vec2;

/// Game tuning constants
///
/// The simulation is frame-locked: one tick per rendered frame, assumed 60 Hz.
/// Speeds are pixels per frame, accelerations pixels per frame squared.
pub mod consts {
    /// Asteroids in the first wave of a run
    pub const INITIAL_ASTEROID_COUNT: u32 = 5;
    /// Wave growth each time the field is cleared
    pub const WAVE_INCREMENT: u32 = 2;
    /// Half-extent of the no-spawn box around the ship
    pub const SHIP_SAFETY_MARGIN: f32 = 60.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 20.0;
    /// Forward acceleration while the thrust key is held
    pub const SHIP_THRUST: f32 = 0.15;
    /// Fraction of velocity retained each frame (drag)
    pub const SHIP_DRAG: f32 = 0.99;
    /// Angular step per frame while a rotation key is held (~6 degrees)
    pub const SHIP_TURN_STEP: f32 = 0.1047;
    /// Post-spawn invincibility, in frames
    pub const SHIP_GRACE_FRAMES: u32 = 120;
    /// Minimum frames between shots (~300 ms at 60 Hz)
    pub const FIRE_COOLDOWN_FRAMES: u32 = 18;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 9.0;
    pub const BULLET_RADIUS: f32 = 2.0;
    pub const BULLET_TTL_FRAMES: u32 = 70;

    /// Particle velocity retained each frame
    pub const PARTICLE_DAMPING: f32 = 0.97;
    /// Particles in a ship explosion
    pub const SHIP_BURST_COUNT: usize = 60;
}

/// Wrap a coordinate into `[0, max)`.
#[inline]
pub fn wrap_coord(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(max);
    // rem_euclid can round up to exactly `max` for tiny negative inputs;
    // the result must stay strictly below the bound.
    if wrapped >= max { 0.0 } else { wrapped }
}

/// Unit heading vector for a rotation angle.
///
/// Zero points straight up on a y-down screen; positive angles turn clockwise.
#[inline]
pub fn heading_vec(rotation: f32) -> Vec2 {
    Vec2::new(rotation.sin(), -rotation.cos())
}
