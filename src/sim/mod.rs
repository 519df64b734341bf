//! Frame-locked simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One tick per rendered frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, sweep};
pub use entity::{Entity, advance_and_compact};
pub use state::{
    Asteroid, AsteroidKill, AsteroidSize, Bullet, GamePhase, Particle, RenderView, Ship, Viewport,
    World,
};
pub use tick::{FrameInput, tick};
