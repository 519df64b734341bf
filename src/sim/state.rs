//! Game state and concrete entity types
//!
//! The `World` owns every entity group, the current phase and the score;
//! only `tick` mutates it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::entity::Entity;
use crate::consts::*;
use crate::{heading_vec, wrap_coord};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, asteroids drifting, waiting for confirm
    Welcome,
    /// Active run
    Running,
    /// Run ended, waiting for confirm to restart
    GameOver,
}

/// Wrap-around bounds supplied by the host, replaced wholesale on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio; the sim never reads it, renderers do.
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The player's ship. At most one exists, owned by the `World`.
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians, 0 = up, clockwise positive
    pub rotation: f32,
    /// Frames until the next shot is allowed
    pub cooldown_frames: u32,
    /// Post-spawn grace frames remaining
    pub grace_frames: u32,
    deleted: bool,
}

impl Ship {
    /// Spawn at rest with the full invincibility grace.
    pub fn spawn(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            cooldown_frames: 0,
            grace_frames: SHIP_GRACE_FRAMES,
            deleted: false,
        }
    }

    /// Whether the ship is still inside its post-spawn grace period.
    pub fn is_invincible(&self) -> bool {
        self.grace_frames > 0
    }

    /// Rotate by one angular step. `dir` is -1 (left) or +1 (right).
    pub fn turn(&mut self, dir: f32) {
        self.rotation += dir * SHIP_TURN_STEP;
    }

    /// Accelerate forward along the current heading.
    pub fn apply_thrust(&mut self) {
        self.vel += heading_vec(self.rotation) * SHIP_THRUST;
    }

    /// Tip of the ship, where bullets leave.
    pub fn nose(&self) -> Vec2 {
        self.pos + heading_vec(self.rotation) * SHIP_RADIUS
    }

    /// Rear of the ship, where exhaust particles appear.
    pub fn tail(&self) -> Vec2 {
        self.pos - heading_vec(self.rotation) * SHIP_RADIUS * 0.6
    }

    /// Fire a bullet if the cooldown has elapsed, resetting the cooldown.
    pub fn try_fire(&mut self) -> Option<Bullet> {
        if self.cooldown_frames > 0 {
            return None;
        }
        self.cooldown_frames = FIRE_COOLDOWN_FRAMES;
        Some(Bullet::fired(
            self.nose(),
            self.vel + heading_vec(self.rotation) * BULLET_SPEED,
            self.rotation,
        ))
    }

    /// Blow up the ship, returning its explosion burst.
    ///
    /// No-op on an already-deleted ship so one frame cannot detonate twice.
    pub fn destroy(&mut self, rng: &mut Pcg32) -> Option<Vec<Particle>> {
        if self.deleted {
            return None;
        }
        self.deleted = true;
        Some(Particle::burst(rng, self.pos, SHIP_BURST_COUNT, 3.5))
    }
}

impl Entity for Ship {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        SHIP_RADIUS
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    fn advance(&mut self, viewport: &Viewport) {
        self.vel *= SHIP_DRAG;
        self.pos += self.vel;
        self.pos.x = wrap_coord(self.pos.x, viewport.width);
        self.pos.y = wrap_coord(self.pos.y, viewport.height);
        self.cooldown_frames = self.cooldown_frames.saturating_sub(1);
        self.grace_frames = self.grace_frames.saturating_sub(1);
    }
}

/// Asteroid radius tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Large => 40.0,
            AsteroidSize::Medium => 20.0,
            AsteroidSize::Small => 10.0,
        }
    }

    /// Points awarded on destruction; smaller rocks pay more.
    pub fn score(self) -> u64 {
        match self {
            AsteroidSize::Large => 5,
            AsteroidSize::Medium => 10,
            AsteroidSize::Small => 20,
        }
    }

    /// Drift speed bounds in pixels per frame; smaller rocks fly faster.
    pub fn speed_range(self) -> (f32, f32) {
        match self {
            AsteroidSize::Large => (0.3, 1.5),
            AsteroidSize::Medium => (0.5, 2.0),
            AsteroidSize::Small => (0.8, 2.5),
        }
    }

    /// Next tier down, `None` for the smallest.
    pub fn smaller(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// Everything an asteroid destruction produces.
#[derive(Debug)]
pub struct AsteroidKill {
    pub score: u64,
    pub children: Vec<Asteroid>,
    pub debris: Vec<Particle>,
}

/// A drifting rock
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual rotation, radians
    pub rotation: f32,
    /// Rotation per frame
    pub spin: f32,
    pub size: AsteroidSize,
    deleted: bool,
}

impl Asteroid {
    /// Spawn with a random heading inside the tier's speed bounds.
    pub fn spawn(size: AsteroidSize, pos: Vec2, rng: &mut Pcg32) -> Self {
        let (min_speed, max_speed) = size.speed_range();
        let heading = rng.random_range(0.0..TAU);
        let speed = rng.random_range(min_speed..max_speed);
        Self {
            pos,
            vel: Vec2::new(heading.cos(), heading.sin()) * speed,
            rotation: rng.random_range(0.0..TAU),
            spin: rng.random_range(-0.02..0.02),
            size,
            deleted: false,
        }
    }

    /// Shatter the rock: award points, split into two children unless this
    /// is the smallest tier, and throw off debris.
    ///
    /// Idempotent: a rock already destroyed this frame yields nothing, so a
    /// second overlap in the same sweep cannot double-score or double-split.
    pub fn destroy(&mut self, rng: &mut Pcg32) -> Option<AsteroidKill> {
        if self.deleted {
            return None;
        }
        self.deleted = true;

        let children = match self.size.smaller() {
            Some(next) => (0..2).map(|_| Asteroid::spawn(next, self.pos, rng)).collect(),
            None => Vec::new(),
        };
        let debris_count = (self.size.radius() * 0.4) as usize;

        Some(AsteroidKill {
            score: self.size.score(),
            children,
            debris: Particle::burst(rng, self.pos, debris_count, 2.5),
        })
    }
}

impl Entity for Asteroid {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.size.radius()
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    fn advance(&mut self, viewport: &Viewport) {
        self.pos += self.vel;
        self.pos.x = wrap_coord(self.pos.x, viewport.width);
        self.pos.y = wrap_coord(self.pos.y, viewport.height);
        self.rotation += self.spin;
    }
}

/// A fired projectile
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading at fire time, kept for rendering
    pub rotation: f32,
    /// Frames of flight remaining
    pub ttl_frames: u32,
    deleted: bool,
}

impl Bullet {
    fn fired(pos: Vec2, vel: Vec2, rotation: f32) -> Self {
        Self {
            pos,
            vel,
            rotation,
            ttl_frames: BULLET_TTL_FRAMES,
            deleted: false,
        }
    }

    /// Bullet with an explicit lifetime, for tests and tuning.
    pub fn with_ttl(pos: Vec2, vel: Vec2, ttl_frames: u32) -> Self {
        Self {
            pos,
            vel,
            rotation: 0.0,
            ttl_frames,
            deleted: false,
        }
    }
}

impl Entity for Bullet {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        BULLET_RADIUS
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    fn advance(&mut self, viewport: &Viewport) {
        self.pos += self.vel;
        self.pos.x = wrap_coord(self.pos.x, viewport.width);
        self.pos.y = wrap_coord(self.pos.y, viewport.height);
        self.ttl_frames = self.ttl_frames.saturating_sub(1);
        if self.ttl_frames == 0 {
            self.deleted = true;
        }
    }
}

/// A decorative spark. Never collides, never wraps; it just fades out.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub ttl_frames: u32,
    /// Alpha lost per frame
    pub fade: f32,
    /// Remaining opacity, 1.0 at spawn
    pub alpha: f32,
    deleted: bool,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, ttl_frames: u32) -> Self {
        let fade = if ttl_frames > 0 {
            1.0 / ttl_frames as f32
        } else {
            1.0
        };
        Self {
            pos,
            vel,
            ttl_frames,
            fade,
            alpha: 1.0,
            deleted: false,
        }
    }

    /// Radial burst of `count` particles with random short lifetimes.
    pub fn burst(rng: &mut Pcg32, pos: Vec2, count: usize, max_speed: f32) -> Vec<Particle> {
        (0..count)
            .map(|_| {
                let heading = rng.random_range(0.0..TAU);
                let speed = rng.random_range(0.5..max_speed.max(0.6));
                let ttl = rng.random_range(20..60);
                Particle::new(pos, Vec2::new(heading.cos(), heading.sin()) * speed, ttl)
            })
            .collect()
    }

    /// Single exhaust puff behind a thrusting ship.
    pub fn exhaust(rng: &mut Pcg32, pos: Vec2, ship_rotation: f32) -> Particle {
        let jitter = rng.random_range(-0.3..0.3);
        let vel = -heading_vec(ship_rotation + jitter) * rng.random_range(1.0..2.0);
        Particle::new(pos, vel, rng.random_range(10..25))
    }
}

impl Entity for Particle {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        1.0
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    fn advance(&mut self, _viewport: &Viewport) {
        self.pos += self.vel;
        self.vel *= PARTICLE_DAMPING;
        self.alpha = (self.alpha - self.fade).max(0.0);
        self.ttl_frames = self.ttl_frames.saturating_sub(1);
        if self.ttl_frames == 0 {
            self.deleted = true;
        }
    }
}

/// Complete simulation state. Owned by the host, mutated only by `tick`.
#[derive(Debug)]
pub struct World {
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub score: u64,
    /// Base size of the current asteroid wave; grows by two per cleared wave
    pub asteroid_base_count: u32,
    pub ship: Option<Ship>,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    /// Set at game over when the run's score beats the lowest top score;
    /// cleared by `name_submitted`
    pub needs_name_entry: bool,
    /// Lowest score on the current top-N leaderboard, fed in by the host
    pub lowest_top_score: u64,
    pub(crate) rng: Pcg32,
    seed: u64,
}

impl World {
    /// Fresh world on the title screen with the given seed.
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            viewport,
            phase: GamePhase::Welcome,
            score: 0,
            asteroid_base_count: INITIAL_ASTEROID_COUNT,
            ship: None,
            asteroids: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            needs_name_entry: false,
            lowest_top_score: 0,
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Host notification that the resize handler changed the bounds.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Host notification that the leaderboard changed.
    pub fn set_score_to_beat(&mut self, lowest_top_score: u64) {
        self.lowest_top_score = lowest_top_score;
    }

    /// Host notification that the name-entry prompt was completed.
    pub fn name_submitted(&mut self) {
        self.needs_name_entry = false;
    }

    /// Read-only snapshot handed to the renderer once per frame.
    pub fn render_view(&self) -> RenderView<'_> {
        RenderView {
            viewport: &self.viewport,
            phase: self.phase,
            score: self.score,
            ship: self.ship.as_ref(),
            asteroids: &self.asteroids,
            bullets: &self.bullets,
            particles: &self.particles,
        }
    }
}

/// Everything a renderer needs for one frame. Strictly read-only.
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub viewport: &'a Viewport,
    pub phase: GamePhase,
    pub score: u64,
    pub ship: Option<&'a Ship>,
    pub asteroids: &'a [Asteroid],
    pub bullets: &'a [Bullet],
    pub particles: &'a [Particle],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_bullet_expires_exactly_at_ttl() {
        let viewport = Viewport::default();
        let mut bullet = Bullet::with_ttl(viewport.center(), Vec2::new(1.0, 0.0), 3);

        bullet.advance(&viewport);
        bullet.advance(&viewport);
        assert!(!bullet.is_deleted());
        bullet.advance(&viewport);
        assert!(bullet.is_deleted());
    }

    #[test]
    fn test_advance_wraps_into_bounds() {
        let viewport = Viewport::new(100.0, 80.0, 1.0);
        let mut rock = Asteroid::spawn(AsteroidSize::Small, Vec2::new(99.0, 1.0), &mut rng());
        rock.vel = Vec2::new(5.0, -5.0);

        for _ in 0..50 {
            rock.advance(&viewport);
            assert!(rock.pos.x >= 0.0 && rock.pos.x < viewport.width);
            assert!(rock.pos.y >= 0.0 && rock.pos.y < viewport.height);
        }
    }

    #[test]
    fn test_asteroid_split_chain() {
        let mut rng = rng();
        let mut large = Asteroid::spawn(AsteroidSize::Large, Vec2::splat(100.0), &mut rng);
        let kill = large.destroy(&mut rng).expect("first destroy yields a kill");
        assert_eq!(kill.score, 5);
        assert_eq!(kill.children.len(), 2);
        assert!(kill.children.iter().all(|c| c.size == AsteroidSize::Medium));
        assert!(kill.children.iter().all(|c| c.pos == Vec2::splat(100.0)));

        let mut medium = kill.children.into_iter().next().unwrap();
        let kill = medium.destroy(&mut rng).unwrap();
        assert_eq!(kill.score, 10);
        assert!(kill.children.iter().all(|c| c.size == AsteroidSize::Small));

        let mut small = Asteroid::spawn(AsteroidSize::Small, Vec2::ZERO, &mut rng);
        let kill = small.destroy(&mut rng).unwrap();
        assert_eq!(kill.score, 20);
        assert!(kill.children.is_empty());
    }

    #[test]
    fn test_asteroid_destroy_is_idempotent() {
        let mut rng = rng();
        let mut rock = Asteroid::spawn(AsteroidSize::Large, Vec2::ZERO, &mut rng);
        assert!(rock.destroy(&mut rng).is_some());
        assert!(rock.destroy(&mut rng).is_none());
    }

    #[test]
    fn test_ship_destroy_is_idempotent() {
        let mut rng = rng();
        let mut ship = Ship::spawn(Vec2::ZERO);
        let burst = ship.destroy(&mut rng).expect("first destroy bursts");
        assert_eq!(burst.len(), SHIP_BURST_COUNT);
        assert!(ship.destroy(&mut rng).is_none());
    }

    #[test]
    fn test_ship_grace_runs_out() {
        let viewport = Viewport::default();
        let mut ship = Ship::spawn(viewport.center());
        assert!(ship.is_invincible());
        for _ in 0..SHIP_GRACE_FRAMES {
            ship.advance(&viewport);
        }
        assert!(!ship.is_invincible());
    }

    #[test]
    fn test_ship_fire_cooldown() {
        let viewport = Viewport::default();
        let mut ship = Ship::spawn(viewport.center());
        let bullet = ship.try_fire().expect("first shot is free");
        // Muzzle velocity points along the heading on top of ship velocity.
        assert!(bullet.vel.y < 0.0);
        assert!(ship.try_fire().is_none());

        for _ in 0..FIRE_COOLDOWN_FRAMES {
            ship.advance(&viewport);
        }
        assert!(ship.try_fire().is_some());
    }

    #[test]
    fn test_ship_drag_slows_coasting() {
        let viewport = Viewport::default();
        let mut ship = Ship::spawn(viewport.center());
        ship.vel = Vec2::new(4.0, 0.0);
        ship.advance(&viewport);
        assert!(ship.vel.x < 4.0);
    }

    #[test]
    fn test_particle_expires_without_wrapping() {
        let viewport = Viewport::new(100.0, 100.0, 1.0);
        let mut spark = Particle::new(Vec2::new(99.0, 50.0), Vec2::new(5.0, 0.0), 4);
        spark.advance(&viewport);
        // Off the right edge and still there: particles do not wrap.
        assert!(spark.pos.x > viewport.width);
        for _ in 0..3 {
            spark.advance(&viewport);
        }
        assert!(spark.is_deleted());
        assert!(spark.alpha <= 0.05);
    }
}
