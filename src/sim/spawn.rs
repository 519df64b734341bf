//! Randomized spawn parameters
//!
//! Asteroids must appear away from the ship so a fresh spawn cannot kill the
//! player instantly. Placement stays bounded, so positions are always finite.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Viewport;
use crate::consts::SHIP_SAFETY_MARGIN;

/// Random value in `[min, max)` avoiding the interval `[excl_min, excl_max]`.
///
/// When the exclusion swallows the whole range (a viewport smaller than the
/// safety box), fall back to an unconstrained draw rather than looping or
/// panicking.
pub fn random_excluding(rng: &mut Pcg32, min: f32, max: f32, excl_min: f32, excl_max: f32) -> f32 {
    if min >= max {
        return min;
    }
    let excl_min = excl_min.max(min);
    let excl_max = excl_max.min(max);
    if excl_min >= excl_max {
        // Exclusion lies outside the range.
        return rng.random_range(min..max);
    }

    let left = excl_min - min;
    let right = max - excl_max;
    let usable = left + right;
    if usable <= f32::EPSILON {
        return rng.random_range(min..max);
    }

    let draw = rng.random_range(0.0..usable);
    if draw < left { min + draw } else { excl_max + (draw - left) }
}

/// In-bounds spawn position outside the safety box around `ship_pos`.
pub fn asteroid_spawn_position(rng: &mut Pcg32, viewport: &Viewport, ship_pos: Vec2) -> Vec2 {
    Vec2::new(
        random_excluding(
            rng,
            0.0,
            viewport.width,
            ship_pos.x - SHIP_SAFETY_MARGIN,
            ship_pos.x + SHIP_SAFETY_MARGIN,
        ),
        random_excluding(
            rng,
            0.0,
            viewport.height,
            ship_pos.y - SHIP_SAFETY_MARGIN,
            ship_pos.y + SHIP_SAFETY_MARGIN,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(99)
    }

    #[test]
    fn test_draws_avoid_exclusion() {
        let mut rng = rng();
        for _ in 0..500 {
            let v = random_excluding(&mut rng, 0.0, 100.0, 40.0, 60.0);
            assert!((0.0..100.0).contains(&v));
            assert!(!(40.0..60.0).contains(&v));
        }
    }

    #[test]
    fn test_exclusion_outside_range_is_ignored() {
        let mut rng = rng();
        for _ in 0..100 {
            let v = random_excluding(&mut rng, 0.0, 10.0, 50.0, 60.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn test_degenerate_range_falls_back() {
        // Exclusion covers the whole range; the draw must still land in bounds.
        let mut rng = rng();
        for _ in 0..100 {
            let v = random_excluding(&mut rng, 0.0, 10.0, -5.0, 15.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn test_spawn_position_outside_safety_box() {
        let mut rng = rng();
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let ship = viewport.center();
        for _ in 0..200 {
            let pos = asteroid_spawn_position(&mut rng, &viewport, ship);
            assert!(pos.x >= 0.0 && pos.x < viewport.width);
            assert!(pos.y >= 0.0 && pos.y < viewport.height);
            let clear_x = (pos.x - ship.x).abs() >= SHIP_SAFETY_MARGIN;
            let clear_y = (pos.y - ship.y).abs() >= SHIP_SAFETY_MARGIN;
            assert!(clear_x || clear_y);
        }
    }
}
