//! Pairwise circular collision detection
//!
//! All gameplay collisions reduce to circle-vs-circle overlap. The sweep is
//! a plain O(n·m) pass; entity counts stay in the low hundreds, so no broad
//! phase is needed.

use super::entity::Entity;

/// `true` iff two collision circles strictly overlap.
///
/// Touching circles (distance exactly equal to the radius sum) do not count
/// as a collision.
#[inline]
pub fn circles_overlap(a: &impl Entity, b: &impl Entity) -> bool {
    let delta = a.position() - b.position();
    let reach = a.radius() + b.radius();
    delta.length_squared() < reach * reach
}

/// Every strictly-overlapping `(index_a, index_b)` pair between two groups.
///
/// Entries already flagged deleted are skipped. Pairs are reported even when
/// one member also overlaps something else this frame; the destroy path is
/// idempotent, so resolving such a pair twice is harmless.
pub fn sweep<A: Entity, B: Entity>(group_a: &[A], group_b: &[B]) -> Vec<(usize, usize)> {
    let mut hits = Vec::new();
    for (ia, a) in group_a.iter().enumerate() {
        if a.is_deleted() {
            continue;
        }
        for (ib, b) in group_b.iter().enumerate() {
            if b.is_deleted() {
                continue;
            }
            if circles_overlap(a, b) {
                hits.push((ia, ib));
            }
        }
    }
    hits
}
