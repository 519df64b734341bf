//! Common contract shared by every simulated object.
//!
//! The loop only ever needs the capability set below plus each type's
//! inherent `destroy`; concrete update rules live with the concrete types.

use glam::Vec2;

use super::state::Viewport;

/// Capability set every simulated object exposes to the loop.
pub trait Entity {
    /// Center of the collision circle.
    fn position(&self) -> Vec2;

    /// Collision radius. Always positive for live entities.
    fn radius(&self) -> f32;

    /// Whether the entity has been destroyed or expired this frame.
    fn is_deleted(&self) -> bool;

    /// Flag the entity for removal at the next compact pass.
    fn mark_deleted(&mut self);

    /// Advance one frame: integrate position, wrap or expire, tick down
    /// any frame counters. May flip the deleted flag.
    fn advance(&mut self, viewport: &Viewport);
}

/// Advance every live member of a group, then drop the ones flagged deleted.
///
/// Two passes on purpose: splicing during the advance sweep would slide the
/// next element into the vacated slot and skip it.
pub fn advance_and_compact<T: Entity>(group: &mut Vec<T>, viewport: &Viewport) {
    for item in group.iter_mut() {
        if !item.is_deleted() {
            item.advance(viewport);
        }
    }
    group.retain(|item| !item.is_deleted());
}
