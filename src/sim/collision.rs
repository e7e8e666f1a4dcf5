//! Collision detection
//!
//! Plain axis-aligned box overlap. Overlap must be strict on both axes, so
//! rects that only share an edge do not collide.

use super::state::{Obstacle, Player, Rect};

/// Strict AABB overlap test
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Does the player overlap this obstacle?
#[inline]
pub fn intersects(player: &Player, obstacle: &Obstacle) -> bool {
    aabb_overlap(&player.rect(), &obstacle.rect())
}

/// Index of the first obstacle (in spawn order) the player overlaps
pub fn first_collision(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles.iter().position(|o| intersects(player, o))
}
