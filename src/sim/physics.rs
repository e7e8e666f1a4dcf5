//! Vertical player physics
//!
//! Constant gravity with a hard ground clamp. Steps are per tick; there is no
//! delta-time scaling.

use super::state::Player;

/// Advance the player one tick: gravity, then clamp to the ground line.
///
/// After this returns, `player.pos.y <= ground_line`, and a player on the
/// ground line always has `vy == 0` and `grounded == true`.
pub fn step_player(player: &mut Player, gravity: f32, ground_line: f32) {
    player.vy += gravity;
    player.pos.y += player.vy;

    if player.pos.y >= ground_line {
        player.pos.y = ground_line;
        player.vy = 0.0;
        player.grounded = true;
    }
}

/// Launch the player if it is standing on the ground.
///
/// Returns false (and leaves the player untouched) when airborne.
pub fn try_jump(player: &mut Player, jump_velocity: f32) -> bool {
    if !player.grounded {
        return false;
    }
    player.vy = jump_velocity;
    player.grounded = false;
    true
}
