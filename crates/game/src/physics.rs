//! Player physics.
//!
//! One call per tick: apply held-direction impulses, cap speed per axis,
//! integrate, apply friction, then clamp to the arena.

use crate::config::{ArenaConfig, PlayerConfig};
use crate::entity::Player;
use crate::input::Controls;

/// Advance the player by one tick.
pub fn step_player(player: &mut Player, controls: Controls, config: &PlayerConfig, arena: &ArenaConfig) {
    let accel = config.accel;
    if controls.up {
        player.velocity.y -= accel;
    }
    if controls.down {
        player.velocity.y += accel;
    }
    if controls.left {
        player.velocity.x -= accel;
    }
    if controls.right {
        player.velocity.x += accel;
    }

    let max = config.max_speed;
    player.velocity.x = player.velocity.x.clamp(-max, max);
    player.velocity.y = player.velocity.y.clamp(-max, max);

    player.position += player.velocity;
    player.velocity *= config.friction;

    player.check_border(arena);
}
