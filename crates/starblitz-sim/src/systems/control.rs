//! Ship control system: applies keyboard and pointer-drag input to the
//! ship's horizontal position and clamps it to the view.

use hecs::World;

use starblitz_core::components::{Collider, Ship};
use starblitz_core::constants::{DT_SECS, PLAYER_SPEED};
use starblitz_core::types::Position;

use crate::engine::InputState;

/// Apply one tick of input. Keyboard left wins over right; drag deltas
/// accumulated since the last tick are applied on top, then the position
/// is clamped to the view.
pub fn run(world: &mut World, input: &mut InputState, view_width: f64) {
    for (_entity, (_ship, pos, collider)) in world.query_mut::<(&Ship, &mut Position, &Collider)>()
    {
        if input.left {
            pos.x -= PLAYER_SPEED * DT_SECS;
        } else if input.right {
            pos.x += PLAYER_SPEED * DT_SECS;
        }
        pos.x += input.pending_drag_x;
        pos.x = pos.x.clamp(collider.half_width, view_width - collider.half_width);
    }
    input.pending_drag_x = 0.0;
}
