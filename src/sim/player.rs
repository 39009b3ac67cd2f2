//! Player progression: bouncing, steering and horizontal wrap-around
//!
//! Grounded/airborne is never tracked internally; the host's ground
//! contact report for the current frame decides it.

use glam::Vec2;

use super::channel::{Direction, EntityId, GameEvent, HostRequest, Outbox, TickInput};
use super::state::{Player, Pose};
use crate::tuning::Tuning;

/// Horizontal velocity for a direction (no momentum)
#[inline]
pub fn steer(direction: Direction, speed: f32) -> f32 {
    match direction {
        Direction::Left => -speed,
        Direction::Right => speed,
        Direction::None => 0.0,
    }
}

/// Wrap `x` around a cylinder of width `game_width`
///
/// Values already within `[-half_width, game_width + half_width]` are
/// returned unchanged.
#[inline]
pub fn wrap_horizontal(x: f32, half_width: f32, game_width: f32) -> f32 {
    if x < -half_width {
        game_width + half_width
    } else if x > game_width + half_width {
        -half_width
    } else {
        x
    }
}

/// Mirror the host's player body, then decide this frame's velocity
pub fn update_player(player: &mut Player, input: &TickInput, tuning: &Tuning, out: &mut Outbox) {
    player.pos = input.player_pos;
    player.vel = input.player_vel;
    player.grounded = input.touching_ground;

    let vy = if player.grounded {
        out.emit(GameEvent::Bounced);
        set_pose(player, Pose::Jump, out);
        tuning.bounce_velocity
    } else {
        if player.vel.y > 0.0 {
            set_pose(player, Pose::Stand, out);
        }
        player.vel.y
    };
    let vx = steer(input.direction, tuning.horizontal_speed);

    player.vel = Vec2::new(vx, vy);
    out.request(HostRequest::SetVelocity {
        entity: EntityId::PLAYER,
        vel: player.vel,
    });
}

/// Teleport the player to the opposite edge once fully off-screen
///
/// Returns true when a teleport was requested.
pub fn apply_wrap(player: &mut Player, game_width: f32, out: &mut Outbox) -> bool {
    let x = wrap_horizontal(player.pos.x, player.half_width(), game_width);
    if x == player.pos.x {
        return false;
    }
    player.pos.x = x;
    out.request(HostRequest::SetPosition {
        entity: EntityId::PLAYER,
        pos: player.pos,
    });
    true
}

fn set_pose(player: &mut Player, pose: Pose, out: &mut Outbox) {
    if player.pose != pose {
        player.pose = pose;
        out.emit(GameEvent::PoseChanged { pose });
    }
}
