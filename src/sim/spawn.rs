//! Collectible spawning above recycled platforms

use glam::Vec2;

use super::channel::{GameEvent, Outbox};
use super::pool::{Handle, Pool};
use super::state::{Collectible, Platform};

/// Place one collectible directly above `platform`
///
/// Always spawns, whatever happened to the previously spawned collectible.
pub fn spawn_above(
    platform: &Platform,
    collectibles: &mut Pool<Collectible>,
    out: &mut Outbox,
) -> Handle<Collectible> {
    let pos = Vec2::new(platform.body.pos.x, platform.body.pos.y - platform.body.size.y);
    let handle = collectibles.acquire(pos, out);
    out.emit(GameEvent::CollectibleSpawned {
        collectible: handle.id(),
        pos,
    });
    log::debug!("Collectible {} spawned at ({}, {})", handle.slot(), pos.x, pos.y);
    handle
}
