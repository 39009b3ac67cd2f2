//! Collection ledger: overlap notifications to score

use super::channel::{GameEvent, Outbox};
use super::pool::Pool;
use super::state::Collectible;

/// Award a collectible touched by the player
///
/// Only a live (active, physics-enabled) collectible scores. It is parked
/// immediately, so further notifications for it are ignored until the
/// spawner hands it out again. Returns true if the score changed.
pub fn collect(
    collectibles: &mut Pool<Collectible>,
    score: &mut u64,
    slot: u32,
    out: &mut Outbox,
) -> bool {
    let Some(handle) = collectibles.handle(slot) else {
        log::debug!("Overlap with unknown collectible slot {}", slot);
        return false;
    };
    let live = collectibles.get(handle).is_some_and(|c| c.body.is_live());
    if !live {
        return false;
    }

    collectibles.release(handle, out);
    *score += 1;
    out.emit(GameEvent::ScoreChanged { total: *score });
    log::debug!("Collected {} (score {})", slot, *score);
    true
}
