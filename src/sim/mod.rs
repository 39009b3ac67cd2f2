//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per host frame
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering, physics or platform dependencies: the host is only
//!   reached through `TickInput` and the session `Outbox`

pub mod channel;
pub mod ledger;
pub mod player;
pub mod pool;
pub mod recycle;
pub mod spawn;
pub mod state;
pub mod termination;
pub mod tick;

pub use channel::{Direction, EntityId, EntityKind, GameEvent, HostRequest, Outbox, Overlap, TickInput};
pub use ledger::collect;
pub use player::{apply_wrap, steer, update_player, wrap_horizontal};
pub use pool::{Body, Handle, Pool, Pooled};
pub use recycle::recycle_platforms;
pub use spawn::spawn_above;
pub use state::{Collectible, GamePhase, GameState, Platform, Player, Pose};
pub use termination::{check_termination, find_bottom_most, has_fallen};
pub use tick::{deliver_overlaps, tick};
