//! Boundary between the core and its host
//!
//! Inbound: one [`TickInput`] per frame carrying everything the host's
//! physics, camera and input layers observed. Outbound: an [`Outbox`] of
//! [`HostRequest`]s (body changes the host must apply) and [`GameEvent`]s
//! (notifications for UI and audio).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Pose;

/// Which pool (or the player) an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Platform,
    Collectible,
}

/// Host-visible identity of an entity: kind plus pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    pub kind: EntityKind,
    pub slot: u32,
}

impl EntityId {
    /// The single player entity
    pub const PLAYER: EntityId = EntityId {
        kind: EntityKind::Player,
        slot: 0,
    };

    pub const fn new(kind: EntityKind, slot: u32) -> Self {
        Self { kind, slot }
    }
}

/// Decoded directional input for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    #[default]
    None,
}

/// Two physically enabled entities whose bounds intersect this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    pub a: EntityId,
    pub b: EntityId,
}

impl Overlap {
    pub fn new(a: EntityId, b: EntityId) -> Self {
        Self { a, b }
    }

    /// Returns the slot of the collectible if this is a player/collectible pair
    pub fn player_collectible(&self) -> Option<u32> {
        match (self.a.kind, self.b.kind) {
            (EntityKind::Player, EntityKind::Collectible) => Some(self.b.slot),
            (EntityKind::Collectible, EntityKind::Player) => Some(self.a.slot),
            _ => None,
        }
    }
}

/// Everything the host reports for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional input (keyboard/pointer already decoded)
    pub direction: Direction,
    /// Player body is resting on a platform from above
    pub touching_ground: bool,
    /// Camera vertical scroll offset
    pub scroll_offset: f32,
    /// Player body position after the host's integration step
    pub player_pos: Vec2,
    /// Player body velocity after the host's integration step
    pub player_vel: Vec2,
    /// Overlap notifications gathered this frame
    pub overlaps: Vec<Overlap>,
}

/// Body changes the host must apply
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HostRequest {
    SetVelocity { entity: EntityId, vel: Vec2 },
    SetPosition { entity: EntityId, pos: Vec2 },
    SetActive { entity: EntityId, active: bool },
    SetVisible { entity: EntityId, visible: bool },
    SetPhysicsEnabled { entity: EntityId, enabled: bool },
}

/// Notifications for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Collected count changed (UI text)
    ScoreChanged { total: u64 },
    /// The player fell off the column; fired once per session
    SessionEnded { score: u64 },
    /// Player bounced off a platform (jump sound)
    Bounced,
    /// Player texture should change
    PoseChanged { pose: Pose },
    /// A platform was moved to the top of the column
    PlatformRecycled { platform: EntityId, pos: Vec2 },
    /// A collectible was placed above a platform
    CollectibleSpawned { collectible: EntityId, pos: Vec2 },
}

/// Outbound queues, drained by the host once per frame
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    requests: Vec<HostRequest>,
    events: Vec<GameEvent>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn request(&mut self, request: HostRequest) {
        self.requests.push(request);
    }

    #[inline]
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pending requests, oldest first
    pub fn requests(&self) -> &[HostRequest] {
        &self.requests
    }

    /// Pending events, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending requests (keeps the allocation)
    pub fn drain_requests(&mut self) -> std::vec::Drain<'_, HostRequest> {
        self.requests.drain(..)
    }

    /// Take all pending events (keeps the allocation)
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.requests.clear();
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty() && self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_collectible_either_order() {
        let c = EntityId::new(EntityKind::Collectible, 3);
        assert_eq!(Overlap::new(EntityId::PLAYER, c).player_collectible(), Some(3));
        assert_eq!(Overlap::new(c, EntityId::PLAYER).player_collectible(), Some(3));

        let p = EntityId::new(EntityKind::Platform, 1);
        assert_eq!(Overlap::new(p, c).player_collectible(), None);
        assert_eq!(Overlap::new(EntityId::PLAYER, p).player_collectible(), None);
    }

    #[test]
    fn test_drain_keeps_order() {
        let mut out = Outbox::new();
        out.emit(GameEvent::Bounced);
        out.emit(GameEvent::ScoreChanged { total: 1 });
        let events: Vec<_> = out.drain_events().collect();
        assert_eq!(events, vec![GameEvent::Bounced, GameEvent::ScoreChanged { total: 1 }]);
        assert!(out.is_empty());
    }
}
